//! Login and registration reducer.
//!
//! Form input is validated synchronously; a rejected form never reaches the
//! network. A successful response stores the access token through the
//! environment's token storage, which authorizes every later request.

use crate::environment::BlogEnvironment;
use crate::error::{BlogError, Result};
use crate::model::AuthSession;
use crate::repository::{AuthRepository, PostRepository};
use crate::validation::{validate_login, validate_register};
use crate::view_state::ViewState;
use culinary_blog_core::async_effect;
use culinary_blog_core::effect::Effect;
use culinary_blog_core::generation::{Generation, RequestGeneration};
use culinary_blog_core::reducer::Reducer;
use culinary_blog_core::{SmallVec, smallvec};
use std::fmt;

/// Message for a transport failure without details.
pub const NETWORK_ERROR_MESSAGE: &str = "Ошибка сети";

/// Login / registration form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Username (or email on the login form)
    pub username: String,
    /// Email, registration only
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation, registration only
    pub confirm_password: String,
    /// Outcome of the last submission
    pub session: ViewState<AuthSession>,
    requests: RequestGeneration,
}

impl AuthState {
    /// Whether the user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.session, ViewState::Success(_))
    }

    /// Inline error under the form.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.session.error()
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Auth actions.
#[derive(Clone, PartialEq)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Form input
    // ═══════════════════════════════════════════════════════════════════════
    /// Username field edited
    UsernameChanged(String),
    /// Email field edited
    EmailChanged(String),
    /// Password field edited
    PasswordChanged(String),
    /// Confirmation field edited
    ConfirmPasswordChanged(String),

    // ═══════════════════════════════════════════════════════════════════════
    // Submissions
    // ═══════════════════════════════════════════════════════════════════════
    /// Submit the login form
    Login,
    /// Submit the registration form
    Register,

    // ═══════════════════════════════════════════════════════════════════════
    // Completions
    // ═══════════════════════════════════════════════════════════════════════
    /// Login or registration request finished
    Authenticated {
        /// Generation the request was issued with
        generation: Generation,
        /// Tokens or failure
        result: Result<AuthSession>,
    },
}

// Form fields carry passwords.
impl fmt::Debug for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernameChanged(username) => {
                f.debug_tuple("UsernameChanged").field(username).finish()
            },
            Self::EmailChanged(email) => f.debug_tuple("EmailChanged").field(email).finish(),
            Self::PasswordChanged(_) => f.write_str("PasswordChanged(..)"),
            Self::ConfirmPasswordChanged(_) => f.write_str("ConfirmPasswordChanged(..)"),
            Self::Login => f.write_str("Login"),
            Self::Register => f.write_str("Register"),
            Self::Authenticated { generation, result } => f
                .debug_struct("Authenticated")
                .field("generation", generation)
                .field("result", result)
                .finish(),
        }
    }
}

/// Message shown for a failed login or registration.
///
/// The server's own error text wins when it sent one; otherwise the status
/// code is shown. Transport failures show their description.
#[must_use]
pub fn auth_error_message(error: &BlogError) -> String {
    match error {
        BlogError::Server { status, message } if message.trim().is_empty() => {
            format!("Ошибка сервера: {status}")
        },
        BlogError::Server { message, .. } => message.clone(),
        BlogError::Network(message) if message.trim().is_empty() => {
            NETWORK_ERROR_MESSAGE.to_string()
        },
        other => other.to_string(),
    }
}

/// Auth reducer.
#[derive(Debug, Clone)]
pub struct AuthReducer<P, A> {
    _phantom: std::marker::PhantomData<(P, A)>,
}

impl<P, A> AuthReducer<P, A> {
    /// Create a new auth reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, A> Default for AuthReducer<P, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, A> Reducer for AuthReducer<P, A>
where
    P: PostRepository + Clone + 'static,
    A: AuthRepository + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = BlogEnvironment<P, A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::UsernameChanged(username) => {
                state.username = username;
                smallvec![Effect::None]
            },
            AuthAction::EmailChanged(email) => {
                state.email = email;
                smallvec![Effect::None]
            },
            AuthAction::PasswordChanged(password) => {
                state.password = password;
                smallvec![Effect::None]
            },
            AuthAction::ConfirmPasswordChanged(confirm_password) => {
                state.confirm_password = confirm_password;
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Login: validate, then one request
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Login => {
                let credentials = match validate_login(&state.username, &state.password) {
                    Ok(credentials) => credentials,
                    Err(error) => {
                        tracing::debug!(%error, "Login form rejected");
                        // Supersede any submission still in flight
                        state.requests.issue();
                        state.session.fail(error.to_string());
                        return smallvec![Effect::None];
                    },
                };

                let generation = state.requests.issue();
                state.session.begin_loading();

                let auth = env.auth.clone();
                smallvec![async_effect! {
                    let result = auth.login(credentials).await;
                    Some(AuthAction::Authenticated { generation, result })
                }]
            },

            // ═══════════════════════════════════════════════════════════════
            // Register: validate, then one request
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Register => {
                let credentials = match validate_register(
                    &state.username,
                    &state.email,
                    &state.password,
                    &state.confirm_password,
                ) {
                    Ok(credentials) => credentials,
                    Err(error) => {
                        tracing::debug!(%error, "Registration form rejected");
                        // Supersede any submission still in flight
                        state.requests.issue();
                        state.session.fail(error.to_string());
                        return smallvec![Effect::None];
                    },
                };

                let generation = state.requests.issue();
                state.session.begin_loading();

                let auth = env.auth.clone();
                smallvec![async_effect! {
                    let result = auth.register(credentials).await;
                    Some(AuthAction::Authenticated { generation, result })
                }]
            },

            // ═══════════════════════════════════════════════════════════════
            // Authenticated: store the token
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Authenticated { generation, result } => {
                if !state.requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded auth response");
                    return smallvec![Effect::None];
                }

                match result {
                    Ok(session) => {
                        let token = session.access_token.clone();
                        state.session.succeed(session);
                        tracing::info!("Signed in");

                        let tokens = std::sync::Arc::clone(&env.tokens);
                        smallvec![async_effect! {
                            tokens.save_token(token);
                            None
                        }]
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Authentication failed");
                        state.session.fail(auth_error_message(&error));
                        smallvec![Effect::None]
                    },
                }
            },
        }
    }
}
