//! Mock auth repository for testing.

use super::{Script, respond};
use crate::error::Result;
use crate::model::AuthSession;
use crate::repository::AuthRepository;
use crate::validation::{LoginCredentials, RegisterCredentials};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct State {
    login: Script<AuthSession>,
    register: Script<AuthSession>,
    logins: Vec<LoginCredentials>,
    registrations: Vec<RegisterCredentials>,
}

/// Mock auth repository.
///
/// Clones share their script and call log.
#[derive(Debug, Clone, Default)]
pub struct MockAuthRepository {
    state: Arc<Mutex<State>>,
}

impl MockAuthRepository {
    /// Create a mock with nothing scripted; every call fails until scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience session carrying only an access token.
    #[must_use]
    pub fn session(access_token: &str) -> AuthSession {
        AuthSession {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_in: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the next login response.
    #[must_use]
    pub fn with_login(self, result: Result<AuthSession>) -> Self {
        self.with_login_after(Duration::ZERO, result)
    }

    /// Script the next login response, delivered after `delay`.
    #[must_use]
    pub fn with_login_after(self, delay: Duration, result: Result<AuthSession>) -> Self {
        self.lock().login.push(delay, result);
        self
    }

    /// Script the next registration response.
    #[must_use]
    pub fn with_register(self, result: Result<AuthSession>) -> Self {
        self.lock().register.push(Duration::ZERO, result);
        self
    }

    /// Credentials of every login request.
    #[must_use]
    pub fn logins(&self) -> Vec<LoginCredentials> {
        self.lock().logins.clone()
    }

    /// Credentials of every registration request.
    #[must_use]
    pub fn registrations(&self) -> Vec<RegisterCredentials> {
        self.lock().registrations.clone()
    }

    /// Requests of any kind.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        let state = self.lock();
        state.login.calls() + state.register.calls()
    }
}

impl AuthRepository for MockAuthRepository {
    fn login(
        &self,
        credentials: LoginCredentials,
    ) -> impl Future<Output = Result<AuthSession>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.logins.push(credentials);
            state.login.next()
        };
        respond(delay, result)
    }

    fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> impl Future<Output = Result<AuthSession>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.registrations.push(credentials);
            state.register.next()
        };
        respond(delay, result)
    }
}
