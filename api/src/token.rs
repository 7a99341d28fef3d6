//! Access token storage.
//!
//! The client reads the token before every authorized request, and the auth
//! flow writes it after a successful login. Persistent (encrypted) storage
//! lives outside this crate; [`InMemoryTokenStorage`] covers tests and the
//! demo binary.

use std::sync::{Mutex, PoisonError};

/// Storage for the current access token
pub trait TokenStorage: Send + Sync {
    /// Current token, if any
    fn token(&self) -> Option<String>;

    /// Replace the stored token
    fn save_token(&self, token: String);

    /// Forget the stored token
    fn clear_token(&self);
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct InMemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage holding `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn token(&self) -> Option<String> {
        // A panic while holding the lock cannot leave an Option half-written
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save_token(&self, token: String) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear_token(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
