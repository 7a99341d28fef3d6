//! Mock repository implementations for testing.
//!
//! Each mock answers from a script of canned results: responses are consumed
//! in order and the last one repeats. A response can be delayed to simulate a
//! slow network, which is how tests provoke out-of-order completions.

pub mod auth;
pub mod posts;

pub use auth::MockAuthRepository;
pub use posts::MockPostRepository;

use crate::environment::BlogEnvironment;
use crate::error::{BlogError, Result};
use culinary_blog_api::InMemoryTokenStorage;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Environment wired to mocks.
pub type MockEnvironment = BlogEnvironment<MockPostRepository, MockAuthRepository>;

impl MockEnvironment {
    /// Environment over the given mocks with empty in-memory token storage.
    #[must_use]
    pub fn mock(posts: MockPostRepository, auth: MockAuthRepository) -> Self {
        Self::new(posts, auth, Arc::new(InMemoryTokenStorage::new()))
    }
}

/// Scripted responses of one repository method.
#[derive(Debug)]
pub(crate) struct Script<T> {
    responses: VecDeque<(Duration, Result<T>)>,
    calls: usize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            responses: VecDeque::new(),
            calls: 0,
        }
    }
}

impl<T: Clone> Script<T> {
    pub(crate) fn push(&mut self, delay: Duration, result: Result<T>) {
        self.responses.push_back((delay, result));
    }

    /// Count a call and pick its response.
    pub(crate) fn next(&mut self) -> (Duration, Result<T>) {
        self.calls += 1;
        let response = if self.responses.len() > 1 {
            self.responses.pop_front()
        } else {
            self.responses.front().cloned()
        };
        response.unwrap_or_else(|| {
            (
                Duration::ZERO,
                Err(BlogError::Network("no response scripted".to_string())),
            )
        })
    }

    pub(crate) const fn calls(&self) -> usize {
        self.calls
    }
}

/// Wait out the scripted delay, then resolve.
pub(crate) async fn respond<T>(delay: Duration, result: Result<T>) -> Result<T> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_repeats_last_response() {
        let mut script = Script::default();
        script.push(Duration::ZERO, Ok(1));
        script.push(Duration::ZERO, Ok(2));

        assert_eq!(script.next().1, Ok(1));
        assert_eq!(script.next().1, Ok(2));
        assert_eq!(script.next().1, Ok(2));
        assert_eq!(script.calls(), 3);
    }

    #[test]
    fn test_unscripted_call_fails() {
        let mut script: Script<i32> = Script::default();
        assert!(matches!(script.next().1, Err(BlogError::Network(_))));
    }
}
