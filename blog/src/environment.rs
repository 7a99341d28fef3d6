//! Blog environment.
//!
//! Dependencies injected into every screen reducer.

use crate::repository::{
    AuthRepository, PostRepository, RemoteAuthRepository, RemotePostRepository,
};
use culinary_blog_api::{BlogClient, TokenStorage};
use std::sync::Arc;

/// Blog environment.
///
/// # Type Parameters
///
/// - `P`: Post repository
/// - `A`: Auth repository
#[derive(Clone)]
pub struct BlogEnvironment<P, A>
where
    P: PostRepository + Clone,
    A: AuthRepository + Clone,
{
    /// Posts, lookups and uploads.
    pub posts: P,
    /// Login and registration.
    pub auth: A,
    /// Access token written after a successful login.
    pub tokens: Arc<dyn TokenStorage>,
}

impl<P, A> BlogEnvironment<P, A>
where
    P: PostRepository + Clone,
    A: AuthRepository + Clone,
{
    /// Create a new environment.
    #[must_use]
    pub fn new(posts: P, auth: A, tokens: Arc<dyn TokenStorage>) -> Self {
        Self {
            posts,
            auth,
            tokens,
        }
    }
}

impl BlogEnvironment<RemotePostRepository, RemoteAuthRepository> {
    /// Environment talking to the REST API through `client`.
    ///
    /// The token storage is the client's own, so a login immediately
    /// authorizes subsequent requests.
    #[must_use]
    pub fn remote(client: BlogClient) -> Self {
        let tokens = client.tokens();
        Self::new(
            RemotePostRepository::new(client.clone()),
            RemoteAuthRepository::new(client),
            tokens,
        )
    }
}

impl<P, A> std::fmt::Debug for BlogEnvironment<P, A>
where
    P: PostRepository + Clone,
    A: AuthRepository + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogEnvironment").finish_non_exhaustive()
    }
}
