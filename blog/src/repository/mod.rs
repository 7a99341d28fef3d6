//! Repositories.
//!
//! The traits are the seam between reducers and the network: reducers only
//! see these traits through their environment, production code plugs in the
//! [`remote`] implementations, and tests plug in [`crate::mocks`].
//!
//! Every method issues exactly one request and resolves to a
//! [`Result`](crate::error::Result); nothing panics and no transport error
//! type leaks out.

use crate::error::Result;
use crate::model::{AuthSession, ImageUpload, IngredientItem, PostCard, PostFull, TagItem};
use crate::request::NewPost;
use crate::validation::{LoginCredentials, RegisterCredentials};
use std::future::Future;

pub mod remote;

pub use remote::{RemoteAuthRepository, RemotePostRepository};

/// Posts, lookups and uploads.
pub trait PostRepository: Send + Sync {
    /// Published posts for the feed.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The request fails → `BlogError::Network`
    /// - The server answers non-2xx → `BlogError::Server`
    /// - The body can't be decoded → `BlogError::Deserialization`
    ///
    /// An empty body is an empty feed.
    fn published_posts(&self) -> impl Future<Output = Result<Vec<PostCard>>> + Send;

    /// Full post by id, with per-user flags when `current_user_id` is given.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::published_posts`], plus `BlogError::EmptyBody`
    /// when the server answers without a post.
    fn post(
        &self,
        id: i64,
        current_user_id: Option<i64>,
    ) -> impl Future<Output = Result<PostFull>> + Send;

    /// First page of tags, optionally filtered.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::published_posts`].
    fn tags(&self, search: Option<String>) -> impl Future<Output = Result<Vec<TagItem>>> + Send;

    /// First page of ingredients, optionally filtered.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::published_posts`].
    fn ingredients(
        &self,
        search: Option<String>,
    ) -> impl Future<Output = Result<Vec<IngredientItem>>> + Send;

    /// Create a post and return its feed card.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::post`].
    fn create_post(&self, post: NewPost) -> impl Future<Output = Result<PostCard>> + Send;

    /// Upload an image and return its public URL.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::post`]. An unusable MIME type is a
    /// `BlogError::Network` failure raised before anything is sent.
    fn upload_image(&self, upload: ImageUpload) -> impl Future<Output = Result<String>> + Send;
}

/// Login and registration.
pub trait AuthRepository: Send + Sync {
    /// Exchange credentials for tokens.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::post`].
    fn login(
        &self,
        credentials: LoginCredentials,
    ) -> impl Future<Output = Result<AuthSession>> + Send;

    /// Create an account and return its tokens.
    ///
    /// # Errors
    ///
    /// As [`PostRepository::post`].
    fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> impl Future<Output = Result<AuthSession>> + Send;
}
