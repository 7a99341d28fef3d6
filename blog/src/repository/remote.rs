//! Repositories backed by the REST API.

use super::{AuthRepository, PostRepository};
use crate::error::{BlogError, Result};
use crate::mapper::map_all;
use crate::model::{AuthSession, ImageUpload, IngredientItem, PostCard, PostFull, TagItem};
use crate::request::NewPost;
use crate::validation::{LoginCredentials, RegisterCredentials};
use culinary_blog_api::BlogClient;
use culinary_blog_api::dto::{LoginRequestDto, PostCreateDto, RegisterRequestDto};

/// [`PostRepository`] over [`BlogClient`].
#[derive(Clone, Debug)]
pub struct RemotePostRepository {
    client: BlogClient,
}

impl RemotePostRepository {
    /// Wrap a client.
    #[must_use]
    pub const fn new(client: BlogClient) -> Self {
        Self { client }
    }
}

impl PostRepository for RemotePostRepository {
    async fn published_posts(&self) -> Result<Vec<PostCard>> {
        let posts: Vec<PostCard> = map_all(self.client.published_posts().await?);
        tracing::debug!(count = posts.len(), "Feed loaded");
        Ok(posts)
    }

    async fn post(&self, id: i64, current_user_id: Option<i64>) -> Result<PostFull> {
        let dto = self
            .client
            .post(id, current_user_id)
            .await?
            .ok_or(BlogError::EmptyBody)?;
        Ok(PostFull::from(dto))
    }

    async fn tags(&self, search: Option<String>) -> Result<Vec<TagItem>> {
        let page = self.client.tags(search.as_deref()).await?;
        Ok(map_all(page.and_then(|page| page.results)))
    }

    async fn ingredients(&self, search: Option<String>) -> Result<Vec<IngredientItem>> {
        let page = self.client.ingredients(search.as_deref()).await?;
        Ok(map_all(page.and_then(|page| page.results)))
    }

    async fn create_post(&self, post: NewPost) -> Result<PostCard> {
        let request = PostCreateDto::from(post);
        let created = self
            .client
            .create_post(&request)
            .await?
            .ok_or(BlogError::EmptyBody)?;
        tracing::info!(post_id = created.id, "Post created");
        Ok(PostCard::from(created))
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<String> {
        let ImageUpload {
            target,
            file_name,
            mime_type,
            bytes,
        } = upload;
        let uploaded = self
            .client
            .upload_image(target.kind(), &file_name, bytes, &mime_type)
            .await?
            .ok_or(BlogError::EmptyBody)?;
        Ok(uploaded.url)
    }
}

/// [`AuthRepository`] over [`BlogClient`].
#[derive(Clone, Debug)]
pub struct RemoteAuthRepository {
    client: BlogClient,
}

impl RemoteAuthRepository {
    /// Wrap a client.
    #[must_use]
    pub const fn new(client: BlogClient) -> Self {
        Self { client }
    }
}

impl AuthRepository for RemoteAuthRepository {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession> {
        let request = LoginRequestDto {
            username: credentials.username,
            password: credentials.password,
        };
        let response = self
            .client
            .login(&request)
            .await?
            .ok_or(BlogError::EmptyBody)?;
        Ok(AuthSession::from(response))
    }

    async fn register(&self, credentials: RegisterCredentials) -> Result<AuthSession> {
        let request = RegisterRequestDto {
            username: credentials.username,
            email: credentials.email,
            password: credentials.password,
        };
        let response = self
            .client
            .register(&request)
            .await?
            .ok_or(BlogError::EmptyBody)?;
        Ok(AuthSession::from(response))
    }
}
