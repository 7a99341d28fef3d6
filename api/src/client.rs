//! Blog API client implementation

use crate::{
    config::ApiConfig,
    dto::{
        AuthResponseDto, IngredientDto, LoginRequestDto, PaginatedResponseDto, PostCardDto,
        PostCreateDto, PostFullDto, RegisterRequestDto, TagDto, UploadKind, UploadResponseDto,
    },
    error::ApiError,
    token::TokenStorage,
};
use reqwest::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Page requested from `GET tags`
pub const TAGS_PAGE_SIZE: u32 = 16;

/// Page requested from `GET ingredients`
pub const INGREDIENTS_PAGE_SIZE: u32 = 30;

/// Blog REST API client
///
/// Every method issues exactly one HTTP request. A 2xx response with an
/// empty (or `null`) body yields `Ok(None)`; callers decide whether that is
/// acceptable. Non-auth requests carry `Authorization: Bearer <token>` when
/// the token storage holds a token.
#[derive(Clone)]
pub struct BlogClient {
    http: Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenStorage>,
}

impl BlogClient {
    /// Create a new client
    ///
    /// If the configuration carries an access token it is written to
    /// `tokens` first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the HTTP client can't be built.
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStorage>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        if let Some(token) = config.access_token() {
            tokens.save_token(token.to_string());
        }

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Token storage shared with the auth flow
    #[must_use]
    pub fn tokens(&self) -> Arc<dyn TokenStorage> {
        Arc::clone(&self.tokens)
    }

    /// `GET posts`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self), name = "api_published_posts")]
    pub async fn published_posts(&self) -> Result<Option<Vec<PostCardDto>>, ApiError> {
        let request = self.authorized(self.http.get(self.config.endpoint("posts")));
        Self::execute(request).await
    }

    /// `GET posts/{id}?currentUserId=`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self), name = "api_post")]
    pub async fn post(
        &self,
        id: i64,
        current_user_id: Option<i64>,
    ) -> Result<Option<PostFullDto>, ApiError> {
        let mut request = self.http.get(self.config.endpoint(&format!("posts/{id}")));
        if let Some(user_id) = current_user_id {
            request = request.query(&[("currentUserId", user_id)]);
        }
        Self::execute(self.authorized(request)).await
    }

    /// `GET tags?page=1&page_size=16&search=`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self), name = "api_tags")]
    pub async fn tags(
        &self,
        search: Option<&str>,
    ) -> Result<Option<PaginatedResponseDto<TagDto>>, ApiError> {
        let request = self.lookup("tags", TAGS_PAGE_SIZE, search);
        Self::execute(request).await
    }

    /// `GET ingredients?page=1&page_size=30&search=`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self), name = "api_ingredients")]
    pub async fn ingredients(
        &self,
        search: Option<&str>,
    ) -> Result<Option<PaginatedResponseDto<IngredientDto>>, ApiError> {
        let request = self.lookup("ingredients", INGREDIENTS_PAGE_SIZE, search);
        Self::execute(request).await
    }

    /// `POST posts`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self, request), fields(title = %request.title), name = "api_create_post")]
    pub async fn create_post(
        &self,
        request: &PostCreateDto,
    ) -> Result<Option<PostCardDto>, ApiError> {
        let builder = self
            .authorized(self.http.post(self.config.endpoint("posts")))
            .json(request);
        Self::execute(builder).await
    }

    /// `POST uploads/{kind}` with a multipart `file` part
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for an unparsable MIME type, and
    /// errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()), name = "api_upload_image")]
    pub async fn upload_image(
        &self,
        kind: UploadKind,
        file_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<Option<UploadResponseDto>, ApiError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .authorized(
                self.http
                    .post(self.config.endpoint(&format!("uploads/{}", kind.as_str()))),
            )
            .multipart(form);
        Self::execute(request).await
    }

    /// `POST api/auth/login`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self, request), name = "api_login")]
    pub async fn login(
        &self,
        request: &LoginRequestDto,
    ) -> Result<Option<AuthResponseDto>, ApiError> {
        let builder = self
            .http
            .post(self.config.endpoint("api/auth/login"))
            .json(request);
        Self::execute(builder).await
    }

    /// `POST api/auth/register`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or parsing failures
    #[tracing::instrument(skip(self, request), name = "api_register")]
    pub async fn register(
        &self,
        request: &RegisterRequestDto,
    ) -> Result<Option<AuthResponseDto>, ApiError> {
        let builder = self
            .http
            .post(self.config.endpoint("api/auth/register"))
            .json(request);
        Self::execute(builder).await
    }

    fn lookup(&self, path: &str, page_size: u32, search: Option<&str>) -> RequestBuilder {
        let mut request = self
            .http
            .get(self.config.endpoint(path))
            .query(&[("page", 1), ("page_size", page_size)]);
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            request = request.query(&[("search", search)]);
        }
        self.authorized(request)
    }

    /// Attach the bearer token, if one is stored
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token().filter(|token| !token.is_empty()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Server returned an error status");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(status = status.as_u16(), "Empty response body");
            return Ok(None);
        }

        // `null` is treated like an empty body
        let parsed = serde_json::from_slice::<Option<T>>(&body)
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;
        tracing::debug!(status = status.as_u16(), "Request completed");
        Ok(parsed)
    }
}

impl std::fmt::Debug for BlogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
