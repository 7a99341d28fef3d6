//! Client configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default API root used when `CULINARY_BLOG_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`BlogClient`](crate::BlogClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
    access_token: Option<String>,
}

impl ApiConfig {
    /// Create a configuration for the given API root.
    ///
    /// A trailing slash is appended when missing so endpoint paths join
    /// relative to the root.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            access_token: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `CULINARY_BLOG_API_URL` (default [`DEFAULT_BASE_URL`])
    /// - `CULINARY_BLOG_TIMEOUT_SECS` (default [`DEFAULT_TIMEOUT_SECS`], unparsable values fall back to it)
    /// - `CULINARY_BLOG_TOKEN` (optional initial access token)
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("CULINARY_BLOG_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("CULINARY_BLOG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let access_token = env::var("CULINARY_BLOG_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Self {
            base_url: normalize_base_url(base_url),
            timeout: Duration::from_secs(timeout),
            access_token,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an initial access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// API root, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Initial access token, if configured.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Absolute URL of an endpoint path relative to the API root.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(mut url: String) -> String {
    let trimmed = url.trim_end().len();
    url.truncate(trimmed);
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
