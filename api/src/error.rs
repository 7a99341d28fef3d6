//! Error types for the culinary blog API client

use thiserror::Error;

/// Errors that can occur when talking to the blog API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request could not be built (bad multipart MIME type, for example)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Server answered with a non-2xx status
    #[error("Server error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Raw response body, possibly empty
        message: String,
    },

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
