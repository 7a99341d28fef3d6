//! Error types for the culinary blog client.

use culinary_blog_api::ApiError;
use thiserror::Error;

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Every failure a repository call or a screen action can end in.
///
/// Repositories never panic or leak transport errors; they convert every
/// outcome into this taxonomy at their boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BlogError {
    /// Input rejected locally, before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport fault: connection refused, timeout, TLS, unbuildable request.
    #[error("{0}")]
    Network(String),

    /// Server answered with a non-2xx status.
    #[error("Server error: {status}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Raw response body, possibly empty
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Malformed response: {0}")]
    Deserialization(String),

    /// Server answered 2xx without the body the call requires.
    #[error("Empty body")]
    EmptyBody,
}

impl BlogError {
    /// HTTP status of a server failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for BlogError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::RequestFailed(message)
            | ApiError::InvalidRequest(message)
            | ApiError::InvalidConfig(message) => Self::Network(message),
            ApiError::Server { status, message } => Self::Server { status, message },
            ApiError::ResponseParseFailed(message) => Self::Deserialization(message),
        }
    }
}

/// Local validation failures.
///
/// Messages are the user-facing texts shown inline on the triggering screen.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    // ═══════════════════════════════════════════════════════════
    // Auth forms
    // ═══════════════════════════════════════════════════════════

    /// Login form without a username or email.
    #[error("Введите имя пользователя или email")]
    MissingLogin,

    /// Registration form without a username.
    #[error("Введите имя пользователя")]
    MissingUsername,

    /// Registration email is empty or malformed.
    #[error("Неверный email")]
    InvalidEmail,

    /// Password shorter than [`MIN_PASSWORD_LENGTH`](crate::constants::MIN_PASSWORD_LENGTH).
    #[error("Пароль должен быть минимум 6 символов")]
    PasswordTooShort,

    /// Password confirmation differs.
    #[error("Пароли не совпадают")]
    PasswordMismatch,

    // ═══════════════════════════════════════════════════════════
    // Post creation form
    // ═══════════════════════════════════════════════════════════

    /// Title, excerpt or content is blank.
    #[error("Заполните заголовок, описание и текст публикации")]
    MissingRequiredFields,

    /// A selected ingredient has no amount, or an amount below [`MIN_POSITIVE_AMOUNT`](crate::constants::MIN_POSITIVE_AMOUNT),
    /// or ingredient rows exist but none of them is usable.
    #[error("Укажите количество для каждого выбранного ингредиента (не меньше 0.01)")]
    InvalidIngredientAmount,

    /// Step rows exist but every description is blank.
    #[error("Опишите хотя бы один шаг приготовления")]
    MissingSteps,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_message_mentions_minimum() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Пароль должен быть минимум 6 символов"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let error = BlogError::from(ValidationError::PasswordMismatch);
        assert_eq!(error.to_string(), "Пароли не совпадают");
    }

    #[test]
    fn test_api_error_conversion() {
        assert_eq!(
            BlogError::from(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
            BlogError::Server {
                status: 500,
                message: "boom".to_string(),
            }
        );
        assert_eq!(
            BlogError::from(ApiError::RequestFailed("refused".to_string())),
            BlogError::Network("refused".to_string())
        );
        assert!(matches!(
            BlogError::from(ApiError::ResponseParseFailed("eof".to_string())),
            BlogError::Deserialization(_)
        ));
    }

    #[test]
    fn test_server_error_display_and_status() {
        let error = BlogError::Server {
            status: 404,
            message: String::new(),
        };
        assert_eq!(error.to_string(), "Server error: 404");
        assert_eq!(error.status(), Some(404));
        assert_eq!(BlogError::EmptyBody.status(), None);
    }
}
