//! Synchronous checks of the login and registration forms.
//!
//! Both run before any network call; a failure is shown inline and nothing
//! is sent.

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::ValidationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // Literal pattern, checked by the tests below
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

/// Validated login input.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Trimmed username or email
    pub username: String,
    /// Password as typed
    pub password: String,
}

/// Validated registration input.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterCredentials {
    /// Trimmed username
    pub username: String,
    /// Trimmed email
    pub email: String,
    /// Password as typed
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Whether `email` looks like an address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check the login form.
///
/// # Errors
///
/// - [`ValidationError::MissingLogin`] if the username is blank
/// - [`ValidationError::PasswordTooShort`] if the password has fewer than
///   [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_login(username: &str, password: &str) -> Result<LoginCredentials, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingLogin);
    }
    check_password_length(password)?;

    Ok(LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Check the registration form.
///
/// # Errors
///
/// Checked in form order, the first failure wins:
/// [`ValidationError::MissingUsername`], [`ValidationError::InvalidEmail`],
/// [`ValidationError::PasswordTooShort`], [`ValidationError::PasswordMismatch`].
pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterCredentials, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }

    let email = email.trim();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    check_password_length(password)?;
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(RegisterCredentials {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn check_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("chef@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("chef@"));
        assert!(!is_valid_email("chef@example"));
        assert!(!is_valid_email("chef example@mail.com"));
    }

    #[test]
    fn test_login_requires_username() {
        assert_eq!(
            validate_login("   ", "secret1"),
            Err(ValidationError::MissingLogin)
        );
    }

    #[test]
    fn test_login_short_password() {
        assert_eq!(
            validate_login("chef", "abc"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_login_counts_characters_not_bytes() {
        // Six Cyrillic letters, twelve bytes
        assert!(validate_login("chef", "пароль").is_ok());
        assert_eq!(
            validate_login("chef", "пар"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_login_trims_username() {
        let credentials = validate_login(" chef ", "secret1").unwrap();
        assert_eq!(credentials.username, "chef");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn test_register_checks_in_form_order() {
        assert_eq!(
            validate_register("", "bad", "abc", "xyz").unwrap_err(),
            ValidationError::MissingUsername
        );
        assert_eq!(
            validate_register("chef", "bad", "abc", "xyz").unwrap_err(),
            ValidationError::InvalidEmail
        );
        assert_eq!(
            validate_register("chef", "chef@example.com", "abc", "xyz").unwrap_err(),
            ValidationError::PasswordTooShort
        );
        assert_eq!(
            validate_register("chef", "chef@example.com", "secret1", "secret2").unwrap_err(),
            ValidationError::PasswordMismatch
        );
    }

    #[test]
    fn test_register_success() {
        let credentials =
            validate_register("chef", " chef@example.com ", "secret1", "secret1").unwrap();
        assert_eq!(credentials.email, "chef@example.com");
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = validate_login("chef", "secret1").unwrap();
        assert!(!format!("{credentials:?}").contains("secret1"));
    }
}
