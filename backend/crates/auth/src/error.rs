//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Credential and token failures are intentionally low-information in
//! responses; the full detail goes to tracing only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username; the two are indistinguishable
    /// by design to prevent username enumeration
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already exists
    #[error("Username is already taken")]
    UsernameTaken,

    /// Email already in use
    #[error("Email is already in use")]
    EmailTaken,

    /// Username validation error
    #[error("Username validation failed: {0}")]
    UsernameValidation(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Email validation error
    #[error("Email validation failed: {0}")]
    EmailValidation(String),

    /// Bearer token failed validation (malformed, bad signature, expired)
    #[error("Token rejected: {0}")]
    TokenInvalid(#[from] TokenError),

    /// Valid unexpired token whose subject no longer exists
    #[error("Token subject no longer exists")]
    PrincipalNotFound,

    /// Protected route reached without an authenticated context
    #[error("Authorization required")]
    AuthorizationDenied,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid(_)
            | AuthError::PrincipalNotFound
            | AuthError::AuthorizationDenied => StatusCode::UNAUTHORIZED,
            AuthError::UsernameTaken
            | AuthError::EmailTaken
            | AuthError::UsernameValidation(_)
            | AuthError::PasswordValidation(_)
            | AuthError::EmailValidation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid(_)
            | AuthError::PrincipalNotFound
            | AuthError::AuthorizationDenied => ErrorKind::Unauthorized,
            AuthError::UsernameTaken
            | AuthError::EmailTaken
            | AuthError::UsernameValidation(_)
            | AuthError::PasswordValidation(_)
            | AuthError::EmailValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Token and principal-resolution failures collapse to a generic
    /// "Unauthorized" so the response leaks nothing about why.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::TokenInvalid(_) | AuthError::PrincipalNotFound => "Unauthorized".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message)
    }

    /// Log the error with the appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::PrincipalNotFound => {
                tracing::warn!("Token presented for a deleted principal");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        // Duplicate signups are a plain 400, same as the other
        // registration rejections.
        assert_eq!(
            AuthError::UsernameTaken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::AuthorizationDenied.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::PasswordValidation("too short".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_token_failures_are_low_information() {
        let err = AuthError::TokenInvalid(TokenError::SignatureMismatch);
        assert_eq!(err.to_app_error().message(), "Unauthorized");

        let err = AuthError::PrincipalNotFound;
        assert_eq!(err.to_app_error().message(), "Unauthorized");
    }
}
