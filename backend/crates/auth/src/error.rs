//! Auth Error Types
//!
//! Failures of the auth module that are not sign-in rejections.
//! Rejections are ordinary values (`domain::outcome::Reason`); these are
//! the paths that abort a request. Everything integrates with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session cookie missing, expired or not signed by us
    #[error("Session not found or expired")]
    SessionInvalid,

    /// CSRF double-submit check failed
    #[error("CSRF token missing or mismatched")]
    CsrfTokenMismatch,

    /// JWT encoding failure
    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::CsrfTokenMismatch => ErrorKind::Forbidden,
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::SessionInvalid => "session-invalid",
            AuthError::CsrfTokenMismatch => "csrf-token-mismatch",
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                "internal-server-error"
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server errors get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        let message = if self.kind().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Session token error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::CsrfTokenMismatch => {
                tracing::warn!("CSRF token mismatch");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::SessionInvalid.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::CsrfTokenMismatch.kind(), ErrorKind::Forbidden);
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolClosed).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AuthError::Internal("decrypt failed for user 42".into()).to_app_error();
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.code(), Some("internal-server-error"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = AuthError::SessionInvalid.to_app_error();
        assert_eq!(err.message(), "Session not found or expired");
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.code(), Some("session-invalid"));

        let err = AuthError::CsrfTokenMismatch.to_app_error();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.code(), Some("csrf-token-mismatch"));
    }
}
