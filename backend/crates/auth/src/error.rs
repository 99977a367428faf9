//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use ledger::LedgerError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, malformed, forged or expired bearer token, or its account is gone
    #[error("Invalid token")]
    InvalidToken,

    #[error("telegramId must be a positive integer")]
    InvalidIdentity,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::InvalidIdentity => ErrorKind::BadRequest,
            AuthError::Ledger(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Ledger(e) => e.to_app_error(),
            AuthError::Internal(_) => AppError::internal("Server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Ledger(e) => e.log(),
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidToken => {
                tracing::debug!("Unauthenticated request");
            }
            AuthError::InvalidIdentity => {
                tracing::warn!("Sign-in with invalid identity");
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

impl From<platform::bearer::BearerError> for AuthError {
    fn from(err: platform::bearer::BearerError) -> Self {
        tracing::debug!(reason = %err, "Authorization header rejected");
        AuthError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::domain::services::Rejection;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::InvalidIdentity.kind(), ErrorKind::BadRequest);
        assert_eq!(
            AuthError::from(LedgerError::UserNotFound).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_ledger_messages_pass_through() {
        let err = AuthError::from(LedgerError::from(Rejection::Banned)).to_app_error();
        assert_eq!(err.message(), "User is banned");
    }

    #[test]
    fn test_invalid_token_status() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
