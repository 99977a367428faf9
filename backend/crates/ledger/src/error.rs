//! Ledger Error Types
//!
//! Ledger-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entity::settings::SettingsError;
use crate::domain::services::Rejection;
use crate::domain::value_object::withdrawal_status::{StatusTransitionError, UnknownStatus};

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Business-rule rejection from the reward engine
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("User not found")]
    UserNotFound,

    #[error("Withdrawal not found")]
    WithdrawalNotFound,

    /// Review of an already approved or rejected withdrawal
    #[error("{0}")]
    WithdrawalFinalized(String),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("{0}")]
    InvalidSettings(#[from] SettingsError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Rejected(_)
            | LedgerError::InvalidStatus(_)
            | LedgerError::InvalidSettings(_) => ErrorKind::BadRequest,
            LedgerError::UserNotFound | LedgerError::WithdrawalNotFound => ErrorKind::NotFound,
            LedgerError::WithdrawalFinalized(_) => ErrorKind::Conflict,
            LedgerError::Database(_) | LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Storage details stay in the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::Database(_) | LedgerError::Internal(_) => {
                AppError::internal("Server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "Ledger database error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::Rejected(Rejection::Banned) => {
                tracing::warn!("Reward action attempted by banned user");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl From<StatusTransitionError> for LedgerError {
    fn from(err: StatusTransitionError) -> Self {
        match err {
            StatusTransitionError::AlreadyFinalized(_) => {
                LedgerError::WithdrawalFinalized(err.to_string())
            }
            StatusTransitionError::NotTerminal => LedgerError::InvalidStatus(err.to_string()),
        }
    }
}

impl From<UnknownStatus> for LedgerError {
    fn from(err: UnknownStatus) -> Self {
        LedgerError::InvalidStatus(err.to_string())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::withdrawal_status::WithdrawalStatus;

    #[test]
    fn test_kinds() {
        assert_eq!(
            LedgerError::from(Rejection::DailyLimitReached).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(LedgerError::WithdrawalNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            LedgerError::from(StatusTransitionError::AlreadyFinalized(WithdrawalStatus::Approved))
                .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            LedgerError::from(StatusTransitionError::NotTerminal).kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_rejection_message_passes_through() {
        let err = LedgerError::from(Rejection::InsufficientBalance).to_app_error();
        assert_eq!(err.message(), "Insufficient balance for withdrawal");
    }

    #[test]
    fn test_storage_errors_are_masked() {
        let err = LedgerError::Internal("pool exhausted".into()).to_app_error();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(err.message(), "Server error");
    }
}
