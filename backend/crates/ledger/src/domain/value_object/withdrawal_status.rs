//! Withdrawal status lifecycle
//!
//! `Pending -> Approved | Rejected`. Approved and Rejected are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusTransitionError {
    #[error("Withdrawal already {0}")]
    AlreadyFinalized(WithdrawalStatus),
    #[error("Withdrawal status can only be set to Approved or Rejected")]
    NotTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown withdrawal status: {0}")]
pub struct UnknownStatus(pub String);

impl WithdrawalStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "Pending",
            WithdrawalStatus::Approved => "Approved",
            WithdrawalStatus::Rejected => "Rejected",
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, WithdrawalStatus::Pending)
    }

    /// Validate a review decision against the current status.
    pub fn transition_to(self, target: WithdrawalStatus) -> Result<WithdrawalStatus, StatusTransitionError> {
        if self.is_terminal() {
            return Err(StatusTransitionError::AlreadyFinalized(self));
        }
        if !target.is_terminal() {
            return Err(StatusTransitionError::NotTerminal);
        }
        Ok(target)
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WithdrawalStatus {
    type Err = UnknownStatus;

    /// Case-insensitive: admin tooling sends both `approved` and `Approved`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(WithdrawalStatus::Pending),
            "approved" => Ok(WithdrawalStatus::Approved),
            "rejected" => Ok(WithdrawalStatus::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Pending".parse(), Ok(WithdrawalStatus::Pending));
        assert_eq!("approved".parse(), Ok(WithdrawalStatus::Approved));
        assert_eq!(" REJECTED ".parse(), Ok(WithdrawalStatus::Rejected));
        assert!("paid".parse::<WithdrawalStatus>().is_err());
    }

    #[test]
    fn test_pending_to_terminal() {
        assert_eq!(
            WithdrawalStatus::Pending.transition_to(WithdrawalStatus::Approved),
            Ok(WithdrawalStatus::Approved)
        );
        assert_eq!(
            WithdrawalStatus::Pending.transition_to(WithdrawalStatus::Rejected),
            Ok(WithdrawalStatus::Rejected)
        );
    }

    #[test]
    fn test_rejects_non_forward_transitions() {
        assert_eq!(
            WithdrawalStatus::Pending.transition_to(WithdrawalStatus::Pending),
            Err(StatusTransitionError::NotTerminal)
        );
        assert_eq!(
            WithdrawalStatus::Approved.transition_to(WithdrawalStatus::Pending),
            Err(StatusTransitionError::AlreadyFinalized(WithdrawalStatus::Approved))
        );
        assert_eq!(
            WithdrawalStatus::Rejected.transition_to(WithdrawalStatus::Approved),
            Err(StatusTransitionError::AlreadyFinalized(WithdrawalStatus::Rejected))
        );
    }

    #[test]
    fn test_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&WithdrawalStatus::Approved).unwrap(),
            r#""Approved""#
        );
    }
}
