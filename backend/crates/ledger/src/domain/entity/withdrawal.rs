//! Withdrawal Entity
//!
//! A payout request. `amount` is a snapshot of the balance at creation and is
//! never changed afterwards; only `status` moves.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WithdrawalId};

use crate::domain::value_object::{
    milli::Milli,
    withdrawal_status::{StatusTransitionError, WithdrawalStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    pub withdrawal_id: WithdrawalId,
    pub user_id: UserId,
    pub amount: Milli,
    pub method: String,
    pub address: String,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Withdrawal {
    pub fn new(user_id: UserId, amount: Milli, method: String, address: String) -> Self {
        let now = Utc::now();

        Self {
            withdrawal_id: WithdrawalId::new(),
            user_id,
            amount,
            method,
            address,
            status: WithdrawalStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a review decision
    pub fn set_status(&mut self, target: WithdrawalStatus) -> Result<(), StatusTransitionError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Owner fields joined onto admin withdrawal listings
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSummary {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalWithOwner {
    pub withdrawal: Withdrawal,
    /// None if the owning account no longer exists
    pub owner: Option<OwnerSummary>,
}

/// Admin listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawalFilter {
    /// Exact status; None lists all
    pub status: Option<WithdrawalStatus>,
    /// Case-insensitive substring of the payout address
    pub search: Option<String>,
}

impl WithdrawalFilter {
    pub fn matches(&self, withdrawal: &Withdrawal) -> bool {
        if let Some(status) = self.status
            && withdrawal.status != status
        {
            return false;
        }
        match &self.search {
            Some(needle) => withdrawal
                .address
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn withdrawal(address: &str) -> Withdrawal {
        Withdrawal::new(UserId::new(), Milli::new(2500), "usdt".into(), address.into())
    }

    #[test]
    fn test_set_status_is_forward_only() {
        let mut w = withdrawal("TAbc");
        assert!(w.set_status(WithdrawalStatus::Approved).is_ok());
        assert_eq!(w.status, WithdrawalStatus::Approved);
        assert_eq!(
            w.set_status(WithdrawalStatus::Rejected),
            Err(StatusTransitionError::AlreadyFinalized(WithdrawalStatus::Approved))
        );
        assert_eq!(w.amount, Milli::new(2500));
    }

    #[test]
    fn test_filter() {
        let w = withdrawal("TXyzWallet");
        assert!(WithdrawalFilter::default().matches(&w));
        assert!(
            WithdrawalFilter {
                status: Some(WithdrawalStatus::Pending),
                search: Some("xyzw".into()),
            }
            .matches(&w)
        );
        assert!(
            !WithdrawalFilter {
                status: Some(WithdrawalStatus::Approved),
                search: None,
            }
            .matches(&w)
        );
        assert!(
            !WithdrawalFilter {
                status: None,
                search: Some("nope".into()),
            }
            .matches(&w)
        );
    }
}
