//! Buy Premium Use Case
//!
//! No payment is taken; the purchase only sets the flag.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user_account::UserAccount;
use crate::domain::repository::AccountRepository;
use crate::domain::services;
use crate::error::LedgerResult;

pub struct BuyPremiumUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> BuyPremiumUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LedgerResult<UserAccount> {
        let account = self
            .account_repo
            .update_with(user_id, |account| {
                services::activate_premium(account)?;
                Ok(account.clone())
            })
            .await?;

        tracing::info!(user_id = %user_id, "Premium activated");

        Ok(account)
    }
}
