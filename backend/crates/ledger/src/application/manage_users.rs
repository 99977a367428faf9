//! User Management Use Case (admin)

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user_account::UserAccount;
use crate::domain::repository::AccountRepository;
use crate::error::LedgerResult;

pub struct ManageUsersUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> ManageUsersUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    /// Newest accounts first
    pub async fn list(&self) -> LedgerResult<Vec<UserAccount>> {
        self.account_repo.list().await
    }

    pub async fn toggle_premium(&self, user_id: &UserId) -> LedgerResult<UserAccount> {
        let account = self
            .account_repo
            .update_with(user_id, |account| {
                account.toggle_premium();
                Ok(account.clone())
            })
            .await?;

        tracing::info!(user_id = %user_id, premium = account.premium, "Premium toggled by admin");
        Ok(account)
    }

    pub async fn toggle_ban(&self, user_id: &UserId) -> LedgerResult<UserAccount> {
        let account = self
            .account_repo
            .update_with(user_id, |account| {
                account.toggle_banned();
                Ok(account.clone())
            })
            .await?;

        tracing::warn!(user_id = %user_id, banned = account.banned, "Ban toggled by admin");
        Ok(account)
    }
}
