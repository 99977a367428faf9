//! Register Account Use Case
//!
//! Create-or-fetch an account for an external identity. A newly created
//! account credits its referrer; a returning identity gets nothing.

use std::sync::Arc;

use crate::domain::entity::user_account::{NewAccount, UserAccount};
use crate::domain::repository::{AccountRepository, Registration, SettingsRepository};
use crate::error::LedgerResult;

pub struct RegisterAccountUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    account_repo: Arc<A>,
    settings_repo: Arc<S>,
}

impl<A, S> RegisterAccountUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    pub fn new(account_repo: Arc<A>, settings_repo: Arc<S>) -> Self {
        Self {
            account_repo,
            settings_repo,
        }
    }

    /// `grant_admin` is the identity's current admin status. The stored role is
    /// brought in line with it on every sign-in, in both directions.
    pub async fn execute(&self, input: NewAccount, grant_admin: bool) -> LedgerResult<Registration> {
        if let Some(account) = self.account_repo.find_by_telegram_id(input.telegram_id).await? {
            return self.existing(account, grant_admin).await;
        }

        let settings = self.settings_repo.load().await?;

        let mut account = UserAccount::new(input);
        account.set_admin(grant_admin);

        let registration = self
            .account_repo
            .register(&account, settings.referral_bonus())
            .await?;

        if !registration.created {
            // Concurrent sign-in for the same identity won the insert
            return self.existing(registration.account, grant_admin).await;
        }

        tracing::info!(
            user_id = %registration.account.user_id,
            telegram_id = registration.account.telegram_id,
            referred_by = ?registration.account.referrer(),
            "Account created"
        );

        Ok(registration)
    }

    async fn existing(&self, account: UserAccount, grant_admin: bool) -> LedgerResult<Registration> {
        let account = if account.is_admin() != grant_admin {
            let updated = self
                .account_repo
                .update_with(&account.user_id, |account| {
                    account.set_admin(grant_admin);
                    Ok(account.clone())
                })
                .await?;
            if grant_admin {
                tracing::info!(user_id = %updated.user_id, "Account promoted to admin");
            } else {
                tracing::warn!(user_id = %updated.user_id, "Account no longer listed as admin, demoted");
            }
            updated
        } else {
            account
        };

        Ok(Registration {
            account,
            created: false,
        })
    }
}
