//! Profile Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{settings::Settings, user_account::UserAccount};
use crate::domain::repository::{AccountRepository, SettingsRepository};
use crate::domain::value_object::day_key::DayKey;
use crate::error::{LedgerError, LedgerResult};

pub struct ProfileOutput {
    pub account: UserAccount,
    pub settings: Settings,
}

pub struct ProfileUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    account_repo: Arc<A>,
    settings_repo: Arc<S>,
}

impl<A, S> ProfileUseCase<A, S>
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

    /// A stale `daily_ads` reads as 0; `last_ad_date` is reported as stored.
    /// Nothing is written.
    pub async fn execute(&self, user_id: &UserId, today: DayKey) -> LedgerResult<ProfileOutput> {
        let mut account = self
            .account_repo
            .find_by_id(user_id)
            .await?
            .ok_or(LedgerError::UserNotFound)?;
        account.daily_ads = account.daily_ads_on(today);

        let settings = self.settings_repo.load().await?;

        Ok(ProfileOutput { account, settings })
    }
}
