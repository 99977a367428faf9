//! Watch Ad Use Case
//!
//! Credits one ad view, subject to the tier's daily limit.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{AccountRepository, SettingsRepository};
use crate::domain::services::{self, AdCredit};
use crate::domain::value_object::day_key::DayKey;
use crate::error::LedgerResult;

pub struct WatchAdUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    account_repo: Arc<A>,
    settings_repo: Arc<S>,
}

impl<A, S> WatchAdUseCase<A, S>
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

    pub async fn execute(&self, user_id: &UserId, today: DayKey) -> LedgerResult<AdCredit> {
        let settings = self.settings_repo.load().await?;

        let credit = self
            .account_repo
            .update_with(user_id, |account| {
                Ok(services::watch_ad(account, &settings, today)?)
            })
            .await?;

        tracing::debug!(
            user_id = %user_id,
            reward = credit.reward.value(),
            daily_ads = credit.daily_ads,
            "Ad view credited"
        );

        Ok(credit)
    }
}
