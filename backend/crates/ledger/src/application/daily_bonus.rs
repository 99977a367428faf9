//! Daily Bonus Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{AccountRepository, SettingsRepository};
use crate::domain::services::{self, BonusCredit};
use crate::domain::value_object::day_key::DayKey;
use crate::error::LedgerResult;

pub struct DailyBonusUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    account_repo: Arc<A>,
    settings_repo: Arc<S>,
}

impl<A, S> DailyBonusUseCase<A, S>
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

    pub async fn execute(&self, user_id: &UserId, today: DayKey) -> LedgerResult<BonusCredit> {
        let settings = self.settings_repo.load().await?;

        let credit = self
            .account_repo
            .update_with(user_id, |account| {
                Ok(services::claim_daily_bonus(account, &settings, today)?)
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            bonus = credit.bonus.value(),
            day = %today,
            "Daily bonus claimed"
        );

        Ok(credit)
    }
}
