//! Daily Reset Use Case
//!
//! Eager bulk reset of per-day ad counters. The lazy roll-over in the reward
//! engine stays authoritative; this only keeps stored counters tidy.

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::day_key::DayKey;
use crate::error::LedgerResult;

pub struct DailyResetUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> DailyResetUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, today: DayKey) -> LedgerResult<u64> {
        let reset = self.account_repo.reset_daily_counters(today).await?;
        tracing::info!(day = %today, accounts_reset = reset, "Daily ad counters reset");
        Ok(reset)
    }
}
