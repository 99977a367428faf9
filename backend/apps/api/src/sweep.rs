//! Daily reset scheduler
//!
//! Runs the counter sweep once at startup (catch-up after downtime) and then
//! at every UTC midnight. A failed run is logged and retried at the next
//! boundary; it never stops the server.

use chrono::Utc;
use ledger::application::DailyResetUseCase;
use ledger::domain::repository::AccountRepository;
use ledger::domain::value_object::day_key::DayKey;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub fn spawn_daily_reset<A>(repo: Arc<A>) -> JoinHandle<()>
where
    A: AccountRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let use_case = DailyResetUseCase::new(repo);

        run_once(&use_case).await;

        loop {
            let wait = platform::clock::until_next_utc_midnight(Utc::now());
            tracing::debug!(seconds = wait.as_secs(), "Next daily reset scheduled");
            tokio::time::sleep(wait).await;

            run_once(&use_case).await;
        }
    })
}

async fn run_once<A>(use_case: &DailyResetUseCase<A>)
where
    A: AccountRepository + Send + Sync + 'static,
{
    let today = DayKey::today();
    if let Err(e) = use_case.execute(today).await {
        e.log();
        tracing::warn!(day = %today, "Daily reset failed, retrying at next boundary");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::MemoryLedger;
    use ledger::domain::entity::user_account::{NewAccount, UserAccount};
    use ledger::domain::value_object::milli::Milli;
    use std::time::Duration;

    #[tokio::test]
    async fn test_startup_run_resets_stale_counters() {
        let ledger = Arc::new(MemoryLedger::new());
        let account = UserAccount::new(NewAccount {
            telegram_id: 1,
            ..Default::default()
        });
        ledger.register(&account, Milli::ZERO).await.unwrap();
        ledger
            .update_with(&account.user_id, |a| {
                a.daily_ads = 50;
                a.last_ad_date = Some("2000-01-01".parse().unwrap());
                Ok(())
            })
            .await
            .unwrap();

        let handle = spawn_daily_reset(ledger.clone());

        let mut reset = false;
        for _ in 0..50 {
            let stored = ledger.find_by_id(&account.user_id).await.unwrap().unwrap();
            if stored.daily_ads == 0 {
                reset = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(reset, "startup sweep did not run");
    }
}
