//! In-memory Repository
//!
//! Process-local implementation of every ledger repository, used by tests and
//! local tooling. A single mutex serializes all operations; closures run on a
//! copy that is written back only on success.

use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::{UserId, WithdrawalId};

use crate::domain::entity::{
    settings::Settings,
    user_account::UserAccount,
    withdrawal::{OwnerSummary, Withdrawal, WithdrawalFilter, WithdrawalWithOwner},
};
use crate::domain::repository::{
    AccountRepository, Registration, SettingsRepository, WithdrawalRepository,
};
use crate::domain::value_object::{day_key::DayKey, milli::Milli};
use crate::error::{LedgerError, LedgerResult};

#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    /// Insertion order
    accounts: Vec<UserAccount>,
    settings: Option<Settings>,
    /// Insertion order
    withdrawals: Vec<Withdrawal>,
}

impl MemoryState {
    fn account_mut(&mut self, user_id: &UserId) -> Option<&mut UserAccount> {
        self.accounts.iter_mut().find(|a| a.user_id == *user_id)
    }

    fn owner_of(&self, user_id: &UserId) -> Option<OwnerSummary> {
        self.accounts
            .iter()
            .find(|a| a.user_id == *user_id)
            .map(|a| OwnerSummary {
                telegram_id: a.telegram_id,
                username: a.username.clone(),
                first_name: a.first_name.clone(),
            })
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> LedgerResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Internal("memory ledger lock poisoned".to_string()))
    }
}

impl AccountRepository for MemoryLedger {
    async fn find_by_id(&self, user_id: &UserId) -> LedgerResult<Option<UserAccount>> {
        let state = self.state()?;
        Ok(state.accounts.iter().find(|a| a.user_id == *user_id).cloned())
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> LedgerResult<Option<UserAccount>> {
        let state = self.state()?;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.telegram_id == telegram_id)
            .cloned())
    }

    async fn list(&self) -> LedgerResult<Vec<UserAccount>> {
        let state = self.state()?;
        Ok(state.accounts.iter().rev().cloned().collect())
    }

    async fn register(
        &self,
        account: &UserAccount,
        referral_bonus: Milli,
    ) -> LedgerResult<Registration> {
        let mut state = self.state()?;

        if let Some(existing) = state
            .accounts
            .iter()
            .find(|a| a.telegram_id == account.telegram_id)
        {
            return Ok(Registration {
                account: existing.clone(),
                created: false,
            });
        }

        state.accounts.push(account.clone());

        if let Some(referrer) = account.referrer()
            && let Some(referrer) = state.accounts.iter_mut().find(|a| a.telegram_id == referrer)
        {
            referrer.credit_referral(referral_bonus);
            referrer.touch();
        }

        Ok(Registration {
            account: account.clone(),
            created: true,
        })
    }

    async fn update_with<F, T>(&self, user_id: &UserId, f: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut UserAccount) -> LedgerResult<T> + Send,
        T: Send,
    {
        let mut state = self.state()?;
        let stored = state.account_mut(user_id).ok_or(LedgerError::UserNotFound)?;

        let mut account = stored.clone();
        let output = f(&mut account)?;
        account.touch();
        *stored = account;

        Ok(output)
    }

    async fn reset_daily_counters(&self, today: DayKey) -> LedgerResult<u64> {
        let mut state = self.state()?;
        let mut reset = 0;
        for account in state.accounts.iter_mut() {
            if account.last_ad_date != Some(today) {
                account.daily_ads = 0;
                account.last_ad_date = Some(today);
                account.touch();
                reset += 1;
            }
        }
        Ok(reset)
    }
}

impl SettingsRepository for MemoryLedger {
    async fn load(&self) -> LedgerResult<Settings> {
        let state = self.state()?;
        Ok(state.settings.clone().unwrap_or_default())
    }

    async fn update_settings_with<F>(&self, f: F) -> LedgerResult<Settings>
    where
        F: FnOnce(&mut Settings) -> LedgerResult<()> + Send,
    {
        let mut state = self.state()?;
        let mut settings = state.settings.clone().unwrap_or_default();
        f(&mut settings)?;
        state.settings = Some(settings.clone());
        Ok(settings)
    }
}

impl WithdrawalRepository for MemoryLedger {
    async fn submit<F>(&self, user_id: &UserId, f: F) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut UserAccount) -> LedgerResult<Withdrawal> + Send,
    {
        let mut state = self.state()?;
        let stored = state.account_mut(user_id).ok_or(LedgerError::UserNotFound)?;

        let mut account = stored.clone();
        let withdrawal = f(&mut account)?;
        account.touch();
        *stored = account;
        state.withdrawals.push(withdrawal.clone());

        Ok(withdrawal)
    }

    async fn list_for_user(&self, user_id: &UserId) -> LedgerResult<Vec<Withdrawal>> {
        let state = self.state()?;
        Ok(state
            .withdrawals
            .iter()
            .rev()
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn search(&self, filter: &WithdrawalFilter) -> LedgerResult<Vec<WithdrawalWithOwner>> {
        let state = self.state()?;
        Ok(state
            .withdrawals
            .iter()
            .rev()
            .filter(|w| filter.matches(w))
            .map(|w| WithdrawalWithOwner {
                withdrawal: w.clone(),
                owner: state.owner_of(&w.user_id),
            })
            .collect())
    }

    async fn update_status_with<F>(
        &self,
        withdrawal_id: &WithdrawalId,
        f: F,
    ) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut Withdrawal) -> LedgerResult<()> + Send,
    {
        let mut state = self.state()?;
        let stored = state
            .withdrawals
            .iter_mut()
            .find(|w| w.withdrawal_id == *withdrawal_id)
            .ok_or(LedgerError::WithdrawalNotFound)?;

        let mut withdrawal = stored.clone();
        f(&mut withdrawal)?;
        *stored = withdrawal.clone();

        Ok(withdrawal)
    }
}
