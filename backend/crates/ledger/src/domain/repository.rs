//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.
//!
//! Mutations take a closure that runs against the locked current state: the
//! change is persisted only if the closure returns `Ok`, so a rejection never
//! leaves a partial write behind.

use kernel::id::{UserId, WithdrawalId};

use crate::domain::entity::{
    settings::Settings,
    user_account::UserAccount,
    withdrawal::{Withdrawal, WithdrawalFilter, WithdrawalWithOwner},
};
use crate::domain::value_object::{day_key::DayKey, milli::Milli};
use crate::error::LedgerResult;

/// Outcome of a create-or-fetch
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: UserAccount,
    /// False if the identity already had an account (no referral credit was granted)
    pub created: bool,
}

/// User ledger
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn find_by_id(&self, user_id: &UserId) -> LedgerResult<Option<UserAccount>>;

    async fn find_by_telegram_id(&self, telegram_id: i64) -> LedgerResult<Option<UserAccount>>;

    /// All accounts, newest first
    async fn list(&self) -> LedgerResult<Vec<UserAccount>>;

    /// Insert the account unless its identity already exists. When inserted and
    /// it names an existing referrer, credit that referrer in the same transaction.
    async fn register(&self, account: &UserAccount, referral_bonus: Milli)
    -> LedgerResult<Registration>;

    /// Locked read-modify-write of one account
    async fn update_with<F, T>(&self, user_id: &UserId, f: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut UserAccount) -> LedgerResult<T> + Send,
        T: Send;

    /// Zero `daily_ads` for every account not yet stamped with `today`.
    /// Returns the number of rows reset.
    async fn reset_daily_counters(&self, today: DayKey) -> LedgerResult<u64>;
}

/// Settings store
#[trait_variant::make(SettingsRepository: Send)]
pub trait LocalSettingsRepository {
    /// Stored settings, or defaults if none were ever saved
    async fn load(&self) -> LedgerResult<Settings>;

    /// Locked read-modify-write of the settings record. Starts from defaults
    /// if none were ever saved.
    async fn update_settings_with<F>(&self, f: F) -> LedgerResult<Settings>
    where
        F: FnOnce(&mut Settings) -> LedgerResult<()> + Send;
}

/// Withdrawal ledger
#[trait_variant::make(WithdrawalRepository: Send)]
pub trait LocalWithdrawalRepository {
    /// Lock the owner, build the withdrawal from it, then persist both the
    /// account and the new record in one transaction.
    async fn submit<F>(&self, user_id: &UserId, f: F) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut UserAccount) -> LedgerResult<Withdrawal> + Send;

    /// The owner's withdrawals, newest first
    async fn list_for_user(&self, user_id: &UserId) -> LedgerResult<Vec<Withdrawal>>;

    /// Admin listing, newest first
    async fn search(&self, filter: &WithdrawalFilter) -> LedgerResult<Vec<WithdrawalWithOwner>>;

    /// Locked read-modify-write of one withdrawal
    async fn update_status_with<F>(
        &self,
        withdrawal_id: &WithdrawalId,
        f: F,
    ) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut Withdrawal) -> LedgerResult<()> + Send;
}

/// Every ledger repository behind one handle, as the HTTP layer needs it
pub trait LedgerStore:
    AccountRepository + SettingsRepository + WithdrawalRepository + Clone + Send + Sync + 'static
{
}

impl<T> LedgerStore for T where
    T: AccountRepository + SettingsRepository + WithdrawalRepository + Clone + Send + Sync + 'static
{
}
