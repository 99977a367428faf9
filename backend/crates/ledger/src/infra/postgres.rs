//! PostgreSQL Repository Implementations
//!
//! Every mutation is a transaction that locks the affected row with
//! `SELECT ... FOR UPDATE` before the domain closure runs. Dropping the
//! transaction on an error path rolls it back.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{UserId, WithdrawalId};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    settings::Settings,
    user_account::UserAccount,
    withdrawal::{OwnerSummary, Withdrawal, WithdrawalFilter, WithdrawalWithOwner},
};
use crate::domain::repository::{
    AccountRepository, Registration, SettingsRepository, WithdrawalRepository,
};
use crate::domain::value_object::{
    day_key::DayKey, milli::Milli, user_role::UserRole, withdrawal_status::WithdrawalStatus,
};
use crate::error::{LedgerError, LedgerResult};

/// PostgreSQL-backed ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgLedgerRepository {
    async fn find_by_id(&self, user_id: &UserId) -> LedgerResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_id, telegram_id, username, first_name, last_name, user_role,
                balance, total_earned, total_ads, daily_ads, last_ad_date,
                daily_bonus_date, premium, banned, referrals, referred_by, badges,
                join_date, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> LedgerResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_id, telegram_id, username, first_name, last_name, user_role,
                balance, total_earned, total_ads, daily_ads, last_ad_date,
                daily_bonus_date, premium, banned, referrals, referred_by, badges,
                join_date, updated_at
            FROM users
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn list(&self) -> LedgerResult<Vec<UserAccount>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_id, telegram_id, username, first_name, last_name, user_role,
                balance, total_earned, total_ads, daily_ads, last_ad_date,
                daily_bonus_date, premium, banned, referrals, referred_by, badges,
                join_date, updated_at
            FROM users
            ORDER BY join_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }

    async fn register(
        &self,
        account: &UserAccount,
        referral_bonus: Milli,
    ) -> LedgerResult<Registration> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                user_id, telegram_id, username, first_name, last_name, user_role,
                balance, total_earned, total_ads, daily_ads, last_ad_date,
                daily_bonus_date, premium, banned, referrals, referred_by, badges,
                join_date, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            ON CONFLICT (telegram_id) DO NOTHING
            "#,
        )
        .bind(account.user_id.as_uuid())
        .bind(account.telegram_id)
        .bind(account.username.as_deref())
        .bind(account.first_name.as_deref())
        .bind(account.last_name.as_deref())
        .bind(account.user_role.id())
        .bind(account.balance.value())
        .bind(account.total_earned.value())
        .bind(account.total_ads)
        .bind(account.daily_ads)
        .bind(account.last_ad_date.map(|d| d.date()))
        .bind(account.daily_bonus_date.map(|d| d.date()))
        .bind(account.premium)
        .bind(account.banned)
        .bind(account.referrals)
        .bind(account.referred_by)
        .bind(&account.badges)
        .bind(account.join_date)
        .bind(account.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if !inserted {
            // Lost the race (or a returning user): no referral credit.
            let existing = sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT
                    user_id, telegram_id, username, first_name, last_name, user_role,
                    balance, total_earned, total_ads, daily_ads, last_ad_date,
                    daily_bonus_date, premium, banned, referrals, referred_by, badges,
                    join_date, updated_at
                FROM users
                WHERE telegram_id = $1
                "#,
            )
            .bind(account.telegram_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                LedgerError::Internal(format!(
                    "account for telegram_id {} conflicted but was not found",
                    account.telegram_id
                ))
            })?;
            tx.commit().await?;

            return Ok(Registration {
                account: existing.into_account(),
                created: false,
            });
        }

        if let Some(referrer) = account.referrer() {
            let credited = sqlx::query(
                r#"
                UPDATE users
                SET referrals = referrals + 1,
                    balance = balance + $2,
                    updated_at = NOW()
                WHERE telegram_id = $1
                "#,
            )
            .bind(referrer)
            .bind(referral_bonus.value())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if credited > 0 {
                tracing::info!(
                    referrer_telegram_id = referrer,
                    bonus = referral_bonus.value(),
                    "Referral bonus credited"
                );
            }
        }

        tx.commit().await?;

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
        let mut tx = self.pool.begin().await?;

        let mut account = lock_account(&mut tx, user_id)
            .await?
            .ok_or(LedgerError::UserNotFound)?;
        let output = f(&mut account)?;
        account.touch();
        store_account(&mut tx, &account).await?;

        tx.commit().await?;
        Ok(output)
    }

    async fn reset_daily_counters(&self, today: DayKey) -> LedgerResult<u64> {
        let reset = sqlx::query(
            r#"
            UPDATE users
            SET daily_ads = 0,
                last_ad_date = $1,
                updated_at = NOW()
            WHERE last_ad_date IS DISTINCT FROM $1
            "#,
        )
        .bind(today.date())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(reset)
    }
}

// ============================================================================
// Settings Repository Implementation
// ============================================================================

impl SettingsRepository for PgLedgerRepository {
    async fn load(&self) -> LedgerResult<Settings> {
        let document = sqlx::query_scalar::<_, Json<Settings>>(
            "SELECT document FROM settings WHERE settings_id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(document.map(|Json(settings)| settings).unwrap_or_default())
    }

    async fn update_settings_with<F>(&self, f: F) -> LedgerResult<Settings>
    where
        F: FnOnce(&mut Settings) -> LedgerResult<()> + Send,
    {
        let mut tx = self.pool.begin().await?;

        // Make sure the row exists so there is something to lock
        sqlx::query(
            r#"
            INSERT INTO settings (settings_id, document, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (settings_id) DO NOTHING
            "#,
        )
        .bind(Json(Settings::default()))
        .execute(&mut *tx)
        .await?;

        let Json(mut settings) = sqlx::query_scalar::<_, Json<Settings>>(
            "SELECT document FROM settings WHERE settings_id = 1 FOR UPDATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        f(&mut settings)?;

        sqlx::query("UPDATE settings SET document = $1, updated_at = NOW() WHERE settings_id = 1")
            .bind(Json(&settings))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(settings)
    }
}

// ============================================================================
// Withdrawal Repository Implementation
// ============================================================================

impl WithdrawalRepository for PgLedgerRepository {
    async fn submit<F>(&self, user_id: &UserId, f: F) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut UserAccount) -> LedgerResult<Withdrawal> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut account = lock_account(&mut tx, user_id)
            .await?
            .ok_or(LedgerError::UserNotFound)?;
        let withdrawal = f(&mut account)?;
        account.touch();
        store_account(&mut tx, &account).await?;

        sqlx::query(
            r#"
            INSERT INTO withdrawals (
                withdrawal_id, user_id, amount, method, address, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(withdrawal.withdrawal_id.as_uuid())
        .bind(withdrawal.user_id.as_uuid())
        .bind(withdrawal.amount.value())
        .bind(&withdrawal.method)
        .bind(&withdrawal.address)
        .bind(withdrawal.status.code())
        .bind(withdrawal.created_at)
        .bind(withdrawal.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(withdrawal)
    }

    async fn list_for_user(&self, user_id: &UserId) -> LedgerResult<Vec<Withdrawal>> {
        let rows = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT
                withdrawal_id, user_id, amount, method, address, status,
                created_at, updated_at
            FROM withdrawals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WithdrawalRow::into_withdrawal).collect()
    }

    async fn search(&self, filter: &WithdrawalFilter) -> LedgerResult<Vec<WithdrawalWithOwner>> {
        let rows = sqlx::query_as::<_, WithdrawalOwnerRow>(
            r#"
            SELECT
                w.withdrawal_id, w.user_id, w.amount, w.method, w.address, w.status,
                w.created_at, w.updated_at,
                u.telegram_id AS owner_telegram_id,
                u.username AS owner_username,
                u.first_name AS owner_first_name
            FROM withdrawals w
            LEFT JOIN users u ON u.user_id = w.user_id
            WHERE ($1::TEXT IS NULL OR w.status = $1)
              AND ($2::TEXT IS NULL OR strpos(lower(w.address), lower($2)) > 0)
            ORDER BY w.created_at DESC
            "#,
        )
        .bind(filter.status.map(|s| s.code()))
        .bind(filter.search.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WithdrawalOwnerRow::into_listing).collect()
    }

    async fn update_status_with<F>(
        &self,
        withdrawal_id: &WithdrawalId,
        f: F,
    ) -> LedgerResult<Withdrawal>
    where
        F: FnOnce(&mut Withdrawal) -> LedgerResult<()> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut withdrawal = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT
                withdrawal_id, user_id, amount, method, address, status,
                created_at, updated_at
            FROM withdrawals
            WHERE withdrawal_id = $1
            FOR UPDATE
            "#,
        )
        .bind(withdrawal_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(LedgerError::WithdrawalNotFound)?
        .into_withdrawal()?;

        f(&mut withdrawal)?;

        sqlx::query(
            "UPDATE withdrawals SET status = $2, updated_at = $3 WHERE withdrawal_id = $1",
        )
        .bind(withdrawal.withdrawal_id.as_uuid())
        .bind(withdrawal.status.code())
        .bind(withdrawal.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(withdrawal)
    }
}

// ============================================================================
// Row locking helpers
// ============================================================================

async fn lock_account(
    conn: &mut PgConnection,
    user_id: &UserId,
) -> LedgerResult<Option<UserAccount>> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT
            user_id, telegram_id, username, first_name, last_name, user_role,
            balance, total_earned, total_ads, daily_ads, last_ad_date,
            daily_bonus_date, premium, banned, referrals, referred_by, badges,
            join_date, updated_at
        FROM users
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id.as_uuid())
    .fetch_optional(conn)
    .await?;

    Ok(row.map(AccountRow::into_account))
}

/// Write back the mutable columns of a locked account
async fn store_account(conn: &mut PgConnection, account: &UserAccount) -> LedgerResult<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET username = $2,
            first_name = $3,
            last_name = $4,
            user_role = $5,
            balance = $6,
            total_earned = $7,
            total_ads = $8,
            daily_ads = $9,
            last_ad_date = $10,
            daily_bonus_date = $11,
            premium = $12,
            banned = $13,
            referrals = $14,
            badges = $15,
            updated_at = $16
        WHERE user_id = $1
        "#,
    )
    .bind(account.user_id.as_uuid())
    .bind(account.username.as_deref())
    .bind(account.first_name.as_deref())
    .bind(account.last_name.as_deref())
    .bind(account.user_role.id())
    .bind(account.balance.value())
    .bind(account.total_earned.value())
    .bind(account.total_ads)
    .bind(account.daily_ads)
    .bind(account.last_ad_date.map(|d| d.date()))
    .bind(account.daily_bonus_date.map(|d| d.date()))
    .bind(account.premium)
    .bind(account.banned)
    .bind(account.referrals)
    .bind(&account.badges)
    .bind(account.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: Uuid,
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    user_role: i16,
    balance: i64,
    total_earned: i64,
    total_ads: i64,
    daily_ads: i64,
    last_ad_date: Option<NaiveDate>,
    daily_bonus_date: Option<NaiveDate>,
    premium: bool,
    banned: bool,
    referrals: i64,
    referred_by: Option<i64>,
    badges: Vec<String>,
    join_date: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> UserAccount {
        UserAccount {
            user_id: UserId::from_uuid(self.user_id),
            telegram_id: self.telegram_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            user_role: UserRole::from_id(self.user_role),
            balance: Milli::new(self.balance),
            total_earned: Milli::new(self.total_earned),
            total_ads: self.total_ads,
            daily_ads: self.daily_ads,
            last_ad_date: self.last_ad_date.map(DayKey::new),
            daily_bonus_date: self.daily_bonus_date.map(DayKey::new),
            premium: self.premium,
            banned: self.banned,
            referrals: self.referrals,
            referred_by: self.referred_by,
            badges: self.badges,
            join_date: self.join_date,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawalRow {
    withdrawal_id: Uuid,
    user_id: Uuid,
    amount: i64,
    method: String,
    address: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WithdrawalRow {
    fn into_withdrawal(self) -> LedgerResult<Withdrawal> {
        let status: WithdrawalStatus = self
            .status
            .parse()
            .map_err(|e| LedgerError::Internal(format!("Invalid status: {}", e)))?;

        Ok(Withdrawal {
            withdrawal_id: WithdrawalId::from_uuid(self.withdrawal_id),
            user_id: UserId::from_uuid(self.user_id),
            amount: Milli::new(self.amount),
            method: self.method,
            address: self.address,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawalOwnerRow {
    #[sqlx(flatten)]
    withdrawal: WithdrawalRow,
    owner_telegram_id: Option<i64>,
    owner_username: Option<String>,
    owner_first_name: Option<String>,
}

impl WithdrawalOwnerRow {
    fn into_listing(self) -> LedgerResult<WithdrawalWithOwner> {
        let owner = self.owner_telegram_id.map(|telegram_id| OwnerSummary {
            telegram_id,
            username: self.owner_username,
            first_name: self.owner_first_name,
        });

        Ok(WithdrawalWithOwner {
            withdrawal: self.withdrawal.into_withdrawal()?,
            owner,
        })
    }
}
