//! API DTOs (Data Transfer Objects)
//!
//! Account and withdrawal views carry stored (milli) integers; action
//! responses (`reward`, `bonus`, `balance`) carry display units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    settings::Settings,
    user_account::UserAccount,
    withdrawal::{OwnerSummary, Withdrawal, WithdrawalWithOwner},
};

// ============================================================================
// Views
// ============================================================================

/// Account as returned to clients and admins
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: &'static str,
    pub balance: i64,
    pub total_earned: i64,
    pub total_ads: i64,
    pub daily_ads: i64,
    pub last_ad_date: Option<String>,
    pub daily_bonus_date: Option<String>,
    pub premium: bool,
    pub banned: bool,
    pub referrals: i64,
    pub referred_by: Option<i64>,
    pub badges: Vec<String>,
    pub join_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.user_id.to_string(),
            telegram_id: account.telegram_id,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.user_role.code(),
            balance: account.balance.value(),
            total_earned: account.total_earned.value(),
            total_ads: account.total_ads,
            daily_ads: account.daily_ads,
            last_ad_date: account.last_ad_date.map(|d| d.to_string()),
            daily_bonus_date: account.daily_bonus_date.map(|d| d.to_string()),
            premium: account.premium,
            banned: account.banned,
            referrals: account.referrals,
            referred_by: account.referred_by,
            badges: account.badges,
            join_date: account.join_date,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalView {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub method: String,
    pub address: String,
    pub status: String,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Withdrawal> for WithdrawalView {
    fn from(withdrawal: Withdrawal) -> Self {
        Self {
            id: withdrawal.withdrawal_id.to_string(),
            user_id: withdrawal.user_id.to_string(),
            amount: withdrawal.amount.value(),
            method: withdrawal.method,
            address: withdrawal.address,
            status: withdrawal.status.code().to_string(),
            date: withdrawal.created_at,
            updated_at: withdrawal.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl From<OwnerSummary> for OwnerView {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            telegram_id: owner.telegram_id,
            username: owner.username,
            first_name: owner.first_name,
        }
    }
}

/// Withdrawal joined with its owner (admin listing)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWithdrawalView {
    #[serde(flatten)]
    pub withdrawal: WithdrawalView,
    pub user: Option<OwnerView>,
}

impl From<WithdrawalWithOwner> for AdminWithdrawalView {
    fn from(listing: WithdrawalWithOwner) -> Self {
        Self {
            withdrawal: listing.withdrawal.into(),
            user: listing.owner.map(Into::into),
        }
    }
}

// ============================================================================
// User Endpoints
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: AccountView,
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchAdResponse {
    pub success: bool,
    pub reward: f64,
    pub balance: f64,
    pub daily_ads: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyBonusResponse {
    pub success: bool,
    pub bonus: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawRequest {
    pub method: String,
    #[serde(default)]
    pub address: String,
}

// ============================================================================
// Admin Endpoints
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WithdrawalQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWithdrawalRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateWithdrawalResponse {
    pub success: bool,
    pub withdrawal: AdminWithdrawalView,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSettingsResponse {
    pub success: bool,
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserToggleResponse {
    pub success: bool,
    pub user: AccountView,
}
