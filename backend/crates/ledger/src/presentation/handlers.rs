//! HTTP Handlers
//!
//! Every handler here runs behind the auth gate, which places the caller's
//! [`Principal`] in the request extensions.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use kernel::id::{UserId, WithdrawalId};
use kernel::principal::Principal;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{
    BuyPremiumUseCase, DailyBonusUseCase, GetSettingsUseCase, ListWithdrawalsUseCase,
    ManageUsersUseCase, ProfileUseCase, RequestWithdrawalInput, RequestWithdrawalUseCase,
    ReviewWithdrawalUseCase, SearchWithdrawalsUseCase, UpdateSettingsUseCase, WatchAdUseCase,
};
use crate::domain::entity::settings::Settings;
use crate::domain::repository::LedgerStore;
use crate::domain::value_object::day_key::DayKey;
use crate::error::LedgerResult;
use crate::presentation::dto::{
    AccountView, AdminWithdrawalView, DailyBonusResponse, MessageResponse, ProfileResponse,
    UpdateSettingsResponse, UpdateWithdrawalRequest, UpdateWithdrawalResponse, UserToggleResponse,
    WatchAdResponse, WithdrawRequest, WithdrawalQuery, WithdrawalView,
};

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R>
where
    R: LedgerStore,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/user
pub async fn profile<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> LedgerResult<Json<ProfileResponse>> {
    let use_case = ProfileUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case.execute(&principal.user_id, DayKey::today()).await?;

    Ok(Json(ProfileResponse {
        user: output.account.into(),
        settings: output.settings,
    }))
}

// ============================================================================
// Rewards
// ============================================================================

/// POST /api/watch-ad
pub async fn watch_ad<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> LedgerResult<Json<WatchAdResponse>> {
    let use_case = WatchAdUseCase::new(state.repo.clone(), state.repo.clone());
    let credit = use_case.execute(&principal.user_id, DayKey::today()).await?;

    Ok(Json(WatchAdResponse {
        success: true,
        reward: credit.reward.to_display(),
        balance: credit.balance.to_display(),
        daily_ads: credit.daily_ads,
    }))
}

/// POST /api/daily-bonus
pub async fn daily_bonus<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> LedgerResult<Json<DailyBonusResponse>> {
    let use_case = DailyBonusUseCase::new(state.repo.clone(), state.repo.clone());
    let credit = use_case.execute(&principal.user_id, DayKey::today()).await?;

    Ok(Json(DailyBonusResponse {
        success: true,
        bonus: credit.bonus.to_display(),
        balance: credit.balance.to_display(),
    }))
}

/// POST /api/buy-premium
pub async fn buy_premium<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> LedgerResult<Json<MessageResponse>> {
    BuyPremiumUseCase::new(state.repo.clone())
        .execute(&principal.user_id)
        .await?;

    Ok(Json(MessageResponse::ok("Premium activated successfully")))
}

// ============================================================================
// Withdrawals
// ============================================================================

/// POST /api/withdraw
pub async fn withdraw<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<WithdrawRequest>,
) -> LedgerResult<Json<MessageResponse>> {
    let use_case = RequestWithdrawalUseCase::new(state.repo.clone(), state.repo.clone());

    let input = RequestWithdrawalInput {
        method: req.method,
        address: req.address,
    };
    use_case.execute(&principal.user_id, input).await?;

    Ok(Json(MessageResponse::ok("Withdrawal request submitted")))
}

/// GET /api/withdrawals
pub async fn list_withdrawals<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> LedgerResult<Json<Vec<WithdrawalView>>> {
    let withdrawals = ListWithdrawalsUseCase::new(state.repo.clone())
        .execute(&principal.user_id)
        .await?;

    Ok(Json(withdrawals.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Admin: Settings
// ============================================================================

/// GET /api/admin/settings
pub async fn get_settings<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<Json<Settings>> {
    let settings = GetSettingsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(settings))
}

/// POST /api/admin/settings
pub async fn update_settings<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Json(patch): Json<Value>,
) -> LedgerResult<Json<UpdateSettingsResponse>> {
    let settings = UpdateSettingsUseCase::new(state.repo.clone())
        .execute(&patch)
        .await?;

    Ok(Json(UpdateSettingsResponse {
        success: true,
        settings,
    }))
}

// ============================================================================
// Admin: Withdrawals
// ============================================================================

/// GET /api/admin/withdrawals?status=&search=
pub async fn search_withdrawals<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Query(query): Query<WithdrawalQuery>,
) -> LedgerResult<Json<Vec<AdminWithdrawalView>>> {
    let listings = SearchWithdrawalsUseCase::new(state.repo.clone())
        .execute(query.status.as_deref(), query.search.as_deref())
        .await?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// PUT /api/admin/withdrawals/{id}
pub async fn review_withdrawal<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Path(withdrawal_id): Path<WithdrawalId>,
    Json(req): Json<UpdateWithdrawalRequest>,
) -> LedgerResult<Json<UpdateWithdrawalResponse>> {
    let listing = ReviewWithdrawalUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&withdrawal_id, &req.status)
        .await?;

    Ok(Json(UpdateWithdrawalResponse {
        success: true,
        withdrawal: listing.into(),
    }))
}

// ============================================================================
// Admin: Users
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<Json<Vec<AccountView>>> {
    let accounts = ManageUsersUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// PUT /api/admin/users/{id}/premium
pub async fn toggle_premium<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Path(user_id): Path<UserId>,
) -> LedgerResult<Json<UserToggleResponse>> {
    let account = ManageUsersUseCase::new(state.repo.clone())
        .toggle_premium(&user_id)
        .await?;

    Ok(Json(UserToggleResponse {
        success: true,
        user: account.into(),
    }))
}

/// PUT /api/admin/users/{id}/ban
pub async fn toggle_ban<R: LedgerStore>(
    State(state): State<LedgerAppState<R>>,
    Path(user_id): Path<UserId>,
) -> LedgerResult<Json<UserToggleResponse>> {
    let account = ManageUsersUseCase::new(state.repo.clone())
        .toggle_ban(&user_id)
        .await?;

    Ok(Json(UserToggleResponse {
        success: true,
        user: account.into(),
    }))
}
