//! Ledger Routers
//!
//! Both routers expect a [`kernel::principal::Principal`] extension, so they
//! must be mounted behind the auth gate. The admin router additionally needs
//! an admin check layered on by the caller.

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::LedgerStore;
use crate::presentation::handlers::{self, LedgerAppState};

/// Routes for any signed-in user
pub fn user_router<R: LedgerStore>(repo: R) -> Router {
    let state = LedgerAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/user", get(handlers::profile::<R>))
        .route("/watch-ad", post(handlers::watch_ad::<R>))
        .route("/daily-bonus", post(handlers::daily_bonus::<R>))
        .route("/buy-premium", post(handlers::buy_premium::<R>))
        .route("/withdraw", post(handlers::withdraw::<R>))
        .route("/withdrawals", get(handlers::list_withdrawals::<R>))
        .with_state(state)
}

/// Routes under `/admin`
pub fn admin_router<R: LedgerStore>(repo: R) -> Router {
    let state = LedgerAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/admin/settings",
            get(handlers::get_settings::<R>).post(handlers::update_settings::<R>),
        )
        .route("/admin/withdrawals", get(handlers::search_withdrawals::<R>))
        .route("/admin/withdrawals/{id}", put(handlers::review_withdrawal::<R>))
        .route("/admin/users", get(handlers::list_users::<R>))
        .route("/admin/users/{id}/premium", put(handlers::toggle_premium::<R>))
        .route("/admin/users/{id}/ban", put(handlers::toggle_ban::<R>))
        .with_state(state)
}
