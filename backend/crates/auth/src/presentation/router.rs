//! Auth Router

use axum::{Router, middleware, routing::post};
use ledger::domain::repository::LedgerStore;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_user};

/// `POST /auth`, the only unauthenticated ledger route
pub fn auth_router<R: LedgerStore>(state: AuthAppState<R>) -> Router {
    Router::new()
        .route("/auth", post(handlers::sign_in::<R>))
        .with_state(state)
}

/// Shared state for [`auth_router`] and [`protect`]
pub fn auth_state<R: LedgerStore>(repo: R, config: AuthConfig) -> AuthAppState<R> {
    AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    }
}

/// Gate `user` routes behind a valid token and `admin` routes behind a
/// valid token plus the admin role.
pub fn protect<R: LedgerStore>(state: AuthAppState<R>, user: Router, admin: Router) -> Router {
    user.merge(admin.route_layer(middleware::from_fn(require_admin)))
        .route_layer(middleware::from_fn_with_state(state, require_user::<R>))
}
