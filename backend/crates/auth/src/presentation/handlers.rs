//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use ledger::domain::repository::LedgerStore;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase};
use crate::error::AuthResult;
use crate::presentation::dto::{AuthRequest, AuthResponse};

/// Shared state for auth handlers and middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: LedgerStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth
pub async fn sign_in<R: LedgerStore>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<AuthRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        telegram_id: req.telegram_id,
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        referred_by: req.referred_by,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse {
        token: output.token.token,
        user: output.account.into(),
    }))
}
