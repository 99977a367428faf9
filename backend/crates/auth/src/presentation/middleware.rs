//! Auth Middleware
//!
//! `require_user` resolves the bearer token and stores the caller's
//! [`Principal`] in the request extensions. `require_admin` must run after it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::principal::Principal;
use ledger::domain::repository::LedgerStore;

use crate::application::AuthenticateUseCase;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;

/// Reject requests without a valid bearer token
pub async fn require_user<R: LedgerStore>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> AuthResult<Response> {
    let bearer = platform::bearer::extract_bearer(req.headers())?;

    let principal = AuthenticateUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&bearer)
        .await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Reject callers whose role is not admin
pub async fn require_admin(req: Request, next: Next) -> AuthResult<Response> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .copied()
        .ok_or(AuthError::InvalidToken)?;

    if let Err(denied) = principal.require_admin() {
        tracing::warn!(
            user_id = %principal.user_id,
            telegram_id = principal.telegram_id,
            "Admin route denied"
        );
        return Ok(denied.into_response());
    }

    Ok(next.run(req).await)
}
