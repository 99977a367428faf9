//! Authenticate Use Case
//!
//! Resolve a bearer token to the calling [`Principal`]. Admin access needs
//! both the stored role and a current entry in the admin list, so removing an
//! identity from the list takes effect without re-issuing tokens.

use std::sync::Arc;

use chrono::Utc;
use kernel::principal::Principal;
use ledger::domain::repository::AccountRepository;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> AuthenticateUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, bearer: &str) -> AuthResult<Principal> {
        let user_id = token::verify(&self.config, bearer, Utc::now().timestamp_millis())
            .map_err(|reason| {
                tracing::debug!(%reason, "Bearer token rejected");
                AuthError::InvalidToken
            })?;

        let account = self
            .account_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Token bound to missing account");
                AuthError::InvalidToken
            })?;

        let is_admin = account.is_admin() && self.config.is_admin_identity(account.telegram_id);

        Ok(Principal::new(account.user_id, account.telegram_id, is_admin))
    }
}
