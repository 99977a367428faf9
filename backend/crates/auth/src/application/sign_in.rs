//! Sign In Use Case
//!
//! Create-or-fetch the account for a Telegram identity and issue a bearer
//! token bound to its storage id.

use std::sync::Arc;

use chrono::Utc;
use ledger::application::RegisterAccountUseCase;
use ledger::domain::entity::user_account::{NewAccount, UserAccount};
use ledger::domain::repository::{AccountRepository, SettingsRepository};

use crate::application::config::AuthConfig;
use crate::application::token::{self, IssuedToken};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub referred_by: Option<i64>,
}

pub struct SignInOutput {
    pub token: IssuedToken,
    pub account: UserAccount,
    pub created: bool,
}

pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    account_repo: Arc<A>,
    settings_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> SignInUseCase<A, S>
where
    A: AccountRepository,
    S: SettingsRepository,
{
    pub fn new(account_repo: Arc<A>, settings_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            settings_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.telegram_id <= 0 {
            return Err(AuthError::InvalidIdentity);
        }

        let grant_admin = self.config.is_admin_identity(input.telegram_id);
        let new_account = NewAccount {
            telegram_id: input.telegram_id,
            username: non_blank(input.username),
            first_name: non_blank(input.first_name),
            last_name: non_blank(input.last_name),
            referred_by: input.referred_by,
        };

        let registration =
            RegisterAccountUseCase::new(self.account_repo.clone(), self.settings_repo.clone())
                .execute(new_account, grant_admin)
                .await?;

        let token = token::issue(
            &self.config,
            &registration.account.user_id,
            Utc::now().timestamp_millis(),
        );

        tracing::info!(
            user_id = %registration.account.user_id,
            telegram_id = registration.account.telegram_id,
            created = registration.created,
            "User signed in"
        );

        Ok(SignInOutput {
            token,
            account: registration.account,
            created: registration.created,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
