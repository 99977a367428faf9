//! Request Withdrawal Use Case
//!
//! Moves the entire balance into a pending withdrawal.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::withdrawal::Withdrawal;
use crate::domain::repository::{SettingsRepository, WithdrawalRepository};
use crate::domain::services;
use crate::error::LedgerResult;

pub struct RequestWithdrawalInput {
    pub method: String,
    pub address: String,
}

pub struct RequestWithdrawalUseCase<W, S>
where
    W: WithdrawalRepository,
    S: SettingsRepository,
{
    withdrawal_repo: Arc<W>,
    settings_repo: Arc<S>,
}

impl<W, S> RequestWithdrawalUseCase<W, S>
where
    W: WithdrawalRepository,
    S: SettingsRepository,
{
    pub fn new(withdrawal_repo: Arc<W>, settings_repo: Arc<S>) -> Self {
        Self {
            withdrawal_repo,
            settings_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: RequestWithdrawalInput,
    ) -> LedgerResult<Withdrawal> {
        let settings = self.settings_repo.load().await?;

        let withdrawal = self
            .withdrawal_repo
            .submit(user_id, |account| {
                Ok(services::request_withdrawal(
                    account,
                    &settings,
                    &input.method,
                    &input.address,
                )?)
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            withdrawal_id = %withdrawal.withdrawal_id,
            amount = withdrawal.amount.value(),
            method = %withdrawal.method,
            "Withdrawal requested"
        );

        Ok(withdrawal)
    }
}
