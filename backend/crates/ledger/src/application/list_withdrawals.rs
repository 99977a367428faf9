//! List Withdrawals Use Case (own history)

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::withdrawal::Withdrawal;
use crate::domain::repository::WithdrawalRepository;
use crate::error::LedgerResult;

pub struct ListWithdrawalsUseCase<W>
where
    W: WithdrawalRepository,
{
    withdrawal_repo: Arc<W>,
}

impl<W> ListWithdrawalsUseCase<W>
where
    W: WithdrawalRepository,
{
    pub fn new(withdrawal_repo: Arc<W>) -> Self {
        Self { withdrawal_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LedgerResult<Vec<Withdrawal>> {
        self.withdrawal_repo.list_for_user(user_id).await
    }
}
