//! Withdrawal Review Use Cases (admin)

use std::sync::Arc;

use kernel::id::WithdrawalId;

use crate::domain::entity::withdrawal::{OwnerSummary, WithdrawalFilter, WithdrawalWithOwner};
use crate::domain::repository::{AccountRepository, WithdrawalRepository};
use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
use crate::error::LedgerResult;

pub struct SearchWithdrawalsUseCase<W>
where
    W: WithdrawalRepository,
{
    withdrawal_repo: Arc<W>,
}

impl<W> SearchWithdrawalsUseCase<W>
where
    W: WithdrawalRepository,
{
    pub fn new(withdrawal_repo: Arc<W>) -> Self {
        Self { withdrawal_repo }
    }

    /// `status` of `None`, empty or `all` lists every status; a blank
    /// `search` is ignored.
    pub async fn execute(
        &self,
        status: Option<&str>,
        search: Option<&str>,
    ) -> LedgerResult<Vec<WithdrawalWithOwner>> {
        let status = match status.map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse::<WithdrawalStatus>()?),
        };
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        self.withdrawal_repo
            .search(&WithdrawalFilter { status, search })
            .await
    }
}

pub struct ReviewWithdrawalUseCase<W, A>
where
    W: WithdrawalRepository,
    A: AccountRepository,
{
    withdrawal_repo: Arc<W>,
    account_repo: Arc<A>,
}

impl<W, A> ReviewWithdrawalUseCase<W, A>
where
    W: WithdrawalRepository,
    A: AccountRepository,
{
    pub fn new(withdrawal_repo: Arc<W>, account_repo: Arc<A>) -> Self {
        Self {
            withdrawal_repo,
            account_repo,
        }
    }

    /// Pending -> Approved | Rejected. The amount is never touched and a
    /// rejection does not refund the balance.
    pub async fn execute(
        &self,
        withdrawal_id: &WithdrawalId,
        status: &str,
    ) -> LedgerResult<WithdrawalWithOwner> {
        let target: WithdrawalStatus = status.parse()?;

        let withdrawal = self
            .withdrawal_repo
            .update_status_with(withdrawal_id, |withdrawal| {
                withdrawal.set_status(target)?;
                Ok(())
            })
            .await?;

        tracing::info!(
            withdrawal_id = %withdrawal_id,
            status = %withdrawal.status,
            amount = withdrawal.amount.value(),
            "Withdrawal reviewed"
        );

        let owner = self
            .account_repo
            .find_by_id(&withdrawal.user_id)
            .await?
            .map(|account| OwnerSummary {
                telegram_id: account.telegram_id,
                username: account.username,
                first_name: account.first_name,
            });

        Ok(WithdrawalWithOwner { withdrawal, owner })
    }
}
