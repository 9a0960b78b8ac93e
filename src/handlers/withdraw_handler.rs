//! Withdraw Handler
//!
//! Takes value out of the system. Withdrawals never convert: only the
//! requested currency is checked and debited.

use crate::domain::OperationContext;
use crate::engine::TransferEngine;
use crate::error::LedgerResult;
use crate::store::BalanceStore;

use super::commands::{parse_money, required};
use super::{BalanceChangeResult, WithdrawCommand};

/// Handler for withdrawals
pub struct WithdrawHandler<'a> {
    engine: &'a TransferEngine,
}

impl<'a> WithdrawHandler<'a> {
    pub fn new(engine: &'a TransferEngine) -> Self {
        Self { engine }
    }

    /// Execute the withdraw command
    pub fn execute(
        &self,
        store: &mut BalanceStore,
        command: WithdrawCommand,
        context: &OperationContext,
    ) -> LedgerResult<BalanceChangeResult> {
        let user = required(&command.user, "user")?;
        let amount = required(&command.amount, "amount")?;
        let currency = required(&command.currency, "currency")?;
        let money = parse_money(currency, amount)?;

        let balance = self.engine.withdraw(store, user, &money)?;

        tracing::debug!(
            correlation_id = %context.correlation_id,
            source = context.source(),
            user,
            money = %money,
            "withdrawal handled"
        );

        Ok(BalanceChangeResult {
            user: user.to_string(),
            currency: money.currency,
            amount: money.amount.value(),
            balance: balance.value(),
        })
    }
}
