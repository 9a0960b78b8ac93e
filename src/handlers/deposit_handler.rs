//! Deposit Handler
//!
//! Brings value into the system for one user.

use crate::domain::OperationContext;
use crate::engine::TransferEngine;
use crate::error::LedgerResult;
use crate::store::BalanceStore;

use super::commands::{parse_money, required};
use super::{BalanceChangeResult, DepositCommand};

/// Handler for deposits
pub struct DepositHandler<'a> {
    engine: &'a TransferEngine,
}

impl<'a> DepositHandler<'a> {
    pub fn new(engine: &'a TransferEngine) -> Self {
        Self { engine }
    }

    /// Execute the deposit command
    ///
    /// Missing fields are reported in the order user, amount, currency.
    pub fn execute(
        &self,
        store: &mut BalanceStore,
        command: DepositCommand,
        context: &OperationContext,
    ) -> LedgerResult<BalanceChangeResult> {
        let user = required(&command.user, "user")?;
        let amount = required(&command.amount, "amount")?;
        let currency = required(&command.currency, "currency")?;
        let money = parse_money(currency, amount)?;

        let balance = self.engine.deposit(store, user, &money)?;

        tracing::debug!(
            correlation_id = %context.correlation_id,
            source = context.source(),
            user,
            money = %money,
            "deposit handled"
        );

        Ok(BalanceChangeResult {
            user: user.to_string(),
            currency: money.currency,
            amount: money.amount.value(),
            balance: balance.value(),
        })
    }
}
