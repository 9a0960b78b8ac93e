//! Transfer Handler
//!
//! Validates a transfer request and hands it to the engine.

use crate::domain::OperationContext;
use crate::engine::{TransferEngine, TransferReceipt};
use crate::error::LedgerResult;
use crate::store::BalanceStore;

use super::commands::{parse_money, required};
use super::TransferCommand;

/// Handler for internal transfers
pub struct TransferHandler<'a> {
    engine: &'a TransferEngine,
}

impl<'a> TransferHandler<'a> {
    pub fn new(engine: &'a TransferEngine) -> Self {
        Self { engine }
    }

    /// Execute the transfer command
    ///
    /// Missing fields are reported in the order origin, destination, amount,
    /// currency. Transfers to oneself are allowed and convert in place.
    pub fn execute(
        &self,
        store: &mut BalanceStore,
        command: TransferCommand,
        context: &OperationContext,
    ) -> LedgerResult<TransferReceipt> {
        let origin = required(&command.origin, "origin")?;
        let destination = required(&command.destination, "destination")?;
        let amount = required(&command.amount, "amount")?;
        let currency = required(&command.currency, "currency")?;
        let money = parse_money(currency, amount)?;

        let receipt = self
            .engine
            .internal_transfer(store, origin, destination, &money)?;

        tracing::debug!(
            correlation_id = %context.correlation_id,
            source = context.source(),
            transfer_id = %receipt.transfer_id,
            drawdowns = receipt.funding.len(),
            absorbed = %receipt.absorbed,
            "transfer handled"
        );

        Ok(receipt)
    }
}
