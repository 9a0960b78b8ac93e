//! Command Handlers module
//!
//! Handlers validate loosely-typed commands, build the typed request and run
//! it against the engine and the store. `dispatch` routes any command to its
//! handler.

mod account_handler;
mod commands;
mod deposit_handler;
mod transfer_handler;
mod withdraw_handler;


pub use account_handler::{BalanceHandler, CreateAccountHandler};
pub use commands::*;
pub use deposit_handler::DepositHandler;
pub use transfer_handler::TransferHandler;
pub use withdraw_handler::WithdrawHandler;

use crate::domain::OperationContext;
use crate::engine::TransferEngine;
use crate::error::LedgerResult;
use crate::store::BalanceStore;

/// Run `command` and wrap its result.
///
/// Rejections are logged at `warn` with the error code, invariant failures at
/// `error`. Nothing is mutated when an error is returned.
pub fn dispatch(
    engine: &TransferEngine,
    store: &mut BalanceStore,
    command: LedgerCommand,
    context: &OperationContext,
) -> LedgerResult<CommandOutcome> {
    let op = command.op();

    let outcome = match command {
        LedgerCommand::CreateAccount(command) => CreateAccountHandler
            .execute(store, command, context)
            .map(CommandOutcome::AccountCreated),
        LedgerCommand::Deposit(command) => DepositHandler::new(engine)
            .execute(store, command, context)
            .map(CommandOutcome::Deposited),
        LedgerCommand::Transfer(command) => TransferHandler::new(engine)
            .execute(store, command, context)
            .map(CommandOutcome::Transferred),
        LedgerCommand::Withdraw(command) => WithdrawHandler::new(engine)
            .execute(store, command, context)
            .map(CommandOutcome::Withdrawn),
        LedgerCommand::Balance(command) => BalanceHandler
            .execute(store, command, context)
            .map(CommandOutcome::Balance),
    };

    if let Err(err) = &outcome {
        if err.is_client_error() {
            tracing::warn!(
                correlation_id = %context.correlation_id,
                source = context.source(),
                op,
                error_code = err.code(),
                error = %err,
                "command rejected"
            );
        } else {
            tracing::error!(
                correlation_id = %context.correlation_id,
                source = context.source(),
                op,
                error = %err,
                "command failed"
            );
        }
    }

    outcome
}
