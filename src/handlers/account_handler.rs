//! Account Handlers
//!
//! Opening accounts and reading their balances.

use crate::domain::OperationContext;
use crate::error::LedgerResult;
use crate::store::BalanceStore;

use super::commands::required;
use super::{BalanceCommand, BalanceResult, CreateAccountCommand, CreateAccountResult};

// =========================================================================
// CreateAccountHandler
// =========================================================================

/// Handler for account creation
pub struct CreateAccountHandler;

impl CreateAccountHandler {
    /// Execute the create account command
    pub fn execute(
        &self,
        store: &mut BalanceStore,
        command: CreateAccountCommand,
        context: &OperationContext,
    ) -> LedgerResult<CreateAccountResult> {
        let name = required(&command.name, "name")?;

        let account = store.create_account(name)?;

        tracing::info!(
            correlation_id = %context.correlation_id,
            source = context.source(),
            user = %account.name(),
            "account created"
        );

        Ok(CreateAccountResult {
            name: account.name().to_string(),
            balances: account.balances().clone(),
            created_at: account.created_at(),
        })
    }
}

// =========================================================================
// BalanceHandler
// =========================================================================

/// Handler for balance reads
pub struct BalanceHandler;

impl BalanceHandler {
    pub fn execute(
        &self,
        store: &BalanceStore,
        command: BalanceCommand,
        context: &OperationContext,
    ) -> LedgerResult<BalanceResult> {
        let user = required(&command.user, "user")?;
        let balances = store.balances(user)?;

        tracing::debug!(
            correlation_id = %context.correlation_id,
            source = context.source(),
            user,
            "balance read"
        );

        Ok(BalanceResult {
            user: user.to_string(),
            balances,
        })
    }
}
