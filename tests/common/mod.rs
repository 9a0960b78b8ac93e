//! Common test utilities
#![allow(dead_code)]

use fx_ledger::{
    dispatch, BalanceStore, Config, LedgerCommand, LedgerResult, OperationContext, TransferEngine,
};
use rust_decimal::Decimal;
use serde_json::Value;

/// An engine and a fresh store
pub struct TestLedger {
    pub engine: TransferEngine,
    pub store: BalanceStore,
}

impl TestLedger {
    /// Ledger over the default configuration (USD/NGN/GBP/YUAN, 8 decimals)
    pub fn standard() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let engine = TransferEngine::new(config.converter());
        let store = BalanceStore::new(engine.converter().rates());
        Self { engine, store }
    }

    /// Decode and dispatch one JSON command, returning the outcome as JSON
    pub fn run(&mut self, raw: &str) -> LedgerResult<Value> {
        let command = LedgerCommand::from_json(raw)?;
        let outcome = dispatch(
            &self.engine,
            &mut self.store,
            command,
            &OperationContext::new().with_source("integration"),
        )?;
        Ok(serde_json::to_value(outcome).expect("outcomes serialize"))
    }

    /// Create `user` and deposit each `(currency, amount)` pair
    pub fn open(&mut self, user: &str, deposits: &[(&str, &str)]) {
        self.run(&format!(r#"{{"op": "create_account", "name": "{user}"}}"#))
            .expect("account created");
        for (currency, amount) in deposits {
            self.run(&format!(
                r#"{{"op": "deposit", "user": "{user}", "currency": "{currency}", "amount": "{amount}"}}"#
            ))
            .expect("deposit applied");
        }
    }

    /// One balance as a decimal
    pub fn balance(&self, user: &str, currency: &str) -> Decimal {
        self.store
            .balances(user)
            .expect("user exists")
            .amount_of(currency)
    }

    /// Sum of a user's holdings in the reference unit
    pub fn total(&self, user: &str) -> Decimal {
        self.store
            .total_in_reference_unit(user, self.engine.converter())
            .expect("user exists")
    }
}
