//! Transfer Engine
//!
//! Deposits, withdrawals and in-system transfers over a `BalanceStore`.
//!
//! Every operation validates before it mutates. Internal transfers compute
//! the new records of both parties on copies and commit them together, so a
//! rejected call never leaves a partial update behind.
//!
//! The engine assumes a single writer, which `&mut BalanceStore` enforces.
//! Sharing a store between threads would need one lock per account, taken
//! in user-name order, held across the whole of `internal_transfer`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyConverter;
use crate::domain::{Balance, CurrencyCode, Money};
use crate::error::{LedgerError, LedgerResult};
use crate::store::{BalanceRecord, BalanceStore};

use super::waterfall::{plan_debit, DebitPath, Drawdown};

/// Receipt of a completed internal transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transfer_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub currency: CurrencyCode,
    pub amount: Decimal,
    pub path: DebitPath,
    /// What the origin paid with, each in its own currency
    pub funding: Vec<Drawdown>,
    /// Rounding dust forgiven to the origin, in `currency`
    pub absorbed: Decimal,
    pub executed_at: DateTime<Utc>,
}

/// Moves value into, out of and across accounts.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    converter: CurrencyConverter,
}

impl TransferEngine {
    pub fn new(converter: CurrencyConverter) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    fn ensure_known(&self, currency: &CurrencyCode) -> LedgerResult<()> {
        self.converter.rates().rate(currency).map(|_| ())
    }

    /// Credit `money` to `user`. Returns the new balance of that currency.
    pub fn deposit(&self, store: &mut BalanceStore, user: &str, money: &Money) -> LedgerResult<Balance> {
        let account = store.account_mut(user)?;
        self.ensure_known(&money.currency)?;

        let balance = account.credit(&money.currency, &money.amount)?;
        tracing::info!(user, currency = %money.currency, amount = %money.amount, %balance, "deposit applied");

        Ok(balance)
    }

    /// Take `money` out of the system from `user`.
    ///
    /// Only the requested currency is checked and debited; holdings in other
    /// currencies are never converted for a withdrawal.
    pub fn withdraw(&self, store: &mut BalanceStore, user: &str, money: &Money) -> LedgerResult<Balance> {
        let account = store.account_mut(user)?;
        self.ensure_known(&money.currency)?;

        let balance = account.debit(&money.currency, &money.amount)?;
        tracing::info!(user, currency = %money.currency, amount = %money.amount, %balance, "withdrawal applied");

        Ok(balance)
    }

    /// Move `money` from `origin` to `destination`, converting the origin's
    /// other currencies when its balance in `money.currency` is not enough.
    ///
    /// The destination always receives exactly `money`. Self-transfers are
    /// allowed.
    ///
    /// # Errors
    /// - `LedgerError::UnknownUser` for a missing origin, then destination
    /// - `LedgerError::UnknownCurrency` if the currency is not in the rate table
    /// - `LedgerError::InsufficientBalance` if all of the origin's holdings,
    ///   in the reference unit, are worth less than the request
    /// - `LedgerError::InternalInconsistency` if the waterfall cannot cover a
    ///   request that passed the solvency check
    pub fn internal_transfer(
        &self,
        store: &mut BalanceStore,
        origin: &str,
        destination: &str,
        money: &Money,
    ) -> LedgerResult<TransferReceipt> {
        let origin_record = store.balances(origin)?;
        let destination_record = if origin == destination {
            None
        } else {
            Some(store.balances(destination)?)
        };
        self.ensure_known(&money.currency)?;

        let available = origin_record.total_in_reference_unit(&self.converter)?;
        let required = self
            .converter
            .to_reference(money.amount.value(), &money.currency)?;
        if available < required {
            tracing::debug!(origin, %available, %required, "solvency check failed");
            return Err(LedgerError::insufficient_balance(
                origin,
                self.converter.reference().clone(),
                required,
                available,
            ));
        }

        let plan = plan_debit(origin, &origin_record, money, &self.converter)?;

        let mut origin_after = plan.remaining;
        let destination_after = match destination_record {
            None => {
                credit(&mut origin_after, money)?;
                None
            }
            Some(mut record) => {
                credit(&mut record, money)?;
                Some(record)
            }
        };

        store.commit(origin, origin_after)?;
        if let Some(record) = destination_after {
            store.commit(destination, record)?;
        }

        let receipt = TransferReceipt {
            transfer_id: Uuid::new_v4(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            currency: money.currency.clone(),
            amount: money.amount.value(),
            path: plan.path,
            funding: plan.drawdowns,
            absorbed: plan.absorbed,
            executed_at: Utc::now(),
        };

        tracing::info!(
            transfer_id = %receipt.transfer_id,
            origin,
            destination,
            currency = %money.currency,
            amount = %money.amount,
            path = ?receipt.path,
            "internal transfer applied"
        );

        Ok(receipt)
    }

    /// Balance snapshot of `user`, in rate table order.
    pub fn balance(&self, store: &BalanceStore, user: &str) -> LedgerResult<BalanceRecord> {
        store.balances(user)
    }
}

fn credit(record: &mut BalanceRecord, money: &Money) -> LedgerResult<()> {
    let updated = record.get(&money.currency)?.credit(&money.amount)?;
    record.set(&money.currency, updated)
}
