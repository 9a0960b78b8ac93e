//! Balance Store
//!
//! Owns every account of the ledger. The composing application creates one
//! store and hands it by `&mut` to the transfer engine; there is no global table.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::currency::{CurrencyConverter, RateTable};
use crate::domain::{Balance, CurrencyCode};
use crate::error::{LedgerError, LedgerResult};

use super::{Account, BalanceRecord};

/// In-memory store of accounts keyed by user name.
#[derive(Debug, Clone)]
pub struct BalanceStore {
    /// Currencies every new account starts with, in table order
    currencies: Vec<CurrencyCode>,
    accounts: HashMap<String, Account>,
}

impl BalanceStore {
    /// Create an empty store whose accounts hold every currency of `rates`
    pub fn new(rates: &RateTable) -> Self {
        Self {
            currencies: rates.currencies().cloned().collect(),
            accounts: HashMap::new(),
        }
    }

    /// Create an account with a zero balance in every currency.
    ///
    /// # Errors
    /// - `LedgerError::MissingField("name")` if the name is empty or blank
    /// - `LedgerError::DuplicateAccount` if the name is taken
    pub fn create_account(&mut self, name: &str) -> LedgerResult<&Account> {
        if name.trim().is_empty() {
            return Err(LedgerError::MissingField("name"));
        }
        if self.accounts.contains_key(name) {
            return Err(LedgerError::DuplicateAccount(name.to_string()));
        }

        let account = Account::create(name.to_string(), &self.currencies);
        tracing::debug!(user = %name, currencies = self.currencies.len(), "account created");

        Ok(self.accounts.entry(name.to_string()).or_insert(account))
    }

    pub fn contains(&self, user: &str) -> bool {
        self.accounts.contains_key(user)
    }

    pub fn account(&self, user: &str) -> LedgerResult<&Account> {
        self.accounts
            .get(user)
            .ok_or_else(|| LedgerError::UnknownUser(user.to_string()))
    }

    pub fn account_mut(&mut self, user: &str) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(user)
            .ok_or_else(|| LedgerError::UnknownUser(user.to_string()))
    }

    /// Balance of one currency of one user
    pub fn get(&self, user: &str, currency: &CurrencyCode) -> LedgerResult<Balance> {
        self.account(user)?.balance(currency)
    }

    /// Overwrite one currency of one user
    pub fn set(&mut self, user: &str, currency: &CurrencyCode, balance: Balance) -> LedgerResult<()> {
        let account = self.account_mut(user)?;
        let mut record = account.balances().clone();
        record.set(currency, balance)?;
        account.replace_balances(record);
        Ok(())
    }

    /// Sum of all of a user's holdings in the reference unit
    pub fn total_in_reference_unit(
        &self,
        user: &str,
        converter: &CurrencyConverter,
    ) -> LedgerResult<Decimal> {
        self.account(user)?.balances().total_in_reference_unit(converter)
    }

    /// Snapshot of a user's balances, in table order
    pub fn balances(&self, user: &str) -> LedgerResult<BalanceRecord> {
        Ok(self.account(user)?.balances().clone())
    }

    /// Publish a fully computed record for one user
    pub(crate) fn commit(&mut self, user: &str, record: BalanceRecord) -> LedgerResult<()> {
        self.account_mut(user)?.replace_balances(record);
        Ok(())
    }

    pub fn currencies(&self) -> &[CurrencyCode] {
        &self.currencies
    }

    /// User names, sorted
    pub fn users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.accounts.keys().map(String::as_str).collect();
        users.sort_unstable();
        users
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
