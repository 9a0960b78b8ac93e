//! Account
//!
//! An account is a user name plus one balance per currency of the rate table.
//! Holdings keep the table's declaration order so that scans over them are stable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::currency::CurrencyConverter;
use crate::domain::{Amount, Balance, CurrencyCode};
use crate::error::{LedgerError, LedgerResult};

/// One currency's balance inside a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub currency: CurrencyCode,
    pub balance: Balance,
}

/// Per-currency balances of one account, in rate table order.
///
/// Serialises as an ordered JSON object of normalised decimal strings:
/// `{"USD": "10", "NGN": "0", ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    holdings: Vec<Holding>,
}

impl BalanceRecord {
    /// A record holding zero of every listed currency
    pub fn zeroed<'a>(currencies: impl IntoIterator<Item = &'a CurrencyCode>) -> Self {
        Self {
            holdings: currencies
                .into_iter()
                .map(|currency| Holding {
                    currency: currency.clone(),
                    balance: Balance::zero(),
                })
                .collect(),
        }
    }

    pub fn get(&self, currency: &CurrencyCode) -> LedgerResult<Balance> {
        self.holdings
            .iter()
            .find(|h| &h.currency == currency)
            .map(|h| h.balance)
            .ok_or_else(|| LedgerError::UnknownCurrency(currency.to_string()))
    }

    pub fn set(&mut self, currency: &CurrencyCode, balance: Balance) -> LedgerResult<()> {
        let holding = self
            .holdings
            .iter_mut()
            .find(|h| &h.currency == currency)
            .ok_or_else(|| LedgerError::UnknownCurrency(currency.to_string()))?;
        holding.balance = balance;
        Ok(())
    }

    /// Raw value of one currency, zero when the currency is not held
    pub fn amount_of(&self, currency: &str) -> Decimal {
        self.holdings
            .iter()
            .find(|h| h.currency.as_str() == currency)
            .map(|h| h.balance.value())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.iter()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of every holding converted into the reference unit
    pub fn total_in_reference_unit(&self, converter: &CurrencyConverter) -> LedgerResult<Decimal> {
        self.holdings.iter().try_fold(Decimal::ZERO, |total, h| {
            if h.balance.is_zero() {
                return Ok(total);
            }
            Ok(total + converter.to_reference(h.balance.value(), &h.currency)?)
        })
    }
}

impl Serialize for BalanceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.holdings.len()))?;
        for holding in &self.holdings {
            map.serialize_entry(holding.currency.as_str(), &holding.balance.value().normalize())?;
        }
        map.end()
    }
}

/// A user account and its balances.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique, non-empty user name
    name: String,

    balances: BalanceRecord,

    /// When the account was created
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account holding zero of every listed currency
    pub fn create<'a>(
        name: String,
        currencies: impl IntoIterator<Item = &'a CurrencyCode>,
    ) -> Self {
        Self {
            name,
            balances: BalanceRecord::zeroed(currencies),
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balances(&self) -> &BalanceRecord {
        &self.balances
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn balance(&self, currency: &CurrencyCode) -> LedgerResult<Balance> {
        self.balances.get(currency)
    }

    /// Credit one currency, returning the new balance
    pub fn credit(&mut self, currency: &CurrencyCode, amount: &Amount) -> LedgerResult<Balance> {
        let updated = self.balances.get(currency)?.credit(amount)?;
        self.balances.set(currency, updated)?;
        Ok(updated)
    }

    /// Debit one currency only, returning the new balance.
    /// Other currencies are never drawn on here.
    pub fn debit(&mut self, currency: &CurrencyCode, amount: &Amount) -> LedgerResult<Balance> {
        let current = self.balances.get(currency)?;

        if !current.is_sufficient_for(amount) {
            return Err(LedgerError::insufficient_balance(
                self.name.clone(),
                currency.clone(),
                amount.value(),
                current.value(),
            ));
        }

        let updated = current.debit(amount)?;
        self.balances.set(currency, updated)?;
        Ok(updated)
    }

    /// Replace the whole record at once
    pub(crate) fn replace_balances(&mut self, balances: BalanceRecord) {
        self.balances = balances;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RateTable;
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::new(raw).unwrap()
    }

    fn account() -> Account {
        Account::create("A".to_string(), RateTable::standard().currencies())
    }

    #[test]
    fn test_new_account_holds_zero_of_everything() {
        let account = account();

        assert_eq!(account.name(), "A");
        assert_eq!(account.balances().len(), 4);
        assert!(account.balances().iter().all(|h| h.balance.is_zero()));
    }

    #[test]
    fn test_credit_then_debit() {
        let mut account = account();
        let usd = code("USD");

        account.credit(&usd, &Amount::new(dec!(200)).unwrap()).unwrap();
        let left = account.debit(&usd, &Amount::new(dec!(150)).unwrap()).unwrap();

        assert_eq!(left.value(), dec!(50));
    }

    #[test]
    fn test_debit_does_not_touch_other_currencies() {
        let mut account = account();
        account.credit(&code("NGN"), &Amount::new(dec!(4150)).unwrap()).unwrap();

        let result = account.debit(&code("USD"), &Amount::new(dec!(1)).unwrap());

        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(account.balances().amount_of("NGN"), dec!(4150));
        assert_eq!(account.balances().amount_of("USD"), dec!(0));
    }

    #[test]
    fn test_exact_balance_debit() {
        let mut account = account();
        let gbp = code("GBP");
        account.credit(&gbp, &Amount::new(dec!(0.86)).unwrap()).unwrap();

        let left = account.debit(&gbp, &Amount::new(dec!(0.86)).unwrap()).unwrap();
        assert!(left.is_zero());
    }

    #[test]
    fn test_unknown_currency() {
        let mut account = account();
        let result = account.credit(&code("EUR"), &Amount::new(dec!(1)).unwrap());
        assert_eq!(result, Err(LedgerError::UnknownCurrency("EUR".to_string())));
    }

    #[test]
    fn test_total_in_reference_unit() {
        let mut account = account();
        account.credit(&code("USD"), &Amount::new(dec!(1)).unwrap()).unwrap();
        account.credit(&code("NGN"), &Amount::new(dec!(415)).unwrap()).unwrap();
        account.credit(&code("GBP"), &Amount::new(dec!(0.86)).unwrap()).unwrap();
        account.credit(&code("YUAN"), &Amount::new(dec!(6.89)).unwrap()).unwrap();

        let total = account
            .balances()
            .total_in_reference_unit(&CurrencyConverter::standard())
            .unwrap();
        assert_eq!(total, dec!(4));
    }

    #[test]
    fn test_record_serialises_in_table_order() {
        let mut account = account();
        account.credit(&code("USD"), &Amount::new(dec!(200)).unwrap()).unwrap();

        let json = serde_json::to_string(account.balances()).unwrap();
        assert_eq!(json, r#"{"USD":"200","NGN":"0","GBP":"0","YUAN":"0"}"#);
    }
}
