//! Currency codes and the strongly-typed transfer request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

use super::Amount;

/// Maximum length of a currency code ("YUAN" is 4, ISO codes are 3)
const MAX_CODE_LEN: usize = 8;

/// A currency code such as `USD` or `YUAN`.
///
/// Codes are normalised to upper case. Whether a code is actually part of the
/// ledger's closed set is decided by the rate table, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(pub(crate) String);

impl CurrencyCode {
    /// Parse and normalise a currency code.
    ///
    /// # Errors
    /// `LedgerError::UnknownCurrency` if the code is empty, too long or not ASCII alphanumeric.
    pub fn new(code: &str) -> Result<Self, LedgerError> {
        let code = code.trim();
        let well_formed = !code.is_empty()
            && code.len() <= MAX_CODE_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric());

        if !well_formed {
            return Err(LedgerError::UnknownCurrency(code.to_string()));
        }

        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A validated request to move `amount` denominated in `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: CurrencyCode,
    pub amount: Amount,
}

impl Money {
    pub fn new(currency: CurrencyCode, amount: Amount) -> Self {
        Self { currency, amount }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
