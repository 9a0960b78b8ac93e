//! Rate table
//!
//! Fixed unit value of every currency in a single reference unit.
//! Declaration order matters: it is the order in which a waterfall debit
//! scans the other currencies of an account.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::CurrencyCode;
use crate::error::{LedgerError, LedgerResult};

/// Default table: how much of each currency one US dollar buys.
const STANDARD_RATES: [(&str, Decimal); 4] = [
    ("USD", dec!(1)),
    ("NGN", dec!(415)),
    ("GBP", dec!(0.86)),
    ("YUAN", dec!(6.89)),
];

const STANDARD_REFERENCE: &str = "USD";

/// Immutable mapping from currency code to its rate in the reference unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    reference: CurrencyCode,
    entries: Vec<(CurrencyCode, Decimal)>,
}

impl RateTable {
    /// Build a table from `(code, rate)` pairs in scan order.
    ///
    /// # Errors
    /// - `LedgerError::InvalidRate` for a zero or negative rate, or a reference rate other than 1
    /// - `LedgerError::UnknownCurrency` for a duplicate code, an empty table, or a reference
    ///   currency missing from the entries
    pub fn new(reference: CurrencyCode, entries: Vec<(CurrencyCode, Decimal)>) -> LedgerResult<Self> {
        if entries.is_empty() {
            return Err(LedgerError::UnknownCurrency(reference.to_string()));
        }

        for (index, (code, rate)) in entries.iter().enumerate() {
            if *rate <= Decimal::ZERO {
                return Err(LedgerError::InvalidRate {
                    currency: code.to_string(),
                    rate: *rate,
                });
            }
            if entries[..index].iter().any(|(seen, _)| seen == code) {
                return Err(LedgerError::UnknownCurrency(format!("{} (duplicate)", code)));
            }
        }

        let reference_rate = entries
            .iter()
            .find(|(code, _)| *code == reference)
            .map(|(_, rate)| *rate)
            .ok_or_else(|| LedgerError::UnknownCurrency(reference.to_string()))?;

        if reference_rate != Decimal::ONE {
            return Err(LedgerError::InvalidRate {
                currency: reference.to_string(),
                rate: reference_rate,
            });
        }

        Ok(Self { reference, entries })
    }

    /// The default USD/NGN/GBP/YUAN table.
    pub fn standard() -> Self {
        let entries = STANDARD_RATES
            .iter()
            .map(|(code, rate)| (CurrencyCode(code.to_string()), *rate))
            .collect();

        Self {
            reference: CurrencyCode(STANDARD_REFERENCE.to_string()),
            entries,
        }
    }

    /// Parse a `CODE=rate,CODE=rate` list, keeping the listed order.
    pub fn parse(reference: &str, list: &str) -> LedgerResult<Self> {
        let mut entries = Vec::new();

        for pair in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (code, rate) = pair
                .split_once('=')
                .ok_or_else(|| LedgerError::UnknownCurrency(pair.to_string()))?;
            let code = CurrencyCode::new(code)?;
            let rate: Decimal = rate.trim().parse().map_err(|_| LedgerError::InvalidRate {
                currency: code.to_string(),
                rate: Decimal::ZERO,
            })?;
            entries.push((code, rate));
        }

        Self::new(CurrencyCode::new(reference)?, entries)
    }

    /// Rate of `code` in the reference unit.
    pub fn rate(&self, code: &CurrencyCode) -> LedgerResult<Decimal> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == code)
            .map(|(_, rate)| *rate)
            .ok_or_else(|| LedgerError::UnknownCurrency(code.to_string()))
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.entries.iter().any(|(candidate, _)| candidate == code)
    }

    pub fn reference(&self) -> &CurrencyCode {
        &self.reference
    }

    /// Currency codes in declaration order.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::new(raw).unwrap()
    }

    #[test]
    fn test_standard_table() {
        let table = RateTable::standard();

        assert_eq!(table.reference(), &code("USD"));
        assert_eq!(table.rate(&code("NGN")).unwrap(), dec!(415));
        assert_eq!(table.rate(&code("GBP")).unwrap(), dec!(0.86));
        assert_eq!(table.rate(&code("YUAN")).unwrap(), dec!(6.89));

        let order: Vec<&str> = table.currencies().map(CurrencyCode::as_str).collect();
        assert_eq!(order, vec!["USD", "NGN", "GBP", "YUAN"]);
    }

    #[test]
    fn test_standard_table_passes_validation() {
        let standard = RateTable::standard();
        let rebuilt = RateTable::new(
            standard.reference().clone(),
            standard.entries.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn test_unknown_currency() {
        let table = RateTable::standard();
        let result = table.rate(&code("EUR"));
        assert_eq!(result, Err(LedgerError::UnknownCurrency("EUR".to_string())));
        assert!(!table.contains(&code("EUR")));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = RateTable::new(
            code("USD"),
            vec![(code("USD"), dec!(1)), (code("NGN"), dec!(0))],
        );
        assert!(matches!(result, Err(LedgerError::InvalidRate { .. })));
    }

    #[test]
    fn test_reference_must_be_unit() {
        let result = RateTable::new(code("GBP"), vec![(code("GBP"), dec!(0.86))]);
        assert!(matches!(result, Err(LedgerError::InvalidRate { .. })));
    }

    #[test]
    fn test_reference_must_be_listed() {
        let result = RateTable::new(code("USD"), vec![(code("GBP"), dec!(1))]);
        assert_eq!(result, Err(LedgerError::UnknownCurrency("USD".to_string())));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = RateTable::new(
            code("USD"),
            vec![(code("USD"), dec!(1)), (code("usd"), dec!(1))],
        );
        assert!(matches!(result, Err(LedgerError::UnknownCurrency(_))));
    }

    #[test]
    fn test_parse_keeps_order() {
        let table = RateTable::parse("USD", "EUR=0.92, usd=1 ,NGN=415").unwrap();

        let order: Vec<&str> = table.currencies().map(CurrencyCode::as_str).collect();
        assert_eq!(order, vec!["EUR", "USD", "NGN"]);
        assert_eq!(table.rate(&code("EUR")).unwrap(), dec!(0.92));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RateTable::parse("USD", "USD=1,NGN").is_err());
        assert!(RateTable::parse("USD", "USD=1,NGN=lots").is_err());
        assert!(RateTable::parse("USD", "").is_err());
    }
}
