//! Currency conversion logic.
//!
//! Rounding strategy:
//! - Converted amounts are rounded to the converter's decimal places
//! - Banker's rounding (round half to even) to minimize cumulative errors
//! - Same-currency conversion is the identity, no rounding applied

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{AmountError, CurrencyCode};
use crate::error::{LedgerError, LedgerResult};

use super::RateTable;

/// Default number of decimal places kept after a conversion
pub const DEFAULT_DECIMAL_PLACES: u32 = 8;

/// Converts amounts between currencies of one rate table.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: RateTable,
    decimal_places: u32,
}

impl CurrencyConverter {
    pub fn new(rates: RateTable, decimal_places: u32) -> Self {
        Self {
            rates,
            decimal_places,
        }
    }

    /// Converter over the standard table with 8 decimal places.
    pub fn standard() -> Self {
        Self::new(RateTable::standard(), DEFAULT_DECIMAL_PLACES)
    }

    /// Convert `amount` from `source` into `target`.
    ///
    /// Computes `amount * rate(target) / rate(source)` and rounds the result
    /// with banker's rounding.
    ///
    /// # Errors
    /// - `LedgerError::UnknownCurrency` if either code is not in the table
    /// - `LedgerError::InvalidAmount` if the arithmetic overflows
    pub fn convert(
        &self,
        amount: Decimal,
        source: &CurrencyCode,
        target: &CurrencyCode,
    ) -> LedgerResult<Decimal> {
        let source_rate = self.rates.rate(source)?;
        let target_rate = self.rates.rate(target)?;

        if source == target {
            return Ok(amount);
        }

        let converted = amount
            .checked_mul(target_rate)
            .and_then(|scaled| scaled.checked_div(source_rate))
            .ok_or(LedgerError::InvalidAmount(AmountError::Overflow))?;

        Ok(self.round(converted))
    }

    /// Convert `amount` of `source` into the reference unit.
    pub fn to_reference(&self, amount: Decimal, source: &CurrencyCode) -> LedgerResult<Decimal> {
        self.convert(amount, source, self.rates.reference())
    }

    /// Round a value the way every conversion result is rounded.
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven)
    }

    /// Smallest representable step after rounding (`10^-decimal_places`).
    pub fn epsilon(&self) -> Decimal {
        Decimal::new(1, self.decimal_places)
    }

    /// Worst-case drift, in the reference unit, accumulated by `terms`
    /// rounded conversions into the reference unit plus `terms` rounded
    /// conversions into `currency`.
    pub fn rounding_tolerance(&self, terms: usize, currency: &CurrencyCode) -> LedgerResult<Decimal> {
        let steps = self.epsilon() * Decimal::from(terms);
        let in_currency = self.to_reference(steps, currency)?;
        Ok(steps + in_currency.max(self.epsilon()))
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn reference(&self) -> &CurrencyCode {
        self.rates.reference()
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::standard()
    }
}
