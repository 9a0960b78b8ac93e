//! Multi-currency handling: the static rate table and conversion between currencies.

pub mod converter;
pub mod rate_table;

#[cfg(test)]
mod props;

pub use converter::{CurrencyConverter, DEFAULT_DECIMAL_PLACES};
pub use rate_table::RateTable;
