//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use crate::currency::{CurrencyConverter, RateTable, DEFAULT_DECIMAL_PLACES};

/// Upper bound for `LEDGER_DECIMAL_PLACES`
const MAX_DECIMAL_PLACES: u32 = 18;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Rate table, in waterfall scan order
    pub rates: RateTable,

    /// Decimal places kept after a conversion
    pub decimal_places: u32,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let reference = lookup("LEDGER_REFERENCE_CURRENCY").unwrap_or_else(|| "USD".to_string());

        let rates = match lookup("LEDGER_RATES") {
            Some(list) => RateTable::parse(&reference, &list)
                .map_err(|e| ConfigError::InvalidRates(e.to_string()))?,
            None => {
                let standard = RateTable::standard();
                if standard.reference().as_str() != reference.trim().to_ascii_uppercase() {
                    // The built-in table is quoted in USD only
                    return Err(ConfigError::InvalidValue("LEDGER_REFERENCE_CURRENCY"));
                }
                standard
            }
        };

        let decimal_places = match lookup("LEDGER_DECIMAL_PLACES") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|places| *places <= MAX_DECIMAL_PLACES)
                .ok_or(ConfigError::InvalidValue("LEDGER_DECIMAL_PLACES"))?,
            None => DEFAULT_DECIMAL_PLACES,
        };

        let log_format = match lookup("LEDGER_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LEDGER_LOG_FORMAT")),
        };

        Ok(Self {
            rates,
            decimal_places,
            log_format,
        })
    }

    /// Converter over the configured table and rounding scale
    pub fn converter(&self) -> CurrencyConverter {
        CurrencyConverter::new(self.rates.clone(), self.decimal_places)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates: RateTable::standard(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            log_format: LogFormat::default(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),

    #[error("Invalid rate table in LEDGER_RATES: {0}")]
    InvalidRates(String),
}
