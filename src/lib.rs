//! fx_ledger Library
//!
//! Multi-currency balance ledger. Accounts hold one balance per currency of a
//! fixed rate table; a transfer the origin cannot cover in the requested
//! currency is funded from its other currencies, converted, in table order.

pub mod config;
pub mod currency;
pub mod domain;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod store;

pub use config::{Config, ConfigError, LogFormat};
pub use currency::{CurrencyConverter, RateTable};
pub use domain::{Amount, AmountError, Balance, CurrencyCode, Money, OperationContext};
pub use engine::{DebitPath, Drawdown, TransferEngine, TransferReceipt};
pub use error::{ErrorResponse, LedgerError, LedgerResult};
pub use handlers::{dispatch, CommandOutcome, LedgerCommand};
pub use store::{Account, BalanceRecord, BalanceStore};
