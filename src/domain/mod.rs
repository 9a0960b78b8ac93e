//! Domain module
//!
//! Core domain types: validated amounts, balances, currency codes.

pub mod amount;
pub mod context;
pub mod currency;

pub use amount::{Amount, AmountError, Balance};
pub use context::OperationContext;
pub use currency::{CurrencyCode, Money};
