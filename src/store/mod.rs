//! Store module
//!
//! Accounts and their per-currency balance records.

pub mod account;
pub mod balance_store;

pub use account::{Account, BalanceRecord, Holding};
pub use balance_store::BalanceStore;
