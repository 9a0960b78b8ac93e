//! Engine module
//!
//! Deposits, withdrawals and internal transfers, including the waterfall
//! debit that lets an account pay in a currency it does not hold enough of.

pub mod transfer;
pub mod waterfall;

#[cfg(test)]
mod props;

pub use transfer::{TransferEngine, TransferReceipt};
pub use waterfall::{plan_debit, DebitPath, DebitPlan, Drawdown};
