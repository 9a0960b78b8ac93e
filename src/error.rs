//! Error handling module
//!
//! Centralized error types for the ledger and their serialisable form.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{AmountError, CurrencyCode};

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    // Request errors
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    // Lookup errors
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    // Business rule errors
    #[error("Insufficient balance for {user}: required {required} {currency}, available {available} {currency}")]
    InsufficientBalance {
        user: String,
        currency: CurrencyCode,
        required: Decimal,
        available: Decimal,
    },

    // Configuration errors
    #[error("Invalid rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: Decimal },

    // Invariant violations
    #[error("Internal inconsistency debiting {account}: {residual} {currency} left uncovered after scanning {scanned:?}")]
    InternalInconsistency {
        account: String,
        currency: CurrencyCode,
        scanned: Vec<CurrencyCode>,
        residual: Decimal,
    },
}

impl LedgerError {
    /// Create an insufficient balance error
    pub fn insufficient_balance(
        user: impl Into<String>,
        currency: CurrencyCode,
        required: Decimal,
        available: Decimal,
    ) -> Self {
        Self::InsufficientBalance {
            user: user.into(),
            currency,
            required,
            available,
        }
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::MissingField(_) => "missing_field",
            LedgerError::InvalidType { .. } => "invalid_type",
            LedgerError::InvalidAmount(_) => "invalid_amount",
            LedgerError::UnknownOperation(_) => "unknown_operation",
            LedgerError::UnknownUser(_) => "unknown_user",
            LedgerError::UnknownCurrency(_) => "unknown_currency",
            LedgerError::DuplicateAccount(_) => "duplicate_account",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::InvalidRate { .. } => "invalid_rate",
            LedgerError::InternalInconsistency { .. } => "internal_inconsistency",
        }
    }

    /// Check if this is a client error (caller's fault, nothing was mutated)
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::InvalidRate { .. } | Self::InternalInconsistency { .. }
        )
    }

    /// Check if this error signals a broken ledger invariant
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalInconsistency { .. })
    }
}

/// Error body printed for a rejected command
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl From<&LedgerError> for ErrorResponse {
    fn from(err: &LedgerError) -> Self {
        Self {
            error: err.to_string(),
            error_code: err.code().to_string(),
        }
    }
}
