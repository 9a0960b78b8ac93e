//! Command definitions
//!
//! Commands carry a caller's request as received, before validation. Every
//! field is optional here; handlers decide what is missing and in which order
//! it is reported.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Amount, AmountError, CurrencyCode, Money};
use crate::engine::TransferReceipt;
use crate::error::{LedgerError, LedgerResult};
use crate::store::BalanceRecord;

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to open an account with zero balances
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    pub name: Option<String>,
}

impl CreateAccountCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

// =========================================================================
// DepositCommand
// =========================================================================

/// Command to bring value into the system for a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositCommand {
    pub user: Option<String>,
    pub currency: Option<String>,
    /// Amount as text for precise decimal parsing
    pub amount: Option<String>,
}

impl DepositCommand {
    pub fn new(user: impl Into<String>, currency: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            currency: Some(currency.into()),
            amount: Some(amount.into()),
        }
    }
}

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move value between two users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferCommand {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<String>,
}

impl TransferCommand {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        currency: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            currency: Some(currency.into()),
            amount: Some(amount.into()),
        }
    }
}

// =========================================================================
// WithdrawCommand
// =========================================================================

/// Command to take value out of the system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WithdrawCommand {
    pub user: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<String>,
}

impl WithdrawCommand {
    pub fn new(user: impl Into<String>, currency: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            currency: Some(currency.into()),
            amount: Some(amount.into()),
        }
    }
}

// =========================================================================
// BalanceCommand
// =========================================================================

/// Command to read a user's balances
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceCommand {
    pub user: Option<String>,
}

impl BalanceCommand {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }
}

// =========================================================================
// LedgerCommand
// =========================================================================

/// Any command the ledger accepts
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    CreateAccount(CreateAccountCommand),
    Deposit(DepositCommand),
    Transfer(TransferCommand),
    Withdraw(WithdrawCommand),
    Balance(BalanceCommand),
}

impl LedgerCommand {
    /// Operation name as written in the `op` field
    pub fn op(&self) -> &'static str {
        match self {
            LedgerCommand::CreateAccount(_) => "create_account",
            LedgerCommand::Deposit(_) => "deposit",
            LedgerCommand::Transfer(_) => "transfer",
            LedgerCommand::Withdraw(_) => "withdraw",
            LedgerCommand::Balance(_) => "balance",
        }
    }

    /// Decode one JSON command object.
    ///
    /// ```json
    /// {"op": "transfer", "origin": "B", "destination": "A", "currency": "USD", "amount": "15"}
    /// ```
    ///
    /// Amounts may be strings or JSON numbers. Absent and `null` fields both
    /// decode as missing; whether they are required is left to the handler.
    ///
    /// # Errors
    /// - `LedgerError::InvalidType` if the text is not a JSON object or a
    ///   field has the wrong JSON type
    /// - `LedgerError::MissingField("op")` if there is no operation
    /// - `LedgerError::UnknownOperation` for an unrecognised operation
    pub fn from_json(raw: &str) -> LedgerResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|_| LedgerError::InvalidType {
            field: "command",
            expected: "JSON object",
        })?;
        let object = value.as_object().ok_or(LedgerError::InvalidType {
            field: "command",
            expected: "JSON object",
        })?;

        let op = string_field(object, "op")?.ok_or(LedgerError::MissingField("op"))?;

        match op.as_str() {
            "create_account" => Ok(LedgerCommand::CreateAccount(CreateAccountCommand {
                name: string_field(object, "name")?,
            })),
            "deposit" => Ok(LedgerCommand::Deposit(DepositCommand {
                user: string_field(object, "user")?,
                currency: string_field(object, "currency")?,
                amount: amount_field(object)?,
            })),
            "transfer" => Ok(LedgerCommand::Transfer(TransferCommand {
                origin: string_field(object, "origin")?,
                destination: string_field(object, "destination")?,
                currency: string_field(object, "currency")?,
                amount: amount_field(object)?,
            })),
            "withdraw" => Ok(LedgerCommand::Withdraw(WithdrawCommand {
                user: string_field(object, "user")?,
                currency: string_field(object, "currency")?,
                amount: amount_field(object)?,
            })),
            "balance" => Ok(LedgerCommand::Balance(BalanceCommand {
                user: string_field(object, "user")?,
            })),
            other => Err(LedgerError::UnknownOperation(other.to_string())),
        }
    }
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> LedgerResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(LedgerError::InvalidType {
            field,
            expected: "string",
        }),
    }
}

fn amount_field(object: &Map<String, Value>) -> LedgerResult<Option<String>> {
    match object.get("amount") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(LedgerError::InvalidType {
            field: "amount",
            expected: "decimal number or string",
        }),
    }
}

// =========================================================================
// Field validation shared by the handlers
// =========================================================================

/// A present, non-blank field, trimmed
pub(crate) fn required<'a>(value: &'a Option<String>, field: &'static str) -> LedgerResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(LedgerError::MissingField(field)),
    }
}

/// Turn validated amount and currency text into `Money`.
///
/// Amount problems are reported before currency problems.
pub(crate) fn parse_money(currency: &str, amount: &str) -> LedgerResult<Money> {
    let amount: Amount = amount.parse().map_err(|e| match e {
        AmountError::ParseError(_) => LedgerError::InvalidType {
            field: "amount",
            expected: "decimal number",
        },
        other => LedgerError::InvalidAmount(other),
    })?;
    let currency = CurrencyCode::new(currency)?;

    Ok(Money::new(currency, amount))
}

// =========================================================================
// Results
// =========================================================================

/// Result of a successful account creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountResult {
    pub name: String,
    pub balances: BalanceRecord,
    pub created_at: DateTime<Utc>,
}

/// Result of a deposit or a withdrawal
#[derive(Debug, Clone, Serialize)]
pub struct BalanceChangeResult {
    pub user: String,
    pub currency: CurrencyCode,
    pub amount: Decimal,
    /// Balance of `currency` after the operation
    pub balance: Decimal,
}

/// Result of a balance read
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResult {
    pub user: String,
    pub balances: BalanceRecord,
}

/// What a dispatched command produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    AccountCreated(CreateAccountResult),
    Deposited(BalanceChangeResult),
    Transferred(TransferReceipt),
    Withdrawn(BalanceChangeResult),
    Balance(BalanceResult),
}
