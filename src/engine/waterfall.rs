//! Waterfall debit
//!
//! Works out how an account pays for an amount denominated in one currency
//! when it may hold value in several. The target currency is drained first;
//! the other currencies are then drawn on, converted, in rate table order
//! until the request is covered.
//!
//! Planning is pure: it reads a record and returns the record the account
//! should end up with. Nothing is written until the caller commits the plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyConverter;
use crate::domain::{Balance, CurrencyCode, Money};
use crate::error::{LedgerError, LedgerResult};
use crate::store::BalanceRecord;

/// Which branch paid for a debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebitPath {
    /// The target currency alone covered the amount
    Direct,
    /// The target currency was drained and other currencies were drawn on
    Waterfall,
}

/// Value taken from one currency, in that currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawdown {
    pub currency: CurrencyCode,
    pub debited: Decimal,
}

/// Outcome of planning a debit
#[derive(Debug, Clone)]
pub struct DebitPlan {
    pub path: DebitPath,
    /// The debtor's record once the plan is applied
    pub remaining: BalanceRecord,
    pub drawdowns: Vec<Drawdown>,
    /// Rounding residue left uncovered and forgiven, in the target currency
    pub absorbed: Decimal,
}

/// Plan the debit of `money` from `record`.
///
/// The caller is expected to have checked solvency across all currencies
/// already; an overage that survives the scan is reported as
/// `LedgerError::InternalInconsistency`, unless it is rounding dust.
pub fn plan_debit(
    account: &str,
    record: &BalanceRecord,
    money: &Money,
    converter: &CurrencyConverter,
) -> LedgerResult<DebitPlan> {
    let target = &money.currency;
    let amount = money.amount.value();
    let held = record.get(target)?.value();
    let mut remaining = record.clone();

    // Strictly greater: an exact balance goes through the waterfall and ends at zero there
    if held > amount {
        remaining.set(target, Balance::new(held - amount)?)?;
        tracing::debug!(account, currency = %target, %amount, "direct debit");

        return Ok(DebitPlan {
            path: DebitPath::Direct,
            remaining,
            drawdowns: vec![Drawdown {
                currency: target.clone(),
                debited: amount,
            }],
            absorbed: Decimal::ZERO,
        });
    }

    remaining.set(target, Balance::zero())?;
    let mut overage = amount - held;
    let mut drawdowns = Vec::new();
    if !held.is_zero() {
        drawdowns.push(Drawdown {
            currency: target.clone(),
            debited: held,
        });
    }

    let mut scanned = Vec::new();
    for holding in record.iter().filter(|h| &h.currency != target) {
        if overage <= Decimal::ZERO {
            break;
        }
        if holding.balance.is_zero() {
            continue;
        }

        let currency = &holding.currency;
        let available = holding.balance.value();
        let converted = converter.convert(available, currency, target)?;
        scanned.push(currency.clone());

        if overage < converted {
            // Partial draw: hand the unused part back in the holding's own currency
            let leftover = converter
                .convert(converted - overage, target, currency)?
                .min(available);
            remaining.set(currency, Balance::new(leftover)?)?;
            drawdowns.push(Drawdown {
                currency: currency.clone(),
                debited: available - leftover,
            });
            tracing::debug!(account, %currency, %converted, %overage, %leftover, "waterfall partial draw");
            overage = Decimal::ZERO;
            break;
        }

        remaining.set(currency, Balance::zero())?;
        drawdowns.push(Drawdown {
            currency: currency.clone(),
            debited: available,
        });
        overage -= converted;
        tracing::debug!(account, %currency, %converted, %overage, "waterfall drained currency");
    }

    let mut absorbed = Decimal::ZERO;
    if overage > Decimal::ZERO {
        let residual = converter.to_reference(overage, target)?;
        let tolerance = converter.rounding_tolerance(record.len(), target)?;

        if residual > tolerance {
            tracing::error!(
                account,
                currency = %target,
                %amount,
                %overage,
                scanned = ?scanned,
                "waterfall ended with uncovered overage after a passed solvency check"
            );
            return Err(LedgerError::InternalInconsistency {
                account: account.to_string(),
                currency: target.clone(),
                scanned,
                residual: overage,
            });
        }

        tracing::debug!(account, currency = %target, %overage, "rounding dust absorbed");
        absorbed = overage;
    }

    Ok(DebitPlan {
        path: DebitPath::Waterfall,
        remaining,
        drawdowns,
        absorbed,
    })
}
