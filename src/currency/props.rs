//! Property-based tests for currency conversion.
//!
//! - Round trip A -> B -> A stays within the rounding bound
//! - Same-currency conversion is exact

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{CurrencyConverter, RateTable};
use crate::domain::CurrencyCode;

/// Strategy to generate positive amounts (0.00000001 to 10,000,000,000).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000_000i64).prop_map(|units| Decimal::new(units, 8))
}

/// Strategy to pick a currency of the standard table.
fn standard_currency() -> impl Strategy<Value = CurrencyCode> {
    let codes: Vec<CurrencyCode> = RateTable::standard().currencies().cloned().collect();
    prop::sample::select(codes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount and pair (A, B), converting to B and back to A lands
    /// within `epsilon * (1 + rate(A) / rate(B))` of the original.
    #[test]
    fn prop_round_trip_within_tolerance(
        amount in positive_amount(),
        a in standard_currency(),
        b in standard_currency(),
    ) {
        let converter = CurrencyConverter::standard();
        let there = converter.convert(amount, &a, &b).unwrap();
        let back = converter.convert(there, &b, &a).unwrap();

        let ratio = converter.rates().rate(&a).unwrap() / converter.rates().rate(&b).unwrap();
        let bound = converter.epsilon() * (Decimal::ONE + ratio);

        prop_assert!(
            (back - amount).abs() <= bound,
            "{} {} -> {} {} -> {} {} (bound {})",
            amount, a, there, b, back, a, bound
        );
    }

    /// *For any* amount and currency, converting to itself is exact.
    #[test]
    fn prop_same_currency_is_exact(
        amount in positive_amount(),
        a in standard_currency(),
    ) {
        let converter = CurrencyConverter::standard();
        prop_assert_eq!(converter.convert(amount, &a, &a).unwrap(), amount);
    }

    /// *For any* positive amount, the converted value is never negative.
    #[test]
    fn prop_conversion_never_negative(
        amount in positive_amount(),
        a in standard_currency(),
        b in standard_currency(),
    ) {
        let converter = CurrencyConverter::standard();
        prop_assert!(converter.convert(amount, &a, &b).unwrap() >= Decimal::ZERO);
    }
}
