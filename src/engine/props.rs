//! Property-based tests for the transfer engine.
//!
//! - Value is conserved across a transfer, up to rounding
//! - The destination always receives exactly the requested amount
//! - A rejected transfer leaves both accounts untouched

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{DebitPath, TransferEngine};
use crate::currency::RateTable;
use crate::domain::{Amount, Balance, CurrencyCode, Money};
use crate::error::LedgerError;
use crate::store::BalanceStore;

/// Conservation slack in the reference unit
const CONSERVATION_TOLERANCE: Decimal = dec!(0.000001);

/// Balances from 0 to 1,000,000.00, with a bias towards empty holdings
fn holding_value() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        3 => (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Transfer amounts from 0.01 to 1,000,000.00
fn transfer_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn standard_currency() -> impl Strategy<Value = CurrencyCode> {
    let codes: Vec<CurrencyCode> = RateTable::standard().currencies().cloned().collect();
    prop::sample::select(codes)
}

/// Store with two accounts; "A" holds `holdings` in table order, "B" is empty
fn funded_store(engine: &TransferEngine, holdings: &[Decimal]) -> BalanceStore {
    let mut store = BalanceStore::new(engine.converter().rates());
    store.create_account("A").unwrap();
    store.create_account("B").unwrap();

    let currencies: Vec<CurrencyCode> = store.currencies().to_vec();
    for (currency, value) in currencies.iter().zip(holdings) {
        store.set("A", currency, Balance::new(*value).unwrap()).unwrap();
    }
    store
}

fn total(engine: &TransferEngine, store: &BalanceStore, user: &str) -> Decimal {
    store.total_in_reference_unit(user, engine.converter()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// *For any* funded origin and request, a transfer either succeeds and
    /// conserves value, or fails with InsufficientBalance and changes nothing.
    #[test]
    fn prop_transfer_conserves_value_or_rejects_cleanly(
        holdings in prop::collection::vec(holding_value(), 4),
        currency in standard_currency(),
        amount in transfer_amount(),
    ) {
        let engine = TransferEngine::default();
        let mut store = funded_store(&engine, &holdings);
        let money = Money::new(currency.clone(), Amount::new(amount).unwrap());

        let before_a = store.balances("A").unwrap();
        let before_total = total(&engine, &store, "A") + total(&engine, &store, "B");

        match engine.internal_transfer(&mut store, "A", "B", &money) {
            Ok(_) => {
                let after_total = total(&engine, &store, "A") + total(&engine, &store, "B");
                prop_assert!(
                    (after_total - before_total).abs() <= CONSERVATION_TOLERANCE,
                    "value drifted: {} -> {}", before_total, after_total
                );
                prop_assert_eq!(store.get("B", &currency).unwrap().value(), amount);
                prop_assert!(store
                    .balances("A")
                    .unwrap()
                    .iter()
                    .all(|h| h.balance.value() >= Decimal::ZERO));
            }
            Err(LedgerError::InsufficientBalance { .. }) => {
                prop_assert_eq!(store.balances("A").unwrap(), before_a);
                prop_assert!(store.balances("B").unwrap().iter().all(|h| h.balance.is_zero()));
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// *For any* request strictly below the balance of its own currency,
    /// only that currency moves.
    #[test]
    fn prop_fast_path_touches_one_currency(
        holdings in prop::collection::vec(holding_value(), 4),
        currency in standard_currency(),
        amount in transfer_amount(),
    ) {
        let engine = TransferEngine::default();
        let mut store = funded_store(&engine, &holdings);
        let held = store.get("A", &currency).unwrap().value();
        prop_assume!(held > amount);

        let before = store.balances("A").unwrap();
        let money = Money::new(currency.clone(), Amount::new(amount).unwrap());
        let receipt = engine.internal_transfer(&mut store, "A", "B", &money).unwrap();

        prop_assert_eq!(receipt.path, DebitPath::Direct);
        for holding in store.balances("A").unwrap().iter() {
            let expected = if holding.currency == currency {
                held - amount
            } else {
                before.get(&holding.currency).unwrap().value()
            };
            prop_assert_eq!(holding.balance.value(), expected);
        }
    }
}
