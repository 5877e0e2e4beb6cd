//! Property-based tests for money operations.
//!
//! - Allocation conservation and determinism
//! - Quotient and remainder identity
//! - Context idempotence
//! - Currency mismatch guard

use std::sync::Arc;

use num_bigint::BigUint;
use proptest::prelude::*;
use tally_shared::{Currency, MoneyError};

use super::{Context, Monetary, Money};
use crate::numeric::{ExactDecimal, RoundingMode};

fn currency(code: &str, digits: u32) -> Arc<Currency> {
    Arc::new(Currency::new(code, 0, code, digits))
}

/// Strategy to generate a context that is valid for any currency.
fn context() -> impl Strategy<Value = Context> {
    prop_oneof![
        Just(Context::Default),
        Just(Context::Exact),
        (1u32..=100).prop_map(|step| Context::cash(step).unwrap()),
        (0u32..=6, 1u32..=10).prop_map(|(scale, step)| Context::precision(scale, step).unwrap()),
    ]
}

/// Strategy to generate money (-10,000,000.00 to 10,000,000.00 in some
/// currency with 0 to 3 fraction digits) in an arbitrary context.
fn any_money() -> impl Strategy<Value = Money> {
    (-1_000_000_000i64..1_000_000_000i64, 0u32..=3, context()).prop_map(
        |(unscaled, digits, context)| {
            let currency = currency("XTS", digits);
            let amount = ExactDecimal::new(unscaled, digits);
            Money::of_with(amount, &currency, context, RoundingMode::HalfEven).unwrap()
        },
    )
}

/// Strategy to generate 1 to 10 ratios with at least one non-zero value.
fn ratios() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000, 1..10)
        .prop_filter("at least one ratio must be non-zero", |ratios| {
            ratios.iter().any(|&ratio| ratio > 0)
        })
}

fn non_zero_divisor() -> impl Strategy<Value = i64> {
    prop_oneof![-1_000i64..=-1, 1i64..=1_000]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Allocated parts add up to the original money exactly.
    #[test]
    fn prop_allocation_conserves_total(money in any_money(), ratios in ratios()) {
        let parts = money.allocate(&ratios).unwrap();
        prop_assert_eq!(parts.len(), ratios.len());

        let total = Money::total(&parts[0], &parts[1..]).unwrap();
        prop_assert_eq!(total, money);
    }

    /// Allocation is deterministic and only the earliest parts receive
    /// leftover steps.
    #[test]
    fn prop_allocation_is_deterministic(money in any_money(), ratios in ratios()) {
        let first = money.allocate(&ratios).unwrap();
        let second = money.allocate(&ratios).unwrap();
        prop_assert_eq!(&first, &second);

        let total: u64 = ratios.iter().sum();
        let step = BigUint::from(money.context().step());
        let mut received_extra = true;
        for (part, &ratio) in first.iter().zip(&ratios) {
            let floor = money.multiplied_by(ratio).unwrap().quotient(total).unwrap();
            let extra = part.minus(&floor).unwrap();
            let got_extra = !extra.is_zero();
            if got_extra {
                prop_assert!(received_extra, "a later part received a step before an earlier one");
                prop_assert_eq!(extra.unscaled_amount().magnitude(), &step);
            }
            received_extra = got_extra;
        }
    }

    /// The remainder variant also conserves the total.
    #[test]
    fn prop_allocation_with_remainder_conserves_total(money in any_money(), ratios in ratios()) {
        let parts = money.allocate_with_remainder(&ratios).unwrap();
        prop_assert_eq!(parts.len(), ratios.len() + 1);

        let total = Money::total(&parts[0], &parts[1..]).unwrap();
        prop_assert_eq!(total, money);
    }

    /// quotient × divisor + remainder == original.
    #[test]
    fn prop_quotient_and_remainder_identity(money in any_money(), divisor in non_zero_divisor()) {
        let (quotient, remainder) = money.quotient_and_remainder(divisor).unwrap();
        prop_assert_eq!(&quotient, &money.quotient(divisor).unwrap());

        let rebuilt = quotient.multiplied_by(divisor).unwrap().plus(&remainder).unwrap();
        prop_assert_eq!(rebuilt, money);
    }

    /// Re-applying a money's own context changes nothing.
    #[test]
    fn prop_context_idempotence(money in any_money()) {
        let again = money.with_context(money.context(), RoundingMode::Unnecessary).unwrap();
        prop_assert_eq!(again.amount().scale(), money.amount().scale());
        prop_assert_eq!(again, money);
    }

    /// Binary operations between different currencies never coerce.
    #[test]
    fn prop_currency_mismatch_is_rejected(unscaled in -1_000_000i64..1_000_000i64) {
        let dollars = Money::of(ExactDecimal::new(unscaled, 2), &currency("USD", 2)).unwrap();
        let euros = Money::of(ExactDecimal::new(unscaled, 2), &currency("EUR", 2)).unwrap();
        let mismatch = MoneyError::currency_mismatch("USD", "EUR");

        prop_assert_eq!(dollars.plus(&euros), Err(mismatch.clone()));
        prop_assert_eq!(dollars.minus(&euros), Err(mismatch.clone()));
        prop_assert_eq!(dollars.compare_to(&euros), Err(mismatch.clone()));
        prop_assert_eq!(Money::max(&dollars, [&euros]), Err(MoneyError::currency_mismatch("EUR", "USD")));
        prop_assert_eq!(dollars.is_less_than(&euros), Err(mismatch));
    }
}
