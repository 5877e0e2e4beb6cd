//! Property-based tests for directional rounding.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;
use proptest::prelude::*;

use super::decimal::ExactDecimal;
use super::rounding::{RoundingMode, round_to_scale, round_to_step};

/// Fractions with a denominator that rarely terminates.
fn fraction() -> impl Strategy<Value = BigRational> {
    (-10_000_000i64..10_000_000i64, 1i64..1_000)
        .prop_map(|(numer, denom)| BigRational::new(BigInt::from(numer), BigInt::from(denom)))
}

fn scale() -> impl Strategy<Value = u32> {
    0u32..=4
}

fn directional_mode() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(RoundingMode::ALL[1..].to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// DOWN moves toward zero, UP away from it, and |DOWN| <= |UP|.
    #[test]
    fn prop_down_and_up_bracket_the_value(value in fraction(), scale in scale()) {
        let down = round_to_scale(&value, scale, RoundingMode::Down).unwrap().to_rational();
        let up = round_to_scale(&value, scale, RoundingMode::Up).unwrap().to_rational();

        prop_assert!(down.abs() <= value.abs());
        prop_assert!(up.abs() >= value.abs());
        prop_assert!(down.abs() <= up.abs());
    }

    /// FLOOR <= value <= CEILING.
    #[test]
    fn prop_floor_and_ceiling_bracket_the_value(value in fraction(), scale in scale()) {
        let floor = round_to_scale(&value, scale, RoundingMode::Floor).unwrap().to_rational();
        let ceiling = round_to_scale(&value, scale, RoundingMode::Ceiling).unwrap().to_rational();

        prop_assert!(floor <= value);
        prop_assert!(value <= ceiling);
    }

    /// Every directional mode lands within one unit of the last place.
    #[test]
    fn prop_rounding_error_is_below_one_unit(
        value in fraction(),
        scale in scale(),
        mode in directional_mode(),
    ) {
        let rounded = round_to_scale(&value, scale, mode).unwrap();
        let unit = ExactDecimal::new(1, scale).to_rational();

        prop_assert_eq!(rounded.scale(), scale);
        prop_assert!((rounded.to_rational() - &value).abs() < unit);
    }

    /// Rounding a value that is already exact at the scale is a no-op in every mode.
    #[test]
    fn prop_exact_values_are_unchanged(
        unscaled in -10_000_000i64..10_000_000i64,
        scale in scale(),
    ) {
        let value = ExactDecimal::new(unscaled, scale);
        for mode in RoundingMode::ALL {
            prop_assert_eq!(round_to_scale(&value.to_rational(), scale, mode).unwrap(), value.clone());
        }
    }

    /// Step rounding always yields a multiple of the step.
    #[test]
    fn prop_step_rounding_yields_step_multiples(
        value in fraction(),
        step in 1u32..=100,
        mode in directional_mode(),
    ) {
        let rounded = round_to_step(&value, 2, step, mode).unwrap();
        prop_assert_eq!(rounded.scale(), 2);
        prop_assert_eq!(rounded.unscaled() % BigInt::from(step), BigInt::from(0));
    }
}
