//! Rounding modes and the directional rounding primitives.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use tally_shared::{MoneyError, MoneyResult};

use super::decimal::{ExactDecimal, pow10};

/// Direction applied when a result has more digits than the target scale.
///
/// `Unnecessary` is the "fail if inexact" sentinel and the default
/// everywhere a rounding mode is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Fail with `RoundingRequired` instead of rounding.
    #[default]
    Unnecessary,
    /// Away from zero.
    Up,
    /// Toward zero (truncate).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Nearest neighbor, ties away from zero.
    HalfUp,
    /// Nearest neighbor, ties toward zero.
    HalfDown,
    /// Nearest neighbor, ties to the even neighbor (banker's rounding).
    HalfEven,
    /// Nearest neighbor, ties toward positive infinity.
    HalfCeiling,
    /// Nearest neighbor, ties toward negative infinity.
    HalfFloor,
}

impl RoundingMode {
    /// Every rounding mode.
    pub const ALL: [Self; 10] = [
        Self::Unnecessary,
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::HalfCeiling,
        Self::HalfFloor,
    ];

    /// Snake-case name, as accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unnecessary => "unnecessary",
            Self::Up => "up",
            Self::Down => "down",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
            Self::HalfUp => "half_up",
            Self::HalfDown => "half_down",
            Self::HalfEven => "half_even",
            Self::HalfCeiling => "half_ceiling",
            Self::HalfFloor => "half_floor",
        }
    }

    /// Whether a truncated quotient must move one unit away from zero.
    ///
    /// `remainder` is the non-zero truncation remainder and `divisor` the
    /// positive divisor it is measured against.
    fn rounds_away(
        self,
        quotient: &BigInt,
        remainder: &BigInt,
        divisor: &BigInt,
        negative: bool,
    ) -> MoneyResult<bool> {
        let away = match self {
            Self::Unnecessary => return Err(MoneyError::RoundingRequired),
            Self::Up => true,
            Self::Down => false,
            Self::Ceiling => !negative,
            Self::Floor => negative,
            Self::HalfUp | Self::HalfDown | Self::HalfEven | Self::HalfCeiling | Self::HalfFloor => {
                match (remainder.abs() * 2u32).cmp(divisor) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => self.breaks_tie_away(quotient, negative),
                }
            }
        };
        Ok(away)
    }

    fn breaks_tie_away(self, quotient: &BigInt, negative: bool) -> bool {
        match self {
            Self::HalfUp => true,
            Self::HalfEven => quotient.is_odd(),
            Self::HalfCeiling => !negative,
            Self::HalfFloor => negative,
            _ => false,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = MoneyError;

    /// Accepts `half_up`, `half-up` and `HALF_UP` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| MoneyError::InvalidRoundingMode(s.to_string()))
    }
}

/// Rounds an exact rational to `scale` decimal places.
///
/// # Errors
///
/// Returns `MoneyError::RoundingRequired` if the value is not exact at
/// `scale` and `mode` is `RoundingMode::Unnecessary`.
pub fn round_to_scale(
    value: &BigRational,
    scale: u32,
    mode: RoundingMode,
) -> MoneyResult<ExactDecimal> {
    let numerator = value.numer() * pow10(scale);
    let denominator = value.denom();
    let (mut quotient, remainder) = numerator.div_rem(denominator);

    if !remainder.is_zero() {
        let negative = numerator.is_negative() != denominator.is_negative();
        if mode.rounds_away(&quotient, &remainder, &denominator.abs(), negative)? {
            if negative {
                quotient -= BigInt::one();
            } else {
                quotient += BigInt::one();
            }
        }
    }

    Ok(ExactDecimal::new(quotient, scale))
}

/// Rounds an exact rational to a multiple of `step` units of the last
/// decimal place at `scale` (`step = 5`, `scale = 2` gives multiples of 0.05).
///
/// The value is rounded once, as `value / step` at `scale`, then scaled back.
///
/// # Errors
///
/// Returns `MoneyError::RoundingRequired` if the value is not already such a
/// multiple and `mode` is `RoundingMode::Unnecessary`.
pub fn round_to_step(
    value: &BigRational,
    scale: u32,
    step: u32,
    mode: RoundingMode,
) -> MoneyResult<ExactDecimal> {
    if step == 1 {
        return round_to_scale(value, scale, mode);
    }
    let step = BigInt::from(step);
    let units = round_to_scale(&(value / BigRational::from_integer(step.clone())), scale, mode)?;
    Ok(ExactDecimal::new(units.unscaled() * &step, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rational(s: &str) -> BigRational {
        s.parse::<ExactDecimal>().unwrap().to_rational()
    }

    fn round(s: &str, scale: u32, mode: RoundingMode) -> String {
        round_to_scale(&rational(s), scale, mode).unwrap().to_string()
    }

    #[rstest]
    //          value    Up      Down    Ceiling Floor   HalfUp  HalfDown HalfEven HalfCeil HalfFloor
    #[case("5.5",    ["6", "5", "6", "5", "6", "5", "6", "6", "5"])]
    #[case("2.5",    ["3", "2", "3", "2", "3", "2", "2", "3", "2"])]
    #[case("1.6",    ["2", "1", "2", "1", "2", "2", "2", "2", "2"])]
    #[case("1.1",    ["2", "1", "2", "1", "1", "1", "1", "1", "1"])]
    #[case("1.0",    ["1", "1", "1", "1", "1", "1", "1", "1", "1"])]
    #[case("-1.0",   ["-1", "-1", "-1", "-1", "-1", "-1", "-1", "-1", "-1"])]
    #[case("-1.1",   ["-2", "-1", "-1", "-2", "-1", "-1", "-1", "-1", "-1"])]
    #[case("-1.6",   ["-2", "-1", "-1", "-2", "-2", "-2", "-2", "-2", "-2"])]
    #[case("-2.5",   ["-3", "-2", "-2", "-3", "-3", "-2", "-2", "-2", "-3"])]
    #[case("-5.5",   ["-6", "-5", "-5", "-6", "-6", "-5", "-6", "-5", "-6"])]
    fn test_rounding_table(#[case] value: &str, #[case] expected: [&str; 9]) {
        let modes = [
            RoundingMode::Up,
            RoundingMode::Down,
            RoundingMode::Ceiling,
            RoundingMode::Floor,
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
            RoundingMode::HalfCeiling,
            RoundingMode::HalfFloor,
        ];
        for (mode, expected) in modes.into_iter().zip(expected) {
            assert_eq!(round(value, 0, mode), expected, "{value} rounded {mode}");
        }
    }

    #[test]
    fn test_unnecessary_fails_only_when_inexact() {
        assert_eq!(
            round_to_scale(&rational("1.25"), 1, RoundingMode::Unnecessary),
            Err(MoneyError::RoundingRequired)
        );
        assert_eq!(round("1.20", 1, RoundingMode::Unnecessary), "1.2");
    }

    #[test]
    fn test_rounds_non_terminating_rationals() {
        let three_sevenths = BigRational::new(BigInt::from(3), BigInt::from(7));
        assert_eq!(
            round_to_scale(&three_sevenths, 2, RoundingMode::Down).unwrap().to_string(),
            "0.42"
        );
        assert_eq!(
            round_to_scale(&three_sevenths, 2, RoundingMode::Up).unwrap().to_string(),
            "0.43"
        );
        assert_eq!(
            round_to_scale(&-three_sevenths, 4, RoundingMode::HalfEven).unwrap().to_string(),
            "-0.4286"
        );
    }

    #[test]
    fn test_small_negative_values_keep_their_sign() {
        assert_eq!(round("-0.001", 2, RoundingMode::Up), "-0.01");
        assert_eq!(round("-0.001", 2, RoundingMode::Ceiling), "0.00");
        assert_eq!(round("-0.001", 2, RoundingMode::Floor), "-0.01");
    }

    #[test]
    fn test_pads_to_larger_scales() {
        assert_eq!(round("7", 3, RoundingMode::Unnecessary), "7.000");
    }

    #[rstest]
    #[case("135.50", 100, RoundingMode::Down, "135.00")]
    #[case("135.50", 100, RoundingMode::Up, "136.00")]
    #[case("135.50", 100, RoundingMode::HalfEven, "136.00")]
    #[case("1.03", 5, RoundingMode::Down, "1.00")]
    #[case("1.03", 5, RoundingMode::HalfUp, "1.05")]
    #[case("1.07", 5, RoundingMode::Floor, "1.05")]
    #[case("-1.07", 5, RoundingMode::Floor, "-1.10")]
    #[case("1.05", 5, RoundingMode::Unnecessary, "1.05")]
    fn test_step_rounding(
        #[case] value: &str,
        #[case] step: u32,
        #[case] mode: RoundingMode,
        #[case] expected: &str,
    ) {
        let rounded = round_to_step(&rational(value), 2, step, mode).unwrap();
        assert_eq!(rounded.to_string(), expected);
    }

    #[test]
    fn test_step_rounding_requires_a_mode_for_off_step_values() {
        assert_eq!(
            round_to_step(&rational("135.50"), 2, 100, RoundingMode::Unnecessary),
            Err(MoneyError::RoundingRequired)
        );
    }

    #[rstest]
    #[case("half_up", RoundingMode::HalfUp)]
    #[case("HALF_EVEN", RoundingMode::HalfEven)]
    #[case("half-down", RoundingMode::HalfDown)]
    #[case(" down ", RoundingMode::Down)]
    #[case("unnecessary", RoundingMode::Unnecessary)]
    fn test_parses_mode_names(#[case] input: &str, #[case] expected: RoundingMode) {
        assert_eq!(input.parse::<RoundingMode>().unwrap(), expected);
    }

    #[test]
    fn test_rejects_unknown_mode_names() {
        assert_eq!(
            "sideways".parse::<RoundingMode>(),
            Err(MoneyError::InvalidRoundingMode("sideways".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for mode in RoundingMode::ALL {
            assert_eq!(mode.to_string().parse::<RoundingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_unnecessary() {
        assert_eq!(RoundingMode::default(), RoundingMode::Unnecessary);
    }
}
