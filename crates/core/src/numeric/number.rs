//! Raw-number operand: an exact decimal or an exact rational.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use tally_shared::{MoneyError, MoneyResult};

use super::decimal::ExactDecimal;

/// An exact number accepted by money operations.
///
/// Decimals keep their scale through `+ - ×`, which lets the `Exact` context
/// keep the natural scale of a result. Anything involving a rational, and
/// every division, produces a rational.
#[derive(Debug, Clone)]
pub enum Number {
    /// A base-10 fixed-point number.
    Decimal(ExactDecimal),
    /// A fraction.
    Rational(BigRational),
}

impl Number {
    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::Decimal(ExactDecimal::zero())
    }

    /// The exact rational value.
    #[must_use]
    pub fn to_rational(&self) -> BigRational {
        match self {
            Self::Decimal(decimal) => decimal.to_rational(),
            Self::Rational(rational) => rational.clone(),
        }
    }

    /// True for zero in either representation.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Decimal(decimal) => decimal.is_zero(),
            Self::Rational(rational) => rational.is_zero(),
        }
    }

    /// True if strictly less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Decimal(decimal) => decimal.is_negative(),
            Self::Rational(rational) => rational.is_negative(),
        }
    }

    /// Returns the value as an integer, if it is one.
    #[must_use]
    pub fn to_integer(&self) -> Option<BigInt> {
        let rational = self.to_rational();
        rational.is_integer().then(|| rational.to_integer())
    }

    /// Exact sum.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a + b),
            _ => Self::Rational(self.to_rational() + other.to_rational()),
        }
    }

    /// Exact difference.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a - b),
            _ => Self::Rational(self.to_rational() - other.to_rational()),
        }
    }

    /// Exact product.
    #[must_use]
    pub fn times(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a * b),
            _ => Self::Rational(self.to_rational() * other.to_rational()),
        }
    }

    /// Exact quotient, always rational.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` if `other` is zero.
    pub fn divided_by(&self, other: &Self) -> MoneyResult<Self> {
        if other.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::Rational(self.to_rational() / other.to_rational()))
    }

    /// Negation.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            Self::Decimal(decimal) => Self::Decimal(decimal.negated()),
            Self::Rational(rational) => Self::Rational(-rational),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(b),
            _ => self.to_rational().cmp(&other.to_rational()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(decimal) => decimal.fmt(f),
            Self::Rational(rational) => rational.fmt(f),
        }
    }
}

impl FromStr for Number {
    type Err = MoneyError;

    /// Parses a decimal (`"1.50"`, `"-2e3"`) or a fraction of two decimals
    /// (`"3/7"`, `"1.5/2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((numerator, denominator)) = s.split_once('/') else {
            return s.parse().map(Self::Decimal);
        };
        let malformed = || MoneyError::MalformedNumber(s.to_string());
        let numerator: ExactDecimal = numerator.parse().map_err(|_| malformed())?;
        let denominator: ExactDecimal = denominator.parse().map_err(|_| malformed())?;
        if denominator.is_zero() {
            return Err(malformed());
        }
        Ok(Self::Rational(
            numerator.to_rational() / denominator.to_rational(),
        ))
    }
}

impl TryFrom<&str> for Number {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Number {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&String> for Number {
    type Error = MoneyError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self::Decimal(ExactDecimal::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Decimal(ExactDecimal::from(value))
    }
}

impl From<ExactDecimal> for Number {
    fn from(value: ExactDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&ExactDecimal> for Number {
    fn from(value: &ExactDecimal) -> Self {
        Self::Decimal(value.clone())
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        Self::Rational(value)
    }
}

impl From<&BigRational> for Number {
    fn from(value: &BigRational) -> Self {
        Self::Rational(value.clone())
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self::Decimal(ExactDecimal::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn n(s: &str) -> Number {
        s.parse().unwrap()
    }

    #[test]
    fn test_parses_decimals_and_fractions() {
        assert!(matches!(n("1.50"), Number::Decimal(_)));
        assert!(matches!(n("3/7"), Number::Rational(_)));
        assert_eq!(n("1.5/3"), n("1/2"));
        assert_eq!(n("-6/4").to_string(), "-3/2");
        assert_eq!(n("4/2").to_string(), "2");
    }

    #[rstest]
    #[case("1/0")]
    #[case("/2")]
    #[case("1/")]
    #[case("1/2/3")]
    #[case("x/2")]
    #[case("1..2")]
    fn test_rejects_malformed_input(#[case] input: &str) {
        assert_eq!(
            input.parse::<Number>(),
            Err(MoneyError::MalformedNumber(input.to_string()))
        );
    }

    #[test]
    fn test_decimal_arithmetic_keeps_scale() {
        let sum = n("1.50").plus(&n("2"));
        assert!(matches!(&sum, Number::Decimal(d) if d.scale() == 2));
        assert_eq!(sum.to_string(), "3.50");

        let product = n("1.5").times(&n("1.25"));
        assert_eq!(product.to_string(), "1.875");
    }

    #[test]
    fn test_rational_operands_make_rational_results() {
        let sum = n("1.5").plus(&n("1/3"));
        assert_eq!(sum, n("11/6"));
        assert!(matches!(sum, Number::Rational(_)));
        assert_eq!(n("1").minus(&n("1/4")), n("0.75"));
    }

    #[test]
    fn test_division_is_exact_and_rational() {
        assert_eq!(n("1").divided_by(&n("3")).unwrap(), n("1/3"));
        assert_eq!(
            n("1").divided_by(&n("0.00")),
            Err(MoneyError::DivisionByZero)
        );
    }

    #[test]
    fn test_equality_and_ordering_cross_representations() {
        assert_eq!(n("0.5"), n("1/2"));
        assert!(n("1/3") < n("0.34"));
        assert!(n("-1/3") > n("-0.34"));
    }

    #[test]
    fn test_integer_detection() {
        assert_eq!(n("4.00").to_integer(), Some(BigInt::from(4)));
        assert_eq!(n("8/2").to_integer(), Some(BigInt::from(4)));
        assert_eq!(n("4.5").to_integer(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Number::from(7u32), n("7"));
        assert_eq!(Number::from(dec!(1.25)), n("5/4"));
        assert_eq!(Number::try_from("2.5").unwrap(), n("5/2"));
        assert!(Number::zero().is_zero());
        assert!(n("-1/2").is_negative());
        assert_eq!(n("1/2").negated(), n("-0.5"));
    }
}
