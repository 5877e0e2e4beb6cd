//! Exact base-10 fixed-point numbers.
//!
//! An [`ExactDecimal`] is an arbitrary-precision unscaled integer plus a
//! scale: `1.50` is `(150, 2)`. Equality, ordering and hashing are numeric
//! (`1.5 == 1.50`), while `Display` keeps the scale.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use tally_shared::{MoneyError, MoneyResult};

use super::rounding::{RoundingMode, round_to_scale};

/// Returns `10^exponent`.
pub(crate) fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

/// An exact decimal number with an explicit scale.
#[derive(Clone, SerializeDisplay, DeserializeFromStr)]
pub struct ExactDecimal {
    unscaled: BigInt,
    scale: u32,
}

impl ExactDecimal {
    /// Largest scale, and largest power-of-ten shift, a parsed number may
    /// carry. `"1e-1001"` and `"1e1001"` are rejected as malformed.
    pub const MAX_PARSED_SCALE: u32 = 1_000;

    /// Creates a decimal equal to `unscaled × 10^-scale`.
    #[must_use]
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Zero at scale 0.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    /// Zero at the given scale.
    #[must_use]
    pub fn zero_at(scale: u32) -> Self {
        Self::new(BigInt::zero(), scale)
    }

    /// The digits of the number, ignoring the decimal point.
    #[must_use]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Number of digits after the decimal point.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i32 {
        match self.unscaled.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// True for zero at any scale.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// True if strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.unscaled.is_positive()
    }

    /// True if strictly less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Absolute value, same scale.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    /// Negation, same scale.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new(-&self.unscaled, self.scale)
    }

    /// The exact rational value of this decimal.
    #[must_use]
    pub fn to_rational(&self) -> BigRational {
        BigRational::new(self.unscaled.clone(), pow10(self.scale))
    }

    /// Converts a rational into a decimal at its minimal exact scale.
    ///
    /// Returns `None` if the rational has no terminating decimal expansion
    /// (its reduced denominator has a prime factor other than 2 and 5).
    #[must_use]
    pub fn from_rational(value: &BigRational) -> Option<Self> {
        let value = value.reduced();
        let two = BigInt::from(2u8);
        let five = BigInt::from(5u8);

        let mut rest = value.denom().abs();
        let mut twos = 0u32;
        let mut fives = 0u32;
        while rest.is_multiple_of(&two) {
            rest /= &two;
            twos += 1;
        }
        while rest.is_multiple_of(&five) {
            rest /= &five;
            fives += 1;
        }
        if rest != BigInt::from(1u8) {
            return None;
        }

        let scale = twos.max(fives);
        let unscaled = value.numer() * pow10(scale) / value.denom();
        Some(Self::new(unscaled, scale))
    }

    /// Returns this number at `scale`, rounding with `mode` if digits are lost.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if digits would be discarded
    /// under `RoundingMode::Unnecessary`.
    pub fn with_scale(&self, scale: u32, mode: RoundingMode) -> MoneyResult<Self> {
        if scale >= self.scale {
            Ok(self.upscaled(scale))
        } else {
            round_to_scale(&self.to_rational(), scale, mode)
        }
    }

    /// Same value at a scale at least as large as the current one.
    pub(crate) fn upscaled(&self, scale: u32) -> Self {
        debug_assert!(scale >= self.scale);
        Self::new(self.unscaled_at(scale), scale)
    }

    fn unscaled_at(&self, scale: u32) -> BigInt {
        if scale == self.scale {
            self.unscaled.clone()
        } else {
            &self.unscaled * pow10(scale - self.scale)
        }
    }

    /// Moves the decimal point `places` digits to the right.
    ///
    /// The scale shrinks by `places`; once it reaches zero the unscaled value
    /// is multiplied instead.
    #[must_use]
    pub fn move_point_right(&self, places: u32) -> Self {
        if places <= self.scale {
            Self::new(self.unscaled.clone(), self.scale - places)
        } else {
            Self::new(&self.unscaled * pow10(places - self.scale), 0)
        }
    }

    /// Same value at the smallest scale that represents it.
    #[must_use]
    pub fn strip_trailing_zeros(&self) -> Self {
        if self.unscaled.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u8);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > 0 {
            let (quotient, remainder) = unscaled.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            unscaled = quotient;
            scale -= 1;
        }
        Self::new(unscaled, scale)
    }
}

impl PartialEq for ExactDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExactDecimal {}

impl PartialOrd for ExactDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.unscaled.cmp(&other.unscaled);
        }
        let scale = self.scale.max(other.scale);
        self.unscaled_at(scale).cmp(&other.unscaled_at(scale))
    }
}

impl Hash for ExactDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canonical = self.strip_trailing_zeros();
        canonical.unscaled.hash(state);
        canonical.scale.hash(state);
    }
}

impl fmt::Debug for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExactDecimal({self})")
    }
}

impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let scale = self.scale as usize;
        if self.unscaled.is_negative() {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (integral, fractional) = digits.split_at(digits.len() - scale);
            write!(f, "{integral}.{fractional}")
        } else {
            write!(f, "0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}

impl FromStr for ExactDecimal {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MoneyError::MalformedNumber(s.to_string());

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(index) => (&body[..index], Some(&body[index + 1..])),
            None => (body, None),
        };
        let (integral, fractional) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integral.is_empty() && fractional.is_empty())
            || !all_digits(integral)
            || !all_digits(fractional)
        {
            return Err(malformed());
        }

        let mut unscaled: BigInt = format!("{integral}{fractional}")
            .parse()
            .map_err(|_| malformed())?;
        let mut scale = i64::try_from(fractional.len()).map_err(|_| malformed())?;
        if let Some(exponent) = exponent {
            let exponent: i64 = exponent.parse().map_err(|_| malformed())?;
            scale = scale.checked_sub(exponent).ok_or_else(malformed)?;
        }
        let limit = i64::from(Self::MAX_PARSED_SCALE);
        if !(-limit..=limit).contains(&scale) {
            return Err(malformed());
        }
        if negative {
            unscaled = -unscaled;
        }

        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| malformed())?;
            Ok(Self::new(unscaled, scale))
        } else {
            let shift = u32::try_from(-scale).map_err(|_| malformed())?;
            Ok(Self::new(unscaled * pow10(shift), 0))
        }
    }
}

impl TryFrom<&str> for ExactDecimal {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ExactDecimal {
                fn from(value: $t) -> Self {
                    Self::new(value, 0)
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for ExactDecimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<Decimal> for ExactDecimal {
    fn from(value: Decimal) -> Self {
        Self::new(value.mantissa(), value.scale())
    }
}

impl TryFrom<&ExactDecimal> for Decimal {
    type Error = MoneyError;

    fn try_from(value: &ExactDecimal) -> Result<Self, Self::Error> {
        let convert = |value: &ExactDecimal| {
            i128::try_from(value.unscaled())
                .ok()
                .and_then(|mantissa| Decimal::try_from_i128_with_scale(mantissa, value.scale()).ok())
        };
        convert(value)
            .or_else(|| convert(&value.strip_trailing_zeros()))
            .ok_or(MoneyError::NumberOutOfRange)
    }
}

impl Add for &ExactDecimal {
    type Output = ExactDecimal;

    fn add(self, rhs: Self) -> ExactDecimal {
        let scale = self.scale.max(rhs.scale);
        ExactDecimal::new(self.unscaled_at(scale) + rhs.unscaled_at(scale), scale)
    }
}

impl Sub for &ExactDecimal {
    type Output = ExactDecimal;

    fn sub(self, rhs: Self) -> ExactDecimal {
        let scale = self.scale.max(rhs.scale);
        ExactDecimal::new(self.unscaled_at(scale) - rhs.unscaled_at(scale), scale)
    }
}

impl Mul for &ExactDecimal {
    type Output = ExactDecimal;

    fn mul(self, rhs: Self) -> ExactDecimal {
        ExactDecimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

impl Add for ExactDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for ExactDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul for ExactDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Neg for ExactDecimal {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl Neg for &ExactDecimal {
    type Output = ExactDecimal;

    fn neg(self) -> ExactDecimal {
        self.negated()
    }
}
