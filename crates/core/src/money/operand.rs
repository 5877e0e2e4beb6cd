//! Right-hand operands of money addition and subtraction.

use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::Decimal;
use tally_shared::MoneyError;

use super::rational::RationalMoney;
use super::value::Money;
use crate::numeric::{ExactDecimal, Number};

/// Anything that can be added to or subtracted from money.
///
/// Money operands are checked for currency and context, rational money for
/// currency only, and raw numbers are taken as amounts of the receiver's
/// currency.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Another money value.
    Money(Money),
    /// An exact, context-free amount.
    Rational(RationalMoney),
    /// A raw number.
    Number(Number),
}

impl From<Money> for Operand {
    fn from(value: Money) -> Self {
        Self::Money(value)
    }
}

impl From<&Money> for Operand {
    fn from(value: &Money) -> Self {
        Self::Money(value.clone())
    }
}

impl From<RationalMoney> for Operand {
    fn from(value: RationalMoney) -> Self {
        Self::Rational(value)
    }
}

impl From<&RationalMoney> for Operand {
    fn from(value: &RationalMoney) -> Self {
        Self::Rational(value.clone())
    }
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl TryFrom<&str> for Operand {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse().map(Self::Number)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

from_number!(i32, i64, u32, u64, BigInt, ExactDecimal, BigRational, Decimal);
