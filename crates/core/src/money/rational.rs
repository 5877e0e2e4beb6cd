//! Exact, context-free money.

use std::fmt;
use std::sync::Arc;

use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use tally_shared::{Currency, MoneyError, MoneyResult};

use super::context::Context;
use super::monetary::Monetary;
use super::operand::Operand;
use super::value::Money;
use crate::numeric::{Number, RoundingMode};

/// An exact rational amount of a currency.
///
/// Carries no context and never rounds, so several operations can be chained
/// before committing to a context with [`RationalMoney::to_money`].
///
/// ```
/// use std::sync::Arc;
/// use tally_core::{Context, Currency, Money, RoundingMode};
///
/// let eur = Arc::new(Currency::new("EUR", 978, "Euro", 2));
/// let third = Money::of(10, &eur).unwrap().to_rational().divided_by(3).unwrap();
/// let money = third.multiplied_by(2).unwrap().to_money(Context::Default, RoundingMode::HalfUp).unwrap();
/// assert_eq!(money.to_string(), "EUR 6.67");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalMoney {
    amount: BigRational,
    currency: Arc<Currency>,
}

impl RationalMoney {
    /// Creates rational money from an exact fraction.
    #[must_use]
    pub fn new(amount: BigRational, currency: Arc<Currency>) -> Self {
        Self { amount, currency }
    }

    /// Creates rational money from any number.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid number string.
    pub fn of<T>(amount: T, currency: &Arc<Currency>) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        Ok(Self::new(amount.try_into()?.to_rational(), Arc::clone(currency)))
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> &BigRational {
        &self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> &Arc<Currency> {
        &self.currency
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i32 {
        if self.amount.is_zero() {
            0
        } else if self.amount.is_negative() {
            -1
        } else {
            1
        }
    }

    fn with_amount(&self, amount: BigRational) -> Self {
        Self::new(amount, Arc::clone(&self.currency))
    }

    /// Resolves an operand to an exact amount of this currency.
    fn operand_amount(&self, operand: Operand) -> MoneyResult<BigRational> {
        match operand {
            Operand::Money(money) => {
                self.check_currency(money.currency())?;
                Ok(money.amount().to_rational())
            }
            Operand::Rational(rational) => {
                self.check_currency(&rational.currency)?;
                Ok(rational.amount)
            }
            Operand::Number(number) => Ok(number.to_rational()),
        }
    }

    /// Exact sum. Money operands only need the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` for an operand in another
    /// currency and `MoneyError::MalformedNumber` for an invalid number string.
    pub fn plus<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        let that = self.operand_amount(that.try_into()?)?;
        Ok(self.with_amount(&self.amount + that))
    }

    /// Exact difference. Money operands only need the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` for an operand in another
    /// currency and `MoneyError::MalformedNumber` for an invalid number string.
    pub fn minus<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        let that = self.operand_amount(that.try_into()?)?;
        Ok(self.with_amount(&self.amount - that))
    }

    /// Exact product.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid number string.
    pub fn multiplied_by<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let that = that.try_into()?;
        Ok(self.with_amount(&self.amount * that.to_rational()))
    }

    /// Exact quotient.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` for a zero divisor and
    /// `MoneyError::MalformedNumber` for an invalid number string.
    pub fn divided_by<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let that = that.try_into()?;
        if that.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(self.with_amount(&self.amount / that.to_rational()))
    }

    /// Negation.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.with_amount(-&self.amount)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.with_amount(self.amount.abs())
    }

    /// Commits the amount to `context`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if the amount does not fit the
    /// context under `mode`.
    pub fn to_money(&self, context: Context, mode: RoundingMode) -> MoneyResult<Money> {
        Money::of_rational(self, context, mode)
    }
}

impl fmt::Display for RationalMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.code(), self.amount)
    }
}
