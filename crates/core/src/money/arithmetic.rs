//! Money arithmetic.
//!
//! Every operation computes its result exactly and then materialises it
//! through the receiver's context, so a rounding mode only matters when the
//! exact result does not fit that context.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use tally_shared::{Currency, MoneyError, MoneyResult};

use super::context::Context;
use super::monetary::Monetary;
use super::operand::Operand;
use super::value::Money;
use crate::numeric::{ExactDecimal, Number, RoundingMode};

impl Money {
    /// Resolves an operand to a raw number in this money's currency.
    ///
    /// Money operands must also share the context.
    fn operand_number(&self, operand: Operand) -> MoneyResult<Number> {
        match operand {
            Operand::Money(money) => {
                self.check_currency(money.currency())?;
                if money.context() != self.context() {
                    return Err(MoneyError::ContextMismatch {
                        expected: self.context().to_string(),
                        actual: money.context().to_string(),
                    });
                }
                Ok(money.number())
            }
            Operand::Rational(rational) => {
                self.check_currency(rational.currency())?;
                Ok(Number::Rational(rational.amount().clone()))
            }
            Operand::Number(number) => Ok(number),
        }
    }

    fn recreate(&self, value: &Number, mode: RoundingMode) -> MoneyResult<Self> {
        Self::create(value, self.currency(), self.context(), mode)
    }

    /// Adds `that` without rounding.
    ///
    /// # Errors
    ///
    /// See [`Money::plus_rounded`].
    pub fn plus<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        self.plus_rounded(that, RoundingMode::Unnecessary)
    }

    /// Adds `that`, rounding the sum with `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` or `MoneyError::ContextMismatch`
    /// for an incompatible money operand, `MoneyError::MalformedNumber` for an
    /// invalid number string and `MoneyError::RoundingRequired` if the sum
    /// does not fit the context under `mode`.
    pub fn plus_rounded<T>(&self, that: T, mode: RoundingMode) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        let that = self.operand_number(that.try_into()?)?;
        self.recreate(&self.number().plus(&that), mode)
    }

    /// Subtracts `that` without rounding.
    ///
    /// # Errors
    ///
    /// See [`Money::minus_rounded`].
    pub fn minus<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        self.minus_rounded(that, RoundingMode::Unnecessary)
    }

    /// Subtracts `that`, rounding the difference with `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` or `MoneyError::ContextMismatch`
    /// for an incompatible money operand, `MoneyError::MalformedNumber` for an
    /// invalid number string and `MoneyError::RoundingRequired` if the
    /// difference does not fit the context under `mode`.
    pub fn minus_rounded<T>(&self, that: T, mode: RoundingMode) -> MoneyResult<Self>
    where
        T: TryInto<Operand>,
        MoneyError: From<T::Error>,
    {
        let that = self.operand_number(that.try_into()?)?;
        self.recreate(&self.number().minus(&that), mode)
    }

    /// Multiplies by a number without rounding.
    ///
    /// # Errors
    ///
    /// See [`Money::multiplied_by_rounded`].
    pub fn multiplied_by<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        self.multiplied_by_rounded(that, RoundingMode::Unnecessary)
    }

    /// Multiplies by a number, rounding the product with `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid number string and
    /// `MoneyError::RoundingRequired` if the product does not fit the context
    /// under `mode`.
    pub fn multiplied_by_rounded<T>(&self, that: T, mode: RoundingMode) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let that = that.try_into()?;
        self.recreate(&self.number().times(&that), mode)
    }

    /// Divides by a number without rounding.
    ///
    /// # Errors
    ///
    /// See [`Money::divided_by_rounded`].
    pub fn divided_by<T>(&self, that: T) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        self.divided_by_rounded(that, RoundingMode::Unnecessary)
    }

    /// Divides by a number, rounding the quotient with `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` for a zero divisor,
    /// `MoneyError::MalformedNumber` for an invalid number string and
    /// `MoneyError::RoundingRequired` if the quotient does not fit the context
    /// under `mode`.
    pub fn divided_by_rounded<T>(&self, that: T, mode: RoundingMode) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let that = that.try_into()?;
        self.recreate(&self.number().divided_by(&that)?, mode)
    }

    /// The amount as a whole number of context steps (`USD 1.05` in a
    /// `cash:5` context is 21 steps of 0.05).
    pub(crate) fn step_units(&self) -> BigInt {
        self.unscaled_amount() / BigInt::from(self.context().step())
    }

    /// Money in this currency and context worth `units` context steps.
    pub(crate) fn from_step_units(&self, units: &BigInt) -> Self {
        let unscaled = units * BigInt::from(self.context().step());
        Self::from_parts(
            ExactDecimal::new(unscaled, self.amount().scale()),
            Arc::clone(self.currency()),
            self.context(),
        )
    }

    /// Divides by an integer, truncating to a whole number of context steps.
    ///
    /// Always exact: `USD 10.00` quotient 3 is `USD 3.33`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` if `divisor` is zero.
    pub fn quotient(&self, divisor: impl Into<BigInt>) -> MoneyResult<Self> {
        let divisor = non_zero_divisor(divisor.into())?;
        Ok(self.from_step_units(&(self.step_units() / divisor)))
    }

    /// Divides by an integer, returning the truncated quotient and the
    /// remainder; `quotient × divisor + remainder` is this money exactly.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` if `divisor` is zero.
    pub fn quotient_and_remainder(&self, divisor: impl Into<BigInt>) -> MoneyResult<(Self, Self)> {
        let divisor = non_zero_divisor(divisor.into())?;
        let (quotient, remainder) = self.step_units().div_rem(&divisor);
        Ok((self.from_step_units(&quotient), self.from_step_units(&remainder)))
    }

    /// Converts into `target` at `rate`, keeping this money's context.
    ///
    /// # Errors
    ///
    /// See [`Money::converted_to_with`].
    pub fn converted_to<T>(
        &self,
        target: &Arc<Currency>,
        rate: T,
        mode: RoundingMode,
    ) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        self.converted_to_with(target, rate, self.context(), mode)
    }

    /// Converts into `target` at `rate` (target units per unit of this
    /// currency), materialising the result in `context`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid rate string and
    /// `MoneyError::RoundingRequired` if the converted amount does not fit
    /// `context` under `mode`.
    pub fn converted_to_with<T>(
        &self,
        target: &Arc<Currency>,
        rate: T,
        context: Context,
        mode: RoundingMode,
    ) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let rate = rate.try_into()?;
        Self::create(&self.number().times(&rate), target, context, mode)
    }

    /// Sum of the given values.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` or `MoneyError::ContextMismatch`
    /// if any value differs from `first` in currency or context.
    pub fn total<'a>(
        first: &'a Self,
        rest: impl IntoIterator<Item = &'a Self>,
    ) -> MoneyResult<Self> {
        rest.into_iter()
            .try_fold(first.clone(), |total, money| total.plus(money))
    }
}

fn non_zero_divisor(divisor: BigInt) -> MoneyResult<BigInt> {
    if divisor.is_zero() {
        Err(MoneyError::DivisionByZero)
    } else {
        Ok(divisor)
    }
}
