//! The money value type: construction, accessors and conversions.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{Currency, MoneyError, MoneyResult};

use super::context::Context;
use super::format::MoneyFormatter;
use super::rational::RationalMoney;
use crate::numeric::{ExactDecimal, Number, RoundingMode};

/// An immutable amount of a currency, held in the canonical form of its
/// rounding context.
///
/// Equality is by value: same currency, same context and numerically equal
/// amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "MoneyRepr")]
pub struct Money {
    amount: ExactDecimal,
    currency: Arc<Currency>,
    context: Context,
}

impl Money {
    /// Materialises `value` through `context` and wraps the result.
    ///
    /// Every constructor and every arithmetic result goes through here.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if the value does not fit the
    /// context under `mode`.
    pub fn create(
        value: &Number,
        currency: &Arc<Currency>,
        context: Context,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let amount = context.apply(value, currency, mode)?;
        Ok(Self::from_parts(amount, Arc::clone(currency), context))
    }

    /// Wraps an amount already in the canonical form of `context`.
    pub(crate) fn from_parts(amount: ExactDecimal, currency: Arc<Currency>, context: Context) -> Self {
        Self {
            amount,
            currency,
            context,
        }
    }

    /// Creates money in the default context without rounding.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tally_core::{Currency, Money};
    ///
    /// let usd = Arc::new(Currency::new("USD", 840, "US Dollar", 2));
    /// let money = Money::of("1.5", &usd).unwrap();
    /// assert_eq!(money.to_string(), "USD 1.50");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid number string and
    /// `MoneyError::RoundingRequired` if the amount has more digits than the
    /// currency allows.
    pub fn of<T>(amount: T, currency: &Arc<Currency>) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        Self::of_with(amount, currency, Context::Default, RoundingMode::Unnecessary)
    }

    /// Creates money in `context`, rounding with `mode`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::MalformedNumber` for an invalid number string and
    /// `MoneyError::RoundingRequired` if the amount does not fit the context
    /// under `mode`.
    pub fn of_with<T>(
        amount: T,
        currency: &Arc<Currency>,
        context: Context,
        mode: RoundingMode,
    ) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        Self::create(&amount.try_into()?, currency, context, mode)
    }

    /// Creates money in the default context from a count of minor units
    /// (`1234` cents is USD 12.34).
    #[must_use]
    pub fn of_minor_units(minor: impl Into<BigInt>, currency: &Arc<Currency>) -> Self {
        let amount = ExactDecimal::new(minor, currency.default_fraction_digits());
        Self::from_parts(amount, Arc::clone(currency), Context::Default)
    }

    /// Commits a rational amount to `context`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if the amount does not fit the
    /// context under `mode`.
    pub fn of_rational(
        rational: &RationalMoney,
        context: Context,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        Self::create(
            &Number::Rational(rational.amount().clone()),
            rational.currency(),
            context,
            mode,
        )
    }

    /// Zero in the default context.
    #[must_use]
    pub fn zero(currency: &Arc<Currency>) -> Self {
        Self::zero_with(currency, Context::Default)
    }

    /// Zero in `context`.
    #[must_use]
    pub fn zero_with(currency: &Arc<Currency>, context: Context) -> Self {
        Self::from_parts(context.zero(currency), Arc::clone(currency), context)
    }

    /// The amount, at the scale of the context.
    #[must_use]
    pub const fn amount(&self) -> &ExactDecimal {
        &self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> &Arc<Currency> {
        &self.currency
    }

    /// The rounding context.
    #[must_use]
    pub const fn context(&self) -> Context {
        self.context
    }

    /// The amount as a raw-number operand.
    pub(crate) fn number(&self) -> Number {
        Number::Decimal(self.amount.clone())
    }

    /// Re-materialises this money under another context.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if the amount does not fit the
    /// new context under `mode`.
    pub fn with_context(&self, context: Context, mode: RoundingMode) -> MoneyResult<Self> {
        Self::create(&self.number(), &self.currency, context, mode)
    }

    /// The exact, context-free form of this money.
    #[must_use]
    pub fn to_rational(&self) -> RationalMoney {
        RationalMoney::new(self.amount.to_rational(), Arc::clone(&self.currency))
    }

    /// The amount in minor units of the currency (`USD 12.34` is `1234`).
    ///
    /// Keeps a fractional part when the context scale exceeds the currency's
    /// default digits.
    #[must_use]
    pub fn minor_amount(&self) -> ExactDecimal {
        self.amount
            .move_point_right(self.currency.default_fraction_digits())
    }

    /// The digits of the amount without the decimal point.
    #[must_use]
    pub fn unscaled_amount(&self) -> &BigInt {
        self.amount.unscaled()
    }

    /// The amount as a `rust_decimal::Decimal`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NumberOutOfRange` if the amount does not fit.
    pub fn to_decimal(&self) -> MoneyResult<Decimal> {
        Decimal::try_from(&self.amount)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_parts(self.amount.abs(), Arc::clone(&self.currency), self.context)
    }

    /// Negation.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::from_parts(self.amount.negated(), Arc::clone(&self.currency), self.context)
    }

    /// Formats through an external formatter, passing the amount string and
    /// the currency code untouched.
    #[must_use]
    pub fn format_with<F: MoneyFormatter + ?Sized>(&self, formatter: &F) -> String {
        formatter.format(&self.amount.to_string(), self.currency.code())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.code(), self.amount)
    }
}

/// Wire form of [`Money`]; re-validated against its context on the way in.
#[derive(Serialize, Deserialize)]
struct MoneyRepr {
    amount: ExactDecimal,
    currency: Arc<Currency>,
    #[serde(default)]
    context: Context,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Self::create(
            &Number::Decimal(repr.amount),
            &repr.currency,
            repr.context,
            RoundingMode::Unnecessary,
        )
    }
}

impl From<Money> for MoneyRepr {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount,
            currency: money.currency,
            context: money.context,
        }
    }
}
