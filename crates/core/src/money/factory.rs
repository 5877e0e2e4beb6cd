//! Money construction by currency code.

use std::sync::Arc;

use num_bigint::BigInt;
use tally_shared::config::DefaultsConfig;
use tally_shared::{Currency, CurrencyProvider, MoneyError, MoneyResult};

use super::context::Context;
use super::rational::RationalMoney;
use super::value::Money;
use crate::numeric::{Number, RoundingMode};

/// Builds money from currency codes through an explicit currency provider.
///
/// ```
/// use tally_core::{Context, CurrencyRegistry, MoneyFactory, RoundingMode};
///
/// let factory = MoneyFactory::new(CurrencyRegistry::iso());
/// assert_eq!(factory.of("1.5", "usd").unwrap().to_string(), "USD 1.50");
///
/// let cash = factory.with_context(Context::cash(5).unwrap()).with_rounding(RoundingMode::HalfUp);
/// assert_eq!(cash.of("1.03", "CHF").unwrap().to_string(), "CHF 1.05");
/// ```
#[derive(Debug, Clone)]
pub struct MoneyFactory<P> {
    provider: P,
    context: Context,
    rounding: RoundingMode,
}

impl<P: CurrencyProvider> MoneyFactory<P> {
    /// Creates a factory using the default context and no rounding.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            context: Context::Default,
            rounding: RoundingMode::Unnecessary,
        }
    }

    /// Creates a factory with the defaults named in configuration.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidContext` or
    /// `MoneyError::InvalidRoundingMode` if a configured name does not parse.
    pub fn from_config(provider: P, defaults: &DefaultsConfig) -> MoneyResult<Self> {
        Ok(Self {
            provider,
            context: defaults.context.parse()?,
            rounding: defaults.rounding.parse()?,
        })
    }

    /// Replaces the default context.
    #[must_use]
    pub fn with_context(self, context: Context) -> Self {
        Self { context, ..self }
    }

    /// Replaces the default rounding mode.
    #[must_use]
    pub fn with_rounding(self, rounding: RoundingMode) -> Self {
        Self { rounding, ..self }
    }

    /// The default context.
    #[must_use]
    pub const fn context(&self) -> Context {
        self.context
    }

    /// The default rounding mode.
    #[must_use]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// The currency provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves a currency code.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` for an unregistered code.
    pub fn currency(&self, code: &str) -> MoneyResult<Arc<Currency>> {
        self.provider.lookup(code)
    }

    /// Creates money with the factory defaults.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency`, `MoneyError::MalformedNumber`
    /// or `MoneyError::RoundingRequired`.
    pub fn of<T>(&self, amount: T, code: &str) -> MoneyResult<Money>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        self.of_with(amount, code, self.context, self.rounding)
    }

    /// Creates money with an explicit context and rounding mode.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency`, `MoneyError::MalformedNumber`
    /// or `MoneyError::RoundingRequired`.
    pub fn of_with<T>(
        &self,
        amount: T,
        code: &str,
        context: Context,
        mode: RoundingMode,
    ) -> MoneyResult<Money>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let currency = self.currency(code)?;
        Money::of_with(amount, &currency, context, mode)
    }

    /// Creates default-context money from a count of minor units.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` for an unregistered code.
    pub fn of_minor_units(&self, minor: impl Into<BigInt>, code: &str) -> MoneyResult<Money> {
        Ok(Money::of_minor_units(minor, &self.currency(code)?))
    }

    /// Zero in the factory's default context.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` for an unregistered code.
    pub fn zero(&self, code: &str) -> MoneyResult<Money> {
        Ok(Money::zero_with(&self.currency(code)?, self.context))
    }

    /// Creates exact rational money.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` or `MoneyError::MalformedNumber`.
    pub fn rational<T>(&self, amount: T, code: &str) -> MoneyResult<RationalMoney>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        RationalMoney::of(amount, &self.currency(code)?)
    }
}
