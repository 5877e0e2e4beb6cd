//! Exchange rate types and logic.

use std::fmt;
use std::sync::Arc;

use num_rational::BigRational;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};
use tally_shared::{Currency, MoneyError, MoneyResult};

use super::value::Money;
use crate::numeric::{Number, RoundingMode};

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency.
    source: Arc<Currency>,
    /// Target currency.
    target: Arc<Currency>,
    /// Exchange rate (1 source = rate target).
    rate: BigRational,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidExchangeRate` if the rate is zero or
    /// negative and `MoneyError::MalformedNumber` for an invalid rate string.
    pub fn new<T>(source: &Arc<Currency>, target: &Arc<Currency>, rate: T) -> MoneyResult<Self>
    where
        T: TryInto<Number>,
        MoneyError: From<T::Error>,
    {
        let rate = rate.try_into()?.to_rational();
        if !rate.is_positive() {
            return Err(MoneyError::InvalidExchangeRate);
        }
        Ok(Self {
            source: Arc::clone(source),
            target: Arc::clone(target),
            rate,
        })
    }

    /// The currency converted from.
    #[must_use]
    pub const fn source(&self) -> &Arc<Currency> {
        &self.source
    }

    /// The currency converted to.
    #[must_use]
    pub const fn target(&self) -> &Arc<Currency> {
        &self.target
    }

    /// Target units per source unit.
    #[must_use]
    pub const fn rate(&self) -> &BigRational {
        &self.rate
    }

    /// Returns the inverse rate, exactly.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            source: Arc::clone(&self.target),
            target: Arc::clone(&self.source),
            rate: BigRational::one() / &self.rate,
        }
    }

    /// Converts `money` into the target currency, keeping its context.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if `money` is not in the source
    /// currency and `MoneyError::RoundingRequired` if the converted amount
    /// does not fit the context under `mode`.
    pub fn convert(&self, money: &Money, mode: RoundingMode) -> MoneyResult<Money> {
        if money.currency() != &self.source {
            return Err(MoneyError::currency_mismatch(
                self.source.code(),
                money.currency().code(),
            ));
        }
        money.converted_to(&self.target, &self.rate, mode)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.source.code(), self.target.code(), self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Context;

    fn usd() -> Arc<Currency> {
        Arc::new(Currency::new("USD", 840, "US Dollar", 2))
    }

    fn eur() -> Arc<Currency> {
        Arc::new(Currency::new("EUR", 978, "Euro", 2))
    }

    fn jpy() -> Arc<Currency> {
        Arc::new(Currency::new("JPY", 392, "Yen", 0))
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert_eq!(ExchangeRate::new(&usd(), &eur(), 0), Err(MoneyError::InvalidExchangeRate));
        assert_eq!(ExchangeRate::new(&usd(), &eur(), "-1.1"), Err(MoneyError::InvalidExchangeRate));
        assert!(matches!(
            ExchangeRate::new(&usd(), &eur(), "abc"),
            Err(MoneyError::MalformedNumber(_))
        ));
    }

    #[test]
    fn test_convert() {
        let rate = ExchangeRate::new(&usd(), &eur(), "0.9").unwrap();
        let dollars = Money::of("10.00", &usd()).unwrap();
        assert_eq!(rate.convert(&dollars, RoundingMode::Unnecessary).unwrap().to_string(), "EUR 9.00");
    }

    #[test]
    fn test_convert_rounds_into_target_scale() {
        let rate = ExchangeRate::new(&usd(), &jpy(), "149.237").unwrap();
        let dollars = Money::of("1.00", &usd()).unwrap();
        assert_eq!(
            rate.convert(&dollars, RoundingMode::Unnecessary),
            Err(MoneyError::RoundingRequired)
        );
        assert_eq!(rate.convert(&dollars, RoundingMode::HalfEven).unwrap().to_string(), "JPY 149");
    }

    #[test]
    fn test_convert_checks_source_currency() {
        let rate = ExchangeRate::new(&usd(), &eur(), "0.9").unwrap();
        let euros = Money::of(1, &eur()).unwrap();
        assert_eq!(
            rate.convert(&euros, RoundingMode::HalfUp),
            Err(MoneyError::currency_mismatch("USD", "EUR"))
        );
    }

    #[test]
    fn test_convert_keeps_context() {
        let rate = ExchangeRate::new(&usd(), &eur(), "1.1").unwrap();
        let exact = Money::of_with("1.005", &usd(), Context::Exact, RoundingMode::Unnecessary).unwrap();
        let converted = rate.convert(&exact, RoundingMode::Unnecessary).unwrap();
        assert_eq!(converted.context(), Context::Exact);
        assert_eq!(converted.to_string(), "EUR 1.1055");
    }

    #[test]
    fn test_inverse() {
        let rate = ExchangeRate::new(&usd(), &eur(), "0.8").unwrap();
        let inverse = rate.inverse();
        assert_eq!(inverse.source().code(), "EUR");
        assert_eq!(inverse.target().code(), "USD");
        assert_eq!(inverse.to_string(), "EUR/USD 5/4");
        assert_eq!(inverse.inverse(), rate);
    }
}
