//! Comparison and sign predicates shared by [`Money`] and [`RationalMoney`].

use std::cmp::Ordering;
use std::sync::Arc;

use num_rational::BigRational;
use tally_shared::{Currency, MoneyError, MoneyResult};

use super::rational::RationalMoney;
use super::value::Money;

/// An amount of a currency that can be compared exactly.
///
/// Comparisons only require equal currencies; contexts are ignored, so
/// `USD 1.50` in the default context equals `USD 1.5` in the exact context.
pub trait Monetary {
    /// The currency of the amount.
    fn currency(&self) -> &Arc<Currency>;

    /// The exact value of the amount.
    fn exact_amount(&self) -> BigRational;

    /// Returns -1, 0 or 1.
    fn signum(&self) -> i32;

    /// Fails with `CurrencyMismatch` unless `other` has this currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn check_currency(&self, other: &Currency) -> MoneyResult<()> {
        let currency = self.currency();
        if **currency == *other {
            Ok(())
        } else {
            Err(MoneyError::currency_mismatch(currency.code(), other.code()))
        }
    }

    /// Exact three-way comparison.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn compare_to<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<Ordering> {
        self.check_currency(other.currency())?;
        Ok(self.exact_amount().cmp(&other.exact_amount()))
    }

    /// Exact numeric equality.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn is_equal_to<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<bool> {
        self.compare_to(other).map(Ordering::is_eq)
    }

    /// Strictly less than.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn is_less_than<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<bool> {
        self.compare_to(other).map(Ordering::is_lt)
    }

    /// Less than or equal.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn is_less_than_or_equal_to<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<bool> {
        self.compare_to(other).map(Ordering::is_le)
    }

    /// Strictly greater than.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn is_greater_than<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<bool> {
        self.compare_to(other).map(Ordering::is_gt)
    }

    /// Greater than or equal.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    fn is_greater_than_or_equal_to<M: Monetary + ?Sized>(&self, other: &M) -> MoneyResult<bool> {
        self.compare_to(other).map(Ordering::is_ge)
    }

    /// Same currency and numerically equal amount; `false` on a currency
    /// mismatch instead of an error.
    fn is_amount_and_currency_equal_to<M: Monetary + ?Sized>(&self, other: &M) -> bool {
        self.is_equal_to(other).unwrap_or(false)
    }

    /// True for zero at any scale.
    fn is_zero(&self) -> bool {
        self.signum() == 0
    }

    /// True if strictly greater than zero.
    fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// True if zero or greater.
    fn is_positive_or_zero(&self) -> bool {
        self.signum() >= 0
    }

    /// True if strictly less than zero.
    fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// True if zero or less.
    fn is_negative_or_zero(&self) -> bool {
        self.signum() <= 0
    }
}

impl Monetary for Money {
    fn currency(&self) -> &Arc<Currency> {
        Self::currency(self)
    }

    fn exact_amount(&self) -> BigRational {
        self.amount().to_rational()
    }

    fn signum(&self) -> i32 {
        self.amount().signum()
    }
}

impl Monetary for RationalMoney {
    fn currency(&self) -> &Arc<Currency> {
        Self::currency(self)
    }

    fn exact_amount(&self) -> BigRational {
        self.amount().clone()
    }

    fn signum(&self) -> i32 {
        Self::signum(self)
    }
}

impl Money {
    /// The smallest of the given values; ties keep the earliest.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if any currency differs.
    pub fn min<'a>(
        first: &'a Self,
        rest: impl IntoIterator<Item = &'a Self>,
    ) -> MoneyResult<Self> {
        Self::pick(first, rest, Ordering::Less)
    }

    /// The largest of the given values; ties keep the earliest.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if any currency differs.
    pub fn max<'a>(
        first: &'a Self,
        rest: impl IntoIterator<Item = &'a Self>,
    ) -> MoneyResult<Self> {
        Self::pick(first, rest, Ordering::Greater)
    }

    fn pick<'a>(
        first: &'a Self,
        rest: impl IntoIterator<Item = &'a Self>,
        wanted: Ordering,
    ) -> MoneyResult<Self> {
        let mut best = first;
        for candidate in rest {
            if candidate.compare_to(best)? == wanted {
                best = candidate;
            }
        }
        Ok(best.clone())
    }
}
