//! Allocation of money across integer ratios.
//!
//! Both allocators work in whole context steps (cents for a default USD
//! context, nickels for `cash:5`) so the parts always add up to the original
//! amount exactly:
//!
//! - [`Money::allocate`] truncates every share, then hands the leftover steps
//!   out one at a time to the parts in input order.
//! - [`Money::allocate_with_remainder`] only hands out what divides evenly
//!   and returns the leftover as an extra, last part.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use tally_shared::{MoneyError, MoneyResult};
use tracing::trace;

use super::value::Money;

impl Money {
    /// Allocates this money according to `ratios`.
    ///
    /// Each part first gets `amount × ratio / total` truncated to a whole
    /// step; the steps left over go one each to the first parts, so earlier
    /// ratios receive the extra units. A zero ratio yields a zero part that
    /// can still receive one leftover step.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tally_core::{Currency, Money};
    ///
    /// let usd = Arc::new(Currency::new("USD", 840, "US Dollar", 2));
    /// let parts = Money::of(100, &usd).unwrap().allocate(&[30, 20, 40, 40]).unwrap();
    /// let parts: Vec<String> = parts.iter().map(ToString::to_string).collect();
    /// assert_eq!(parts, ["USD 23.08", "USD 15.39", "USD 30.77", "USD 30.76"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAllocation` if `ratios` is empty or all
    /// zero.
    pub fn allocate(&self, ratios: &[u64]) -> MoneyResult<Vec<Self>> {
        let total = ratio_total(ratios)?;
        let units = self.step_units();

        let mut shares: Vec<BigInt> = ratios
            .iter()
            .map(|&ratio| &units * BigInt::from(ratio) / &total)
            .collect();

        let mut remainder = &units - shares.iter().sum::<BigInt>();
        if !remainder.is_zero() {
            trace!(money = %self, remainder = %remainder, parts = shares.len(), "distributing allocation remainder");
        }

        let unit = if units.is_negative() {
            -BigInt::from(1)
        } else {
            BigInt::from(1)
        };
        while !remainder.is_zero() {
            for share in &mut shares {
                if remainder.is_zero() {
                    break;
                }
                *share += &unit;
                remainder -= &unit;
            }
        }

        Ok(shares.iter().map(|share| self.from_step_units(share)).collect())
    }

    /// Allocates the evenly divisible part of this money according to
    /// `ratios` and returns the rest as an extra, last element.
    ///
    /// Ratios are reduced by their greatest common divisor first, so
    /// `[2, 4]` allocates like `[1, 2]`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAllocation` if `ratios` is empty or all
    /// zero.
    pub fn allocate_with_remainder(&self, ratios: &[u64]) -> MoneyResult<Vec<Self>> {
        ratio_total(ratios)?;
        let divisor = ratios.iter().fold(0u64, |gcd, &ratio| gcd.gcd(&ratio));
        let ratios: Vec<u64> = ratios.iter().map(|ratio| ratio / divisor).collect();
        let total = ratio_total(&ratios)?;

        let (per_ratio, remainder) = self.step_units().div_rem(&total);

        let mut parts: Vec<Self> = ratios
            .iter()
            .map(|&ratio| self.from_step_units(&(&per_ratio * BigInt::from(ratio))))
            .collect();
        parts.push(self.from_step_units(&remainder));
        Ok(parts)
    }

    /// Splits this money into `parts` equal parts, earlier parts receiving
    /// the leftover steps.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAllocation` if `parts` is zero.
    pub fn split(&self, parts: usize) -> MoneyResult<Vec<Self>> {
        self.allocate(&equal_ratios(parts)?)
    }

    /// Splits the evenly divisible part of this money into `parts` equal
    /// parts and returns the rest as an extra, last element.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAllocation` if `parts` is zero.
    pub fn split_with_remainder(&self, parts: usize) -> MoneyResult<Vec<Self>> {
        self.allocate_with_remainder(&equal_ratios(parts)?)
    }
}

fn ratio_total(ratios: &[u64]) -> MoneyResult<BigInt> {
    if ratios.is_empty() {
        return Err(MoneyError::InvalidAllocation("cannot allocate to an empty list of ratios"));
    }
    let total: BigInt = ratios.iter().map(|&ratio| BigInt::from(ratio)).sum();
    if total.is_zero() {
        return Err(MoneyError::InvalidAllocation("cannot allocate when all ratios are zero"));
    }
    Ok(total)
}

fn equal_ratios(parts: usize) -> MoneyResult<Vec<u64>> {
    if parts == 0 {
        return Err(MoneyError::InvalidAllocation("cannot split into zero parts"));
    }
    Ok(vec![1; parts])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::money::{Context, Monetary};
    use crate::numeric::RoundingMode;
    use tally_shared::Currency;

    fn usd() -> Arc<Currency> {
        Arc::new(Currency::new("USD", 840, "US Dollar", 2))
    }

    fn strings(parts: &[Money]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    fn sum(parts: &[Money]) -> Money {
        Money::total(&parts[0], &parts[1..]).unwrap()
    }

    // =========================================================================
    // allocate tests
    // =========================================================================

    #[test]
    fn test_allocate_front_loads_remainder() {
        let money = Money::of(100, &usd()).unwrap();
        let parts = money.allocate(&[30, 20, 40, 40]).unwrap();
        assert_eq!(strings(&parts), ["USD 23.08", "USD 15.39", "USD 30.77", "USD 30.76"]);
        assert_eq!(sum(&parts), money);
    }

    #[test]
    fn test_allocate_thirds() {
        let money = Money::of(100, &usd()).unwrap();
        let parts = money.allocate(&[1, 1, 1]).unwrap();
        assert_eq!(strings(&parts), ["USD 33.34", "USD 33.33", "USD 33.33"]);
    }

    #[test]
    fn test_allocate_negative_money() {
        let money = Money::of("-100", &usd()).unwrap();
        let parts = money.allocate(&[1, 1, 1]).unwrap();
        assert_eq!(strings(&parts), ["USD -33.34", "USD -33.33", "USD -33.33"]);
        assert_eq!(sum(&parts), money);
    }

    #[test]
    fn test_allocate_zero_ratio_can_receive_remainder() {
        let money = Money::of("0.05", &usd()).unwrap();
        let parts = money.allocate(&[0, 1, 1]).unwrap();
        assert_eq!(strings(&parts), ["USD 0.01", "USD 0.02", "USD 0.02"]);
        assert_eq!(sum(&parts), money);
    }

    #[test]
    fn test_allocate_single_ratio() {
        let money = Money::of("12.34", &usd()).unwrap();
        assert_eq!(money.allocate(&[7]).unwrap(), vec![money]);
    }

    #[test]
    fn test_allocate_in_cash_steps() {
        let cash = Context::cash(5).unwrap();
        let money = Money::of_with("1.00", &usd(), cash, RoundingMode::Unnecessary).unwrap();
        let parts = money.allocate(&[1, 1, 1]).unwrap();
        assert_eq!(strings(&parts), ["USD 0.35", "USD 0.35", "USD 0.30"]);
        assert!(parts.iter().all(|part| part.context() == cash));
    }

    #[test]
    fn test_allocate_invalid_ratios() {
        let money = Money::of(100, &usd()).unwrap();
        assert!(matches!(money.allocate(&[]), Err(MoneyError::InvalidAllocation(_))));
        assert!(matches!(money.allocate(&[0, 0]), Err(MoneyError::InvalidAllocation(_))));
    }

    #[test]
    fn test_allocate_is_deterministic() {
        let money = Money::of("999.99", &usd()).unwrap();
        let ratios = [3, 7, 11, 0, 5];
        assert_eq!(money.allocate(&ratios).unwrap(), money.allocate(&ratios).unwrap());
    }

    // =========================================================================
    // allocate_with_remainder tests
    // =========================================================================

    #[test]
    fn test_allocate_with_remainder_thirds() {
        let money = Money::of(100, &usd()).unwrap();
        let parts = money.allocate_with_remainder(&[1, 1, 1]).unwrap();
        assert_eq!(strings(&parts), ["USD 33.33", "USD 33.33", "USD 33.33", "USD 0.01"]);
        assert_eq!(sum(&parts), money);
    }

    #[test]
    fn test_allocate_with_remainder_reduces_ratios() {
        let money = Money::of(100, &usd()).unwrap();
        let reduced = money.allocate_with_remainder(&[1, 2]).unwrap();
        let scaled = money.allocate_with_remainder(&[200, 400]).unwrap();
        assert_eq!(reduced, scaled);
        assert_eq!(strings(&reduced), ["USD 33.33", "USD 66.66", "USD 0.01"]);
    }

    #[test]
    fn test_allocate_with_remainder_exact_split() {
        let money = Money::of(90, &usd()).unwrap();
        let parts = money.allocate_with_remainder(&[1, 2]).unwrap();
        assert_eq!(strings(&parts), ["USD 30.00", "USD 60.00", "USD 0.00"]);
        assert!(parts[2].is_zero());
    }

    // =========================================================================
    // split tests
    // =========================================================================

    #[test]
    fn test_split() {
        let money = Money::of(10, &usd()).unwrap();
        assert_eq!(strings(&money.split(3).unwrap()), ["USD 3.34", "USD 3.33", "USD 3.33"]);
        assert_eq!(
            strings(&money.split_with_remainder(3).unwrap()),
            ["USD 3.33", "USD 3.33", "USD 3.33", "USD 0.01"]
        );
    }

    #[test]
    fn test_split_zero_parts() {
        let money = Money::of(10, &usd()).unwrap();
        assert!(matches!(money.split(0), Err(MoneyError::InvalidAllocation(_))));
        assert!(matches!(
            money.split_with_remainder(0),
            Err(MoneyError::InvalidAllocation(_))
        ));
    }
}
