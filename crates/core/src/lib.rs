//! Money values for Tally.
//!
//! This crate is pure value computation with no I/O: an immutable [`Money`]
//! is an exact decimal amount, a shared [`Currency`] and a rounding
//! [`Context`]. Every operation computes exactly and then materialises its
//! result through the context, failing with
//! [`MoneyError::RoundingRequired`] rather than rounding silently.
//!
//! # Modules
//!
//! - `numeric` - Exact decimals, raw-number operands and rounding modes
//! - `money` - Money, contexts, rational money, allocation and exchange rates

pub mod money;
pub mod numeric;

pub use money::{
    Context, ExchangeRate, Monetary, Money, MoneyFactory, MoneyFormatter, Operand, RationalMoney,
};
pub use numeric::{ExactDecimal, Number, RoundingMode};
pub use tally_shared::{Currency, CurrencyProvider, CurrencyRegistry, MoneyError, MoneyResult};
