//! Money values, rounding contexts and allocation.

mod allocation;
mod arithmetic;
pub mod context;
pub mod exchange;
pub mod factory;
pub mod format;
mod monetary;
mod operand;
pub mod rational;
mod value;

#[cfg(test)]
mod props;

pub use context::Context;
pub use exchange::ExchangeRate;
pub use factory::MoneyFactory;
pub use format::MoneyFormatter;
pub use monetary::Monetary;
pub use operand::Operand;
pub use rational::RationalMoney;
pub use value::Money;
