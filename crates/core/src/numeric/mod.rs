//! Exact numeric substrate: fixed-point decimals, raw-number operands and
//! directional rounding.

pub mod decimal;
pub mod number;
pub mod rounding;

#[cfg(test)]
mod rounding_props;

pub use decimal::ExactDecimal;
pub use number::Number;
pub use rounding::{RoundingMode, round_to_scale, round_to_step};
