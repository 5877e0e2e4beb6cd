//! Currency types shared across the workspace.

pub mod currency;
mod iso;
pub mod registry;

pub use currency::Currency;
pub use registry::{CurrencyProvider, CurrencyRegistry};
