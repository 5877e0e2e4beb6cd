//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides what the money core consumes but does not own:
//! - Currency descriptors and the explicit currency registry
//! - The money error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::{Currency, CurrencyProvider, CurrencyRegistry};
