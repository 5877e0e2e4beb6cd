//! Money error types.
//!
//! Every failure in Tally is a logic or input error: nothing here is
//! transient and nothing is retried.

use std::convert::Infallible;

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by money construction, arithmetic and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    // ========== Input Errors ==========
    /// The input string is not a valid number.
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    /// The currency code is not registered.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// The rounding mode name is not recognised.
    #[error("Invalid rounding mode: {0}")]
    InvalidRoundingMode(String),

    /// The context is invalid (zero step, unparseable description).
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    // ========== Arithmetic Errors ==========
    /// The exact result does not fit the target scale and step and no
    /// rounding direction was selected.
    #[error("Rounding is required to represent the result at the target scale")]
    RoundingRequired,

    /// The divisor is exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The ratios or part count cannot be allocated.
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(&'static str),

    /// The exchange rate is zero or negative.
    #[error("Exchange rate must be positive")]
    InvalidExchangeRate,

    /// The amount does not fit the requested fixed-size representation.
    #[error("Number is out of range for the target representation")]
    NumberOutOfRange,

    // ========== Compatibility Errors ==========
    /// Operands carry different currencies.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency code of the receiver.
        expected: String,
        /// Currency code of the operand.
        actual: String,
    },

    /// Money operands carry different contexts.
    #[error("Context mismatch: expected {expected}, got {actual}")]
    ContextMismatch {
        /// Context of the receiver.
        expected: String,
        /// Context of the operand.
        actual: String,
    },
}

impl MoneyError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedNumber(_) => "MALFORMED_NUMBER",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::InvalidRoundingMode(_) => "INVALID_ROUNDING_MODE",
            Self::InvalidContext(_) => "INVALID_CONTEXT",
            Self::RoundingRequired => "ROUNDING_REQUIRED",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvalidAllocation(_) => "INVALID_ALLOCATION",
            Self::InvalidExchangeRate => "INVALID_EXCHANGE_RATE",
            Self::NumberOutOfRange => "NUMBER_OUT_OF_RANGE",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::ContextMismatch { .. } => "CONTEXT_MISMATCH",
        }
    }

    /// Builds a `CurrencyMismatch` from two currency codes.
    #[must_use]
    pub fn currency_mismatch(expected: &str, actual: &str) -> Self {
        Self::CurrencyMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl From<Infallible> for MoneyError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
