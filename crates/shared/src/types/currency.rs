//! Currency descriptor.
//!
//! A currency is referenced by money values through an `Arc` and is never
//! mutated after construction.

use serde::{Deserialize, Serialize};

/// Describes a currency: ISO 4217 code, numeric code, name and default
/// number of fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    code: String,
    numeric_code: u16,
    name: String,
    default_fraction_digits: u32,
}

impl Currency {
    /// Creates a new currency descriptor.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        numeric_code: u16,
        name: impl Into<String>,
        default_fraction_digits: u32,
    ) -> Self {
        Self {
            code: code.into(),
            numeric_code,
            name: name.into(),
            default_fraction_digits,
        }
    }

    /// Returns the currency code (e.g., "USD").
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the ISO 4217 numeric code, `0` when the currency has none.
    #[must_use]
    pub const fn numeric_code(&self) -> u16 {
        self.numeric_code
    }

    /// Returns the English name of the currency.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of minor-unit digits (2 for USD, 0 for JPY).
    #[must_use]
    pub const fn default_fraction_digits(&self) -> u32 {
        self.default_fraction_digits
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}
