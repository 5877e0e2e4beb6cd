//! Rounding contexts.
//!
//! A [`Context`] decides the canonical decimal form of every amount a
//! [`Money`](super::Money) holds: the scale it is written at and the step its
//! last digit must be a multiple of.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tally_shared::{Currency, MoneyError, MoneyResult};
use tracing::debug;

use crate::numeric::{ExactDecimal, Number, RoundingMode, round_to_step};

/// Policy that materialises an exact number as a money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Context {
    /// The currency's default fraction digits, step 1.
    #[default]
    Default,
    /// The currency's default fraction digits, amounts constrained to
    /// multiples of `step` minor units (e.g. `step = 5` for CHF 0.05 coins).
    Cash {
        /// Minor units per cash increment.
        step: NonZeroU32,
    },
    /// A fixed scale independent of the currency, amounts constrained to
    /// multiples of `step` units of the last place.
    Precision {
        /// Number of decimal places.
        scale: u32,
        /// Units of the last place per increment.
        step: NonZeroU32,
    },
    /// No rounding: results keep their natural scale.
    Exact,
}

impl Context {
    /// Cash rounding to multiples of `step` minor units.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidContext` if `step` is zero.
    pub fn cash(step: u32) -> MoneyResult<Self> {
        Ok(Self::Cash {
            step: non_zero_step(step)?,
        })
    }

    /// A fixed `scale` with multiples of `step` units of the last place.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidContext` if `step` is zero.
    pub fn precision(scale: u32, step: u32) -> MoneyResult<Self> {
        Ok(Self::Precision {
            scale,
            step: non_zero_step(step)?,
        })
    }

    /// The step amounts must be a multiple of, in units of the last place.
    #[must_use]
    pub const fn step(self) -> u32 {
        match self {
            Self::Default | Self::Exact => 1,
            Self::Cash { step } | Self::Precision { step, .. } => step.get(),
        }
    }

    /// The scale amounts of `currency` are held at, or `None` for `Exact`.
    #[must_use]
    pub const fn scale_for(self, currency: &Currency) -> Option<u32> {
        match self {
            Self::Default | Self::Cash { .. } => Some(currency.default_fraction_digits()),
            Self::Precision { scale, .. } => Some(scale),
            Self::Exact => None,
        }
    }

    /// Zero, written the way this context writes amounts of `currency`.
    #[must_use]
    pub fn zero(self, currency: &Currency) -> ExactDecimal {
        self.scale_for(currency)
            .map_or_else(ExactDecimal::zero, ExactDecimal::zero_at)
    }

    /// Materialises `value` as an amount of `currency`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::RoundingRequired` if the value does not fit the
    /// context and `mode` is `RoundingMode::Unnecessary`, or if the context is
    /// `Exact` and the value has no terminating decimal expansion.
    pub fn apply(
        self,
        value: &Number,
        currency: &Currency,
        mode: RoundingMode,
    ) -> MoneyResult<ExactDecimal> {
        let result = match (self.scale_for(currency), value) {
            (None, Number::Decimal(decimal)) => Ok(decimal.clone()),
            (None, Number::Rational(rational)) => {
                ExactDecimal::from_rational(rational).ok_or(MoneyError::RoundingRequired)
            }
            (Some(scale), Number::Decimal(decimal)) if self.step() == 1 => {
                decimal.with_scale(scale, mode)
            }
            (Some(scale), _) => round_to_step(&value.to_rational(), scale, self.step(), mode),
        };
        result.inspect_err(|err| {
            debug!(context = %self, currency = currency.code(), value = %value, %err, "context rejected value");
        })
    }
}

fn non_zero_step(step: u32) -> MoneyResult<NonZeroU32> {
    NonZeroU32::new(step).ok_or_else(|| MoneyError::InvalidContext("step must be positive".to_string()))
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Exact => f.write_str("exact"),
            Self::Cash { step } => write!(f, "cash:{step}"),
            Self::Precision { scale, step } if step.get() == 1 => write!(f, "precision:{scale}"),
            Self::Precision { scale, step } => write!(f, "precision:{scale}:{step}"),
        }
    }
}

impl FromStr for Context {
    type Err = MoneyError;

    /// Parses `default`, `exact`, `cash:<step>` and `precision:<scale>[:<step>]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoneyError::InvalidContext(s.to_string());
        let normalized = s.trim().to_ascii_lowercase();
        let mut parts = normalized.split(':');
        let kind = parts.next().unwrap_or_default();
        let numbers = parts
            .map(|part| part.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<MoneyResult<Vec<_>>>()?;

        match (kind, numbers.as_slice()) {
            ("default", []) => Ok(Self::Default),
            ("exact", []) => Ok(Self::Exact),
            ("cash", [step]) => Self::cash(*step).map_err(|_| invalid()),
            ("precision", [scale]) => Self::precision(*scale, 1),
            ("precision", [scale, step]) => Self::precision(*scale, *step).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}
