//! Currency registry.
//!
//! The registry is an explicit value: build it once (usually with
//! [`CurrencyRegistry::iso`]), optionally register custom currencies, then
//! share it by reference. Lookups never mutate it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use super::currency::Currency;
use super::iso::ISO_CURRENCIES;
use crate::config::RegistryConfig;
use crate::error::{MoneyError, MoneyResult};

/// Resolves currency codes into shared currency descriptors.
pub trait CurrencyProvider {
    /// Returns the currency registered under `code`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` if no such currency exists.
    fn lookup(&self, code: &str) -> MoneyResult<Arc<Currency>>;
}

/// A set of currencies keyed by their (upper-case) code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    by_code: BTreeMap<String, Arc<Currency>>,
    by_numeric: HashMap<u16, Arc<Currency>>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the ISO 4217 currencies.
    #[must_use]
    pub fn iso() -> Self {
        let mut registry = Self::new();
        for &(code, numeric, name, digits) in ISO_CURRENCIES {
            registry.register(Currency::new(code, numeric, name, digits));
        }
        debug!(currencies = registry.len(), "ISO currency registry built");
        registry
    }

    /// Builds a registry from configuration: the ISO table (unless disabled)
    /// followed by the configured custom currencies.
    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut registry = if config.include_iso {
            Self::iso()
        } else {
            Self::new()
        };
        for custom in &config.currencies {
            registry.register(Currency::new(
                custom.code.clone(),
                custom.numeric_code,
                custom.name.clone().unwrap_or_else(|| custom.code.clone()),
                custom.fraction_digits,
            ));
        }
        registry
    }

    /// Registers a currency, replacing any currency with the same code.
    ///
    /// The replaced currency's numeric code is released. A numeric code
    /// already held by another currency moves to the new one.
    ///
    /// Returns the replaced currency, if any.
    pub fn register(&mut self, currency: Currency) -> Option<Arc<Currency>> {
        let currency = Arc::new(currency);
        let key = currency.code().to_ascii_uppercase();
        let previous = self.by_code.insert(key, Arc::clone(&currency));
        if let Some(previous) = &previous {
            debug!(code = previous.code(), "currency replaced in registry");
            let numeric_code = previous.numeric_code();
            if self
                .by_numeric
                .get(&numeric_code)
                .is_some_and(|held| Arc::ptr_eq(held, previous))
            {
                self.by_numeric.remove(&numeric_code);
            }
        }
        if currency.numeric_code() != 0 {
            let displaced = self
                .by_numeric
                .insert(currency.numeric_code(), Arc::clone(&currency));
            if let Some(displaced) = displaced {
                debug!(
                    numeric_code = currency.numeric_code(),
                    from = displaced.code(),
                    to = currency.code(),
                    "numeric code reassigned in registry"
                );
            }
        }
        previous
    }

    /// Looks up a currency by its ISO 4217 numeric code.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::UnknownCurrency` if no currency has that code.
    pub fn lookup_numeric(&self, numeric_code: u16) -> MoneyResult<Arc<Currency>> {
        self.by_numeric
            .get(&numeric_code)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(numeric_code.to_string()))
    }

    /// Returns true if a currency is registered under `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(&code.to_ascii_uppercase())
    }

    /// Number of registered currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if no currency is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Iterates over the registered currencies in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Currency>> {
        self.by_code.values()
    }
}

impl CurrencyProvider for CurrencyRegistry {
    fn lookup(&self, code: &str) -> MoneyResult<Arc<Currency>> {
        self.by_code
            .get(&code.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }
}

impl<P: CurrencyProvider + ?Sized> CurrencyProvider for &P {
    fn lookup(&self, code: &str) -> MoneyResult<Arc<Currency>> {
        (**self).lookup(code)
    }
}

impl<P: CurrencyProvider + ?Sized> CurrencyProvider for Arc<P> {
    fn lookup(&self, code: &str) -> MoneyResult<Arc<Currency>> {
        (**self).lookup(code)
    }
}
