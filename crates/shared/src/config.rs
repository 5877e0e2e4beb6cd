//! Engine configuration management.
//!
//! Rounding modes and contexts are kept in their textual form here
//! (`"half_even"`, `"cash:5"`); `tally-core` parses them.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Defaults applied by money factories.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Currency registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Defaults applied when a caller does not choose a context or rounding mode.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Rounding mode name (e.g., "unnecessary", "half_even", "down").
    #[serde(default = "default_rounding")]
    pub rounding: String,
    /// Context description (e.g., "default", "exact", "cash:5", "precision:4").
    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rounding: default_rounding(),
            context: default_context(),
        }
    }
}

fn default_rounding() -> String {
    "unnecessary".to_string()
}

fn default_context() -> String {
    "default".to_string()
}

/// Currency registry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Seed the registry with the ISO 4217 table.
    #[serde(default = "default_include_iso")]
    pub include_iso: bool,
    /// Additional (or overriding) currencies.
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_iso: default_include_iso(),
            currencies: Vec::new(),
        }
    }
}

fn default_include_iso() -> bool {
    true
}

/// A custom currency definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code.
    pub code: String,
    /// Numeric code, `0` when there is none.
    #[serde(default)]
    pub numeric_code: u16,
    /// Display name; defaults to the code.
    #[serde(default)]
    pub name: Option<String>,
    /// Number of minor-unit digits.
    pub fraction_digits: u32,
}

impl EngineConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}` (both optional) and `TALLY__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not match
    /// the configuration schema.
    pub fn from_toml(document: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
