//! # Cart Configuration
//!
//! Where the catalog and exchange rates come from, and which currencies a
//! receipt shows.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CART_CATALOG_PATH=./data/product_prices.json                       │
//! │     CART_RATES_PATH=./data/eurofxref.csv                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, else CART_CONFIG, else                              │
//! │     ~/.config/tallycart/cart.toml (Linux)                              │
//! │     ~/Library/Application Support/com.tally.tallycart/cart.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     EUR base, USD + GBP display, development rate table                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Relative paths inside a config file resolve against the file's directory.
//! Paths from the environment are used as given.
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! catalog_path = "data/product_prices.json"
//! rates_path = "data/eurofxref.csv"   # optional; falls back to [rates]
//!
//! [currencies]
//! base = { code = "EUR", symbol = "€" }
//! display = [
//!   { code = "USD", symbol = "$" },
//!   { code = "GBP", symbol = "£" },
//! ]
//!
//! [rates]
//! reference = "EUR"
//! [rates.table]
//! USD = 1.0812
//! GBP = 0.8574
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cart_core::{Currency, CurrencyTable, DEFAULT_BASE_CURRENCY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::rates::rate_table_from_config;

/// Overrides `catalog_path`.
pub const CATALOG_PATH_ENV: &str = "CART_CATALOG_PATH";
/// Overrides `rates_path`.
pub const RATES_PATH_ENV: &str = "CART_RATES_PATH";
/// Config file location when none is passed explicitly.
pub const CONFIG_PATH_ENV: &str = "CART_CONFIG";

// =============================================================================
// Currencies Section
// =============================================================================

/// Base currency plus the ordered display currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrenciesConfig {
    /// Currency catalog prices are quoted in.
    pub base: Currency,

    /// Currencies shown after the base column, in order.
    pub display: Vec<Currency>,
}

impl Default for CurrenciesConfig {
    fn default() -> Self {
        CurrenciesConfig {
            base: Currency::eur(),
            display: vec![Currency::usd(), Currency::gbp()],
        }
    }
}

// =============================================================================
// Rates Section
// =============================================================================

/// Inline rate table, used when no rate file is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Currency the rates are quoted against.
    pub reference: String,

    /// Units of each currency per one unit of `reference`.
    pub table: BTreeMap<String, f64>,
}

impl Default for RatesConfig {
    /// Development rates; real deployments point `rates_path` at an ECB file.
    fn default() -> Self {
        RatesConfig {
            reference: DEFAULT_BASE_CURRENCY.to_string(),
            table: BTreeMap::from([("USD".to_string(), 1.0812), ("GBP".to_string(), 0.8574)]),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Flat JSON product price file.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// ECB eurofxref CSV. When unset, `[rates]` is used.
    #[serde(default)]
    pub rates_path: Option<PathBuf>,

    #[serde(default)]
    pub currencies: CurrenciesConfig,

    #[serde(default)]
    pub rates: RatesConfig,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/product_prices.json")
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            catalog_path: default_catalog_path(),
            rates_path: None,
            currencies: CurrenciesConfig::default(),
            rates: RatesConfig::default(),
        }
    }
}

impl CartConfig {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads configuration: defaults → file → environment → validate.
    ///
    /// The file is `config_path` if given, else `CART_CONFIG`, else the
    /// platform config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = Self::from_toml(&contents)?;
                if let Some(dir) = path.parent() {
                    config.resolve_paths(dir);
                }
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Paths are left as written.
    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("catalog_path must not be empty".into()));
        }

        let currencies = self.currency_table()?;

        if let Some(ref path) = self.rates_path {
            if path.as_os_str().is_empty() {
                return Err(StoreError::InvalidConfig("rates_path must not be empty".into()));
            }
        } else {
            let rates = rate_table_from_config(&self.rates)?;
            if rates.rate(&currencies.base().code).is_none() {
                return Err(StoreError::InvalidConfig(format!(
                    "base currency {} has no rate in [rates]",
                    currencies.base().code
                )));
            }
            for currency in currencies.display() {
                if rates.rate(&currency.code).is_none() {
                    warn!(code = %currency.code, "Display currency has no rate, it will show as zero");
                }
            }
        }

        Ok(())
    }

    /// Builds the validated currency table.
    pub fn currency_table(&self) -> StoreResult<CurrencyTable> {
        let base = revalidate(&self.currencies.base)?;
        let display = self
            .currencies
            .display
            .iter()
            .map(revalidate)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(CurrencyTable::new(base, display)?)
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(CATALOG_PATH_ENV) {
            debug!(%path, "Overriding catalog path from environment");
            self.catalog_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(RATES_PATH_ENV) {
            debug!(%path, "Overriding rates path from environment");
            self.rates_path = Some(PathBuf::from(path));
        }
    }

    fn resolve_paths(&mut self, dir: &Path) {
        if self.catalog_path.is_relative() {
            self.catalog_path = dir.join(&self.catalog_path);
        }
        if let Some(ref mut path) = self.rates_path {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tallycart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

/// Serde skips `Currency::new`, so deserialized values are checked again.
fn revalidate(currency: &Currency) -> StoreResult<Currency> {
    Ok(Currency::new(currency.code.clone(), currency.symbol.clone())?)
}
