//! # cart-store: I/O Shell for Tally Cart
//!
//! Loads the product catalog, exchange rates and configuration from disk and
//! wires them into a [`cart_core::Cart`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Cart Data Flow                             │
//! │                                                                         │
//! │  cart.toml + CART_* env          product_prices.json   eurofxref.csv   │
//! │       │                                │                     │          │
//! │       ▼                                ▼                     ▼          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cart-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    config     │    │    catalog    │    │    rates     │  │   │
//! │  │   │  CartConfig   │    │ load_catalog  │    │ load_ecb_    │  │   │
//! │  │   │               │    │               │    │   rates      │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────┬───────┘  │   │
//! │  │           └──────────► open_cart() ◄───────────────┘          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                      cart_core::Cart                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `cart.toml` loading, env overrides, validation
//! - [`catalog`] - Flat JSON price file loader
//! - [`rates`] - ECB rate file and inline `[rates]` tables
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cart_core::TracingLog;
//! use cart_store::{open_cart, CartConfig};
//!
//! cart_store::init_tracing();
//! let config = CartConfig::load(None)?;
//! let mut cart = open_cart(&config, Arc::new(TracingLog))?;
//!
//! cart.add("orange", 2);
//! for line in cart.render() {
//!     println!("{}", line);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod rates;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{load_catalog, parse_catalog};
pub use config::{CartConfig, CurrenciesConfig, RatesConfig};
pub use error::{StoreError, StoreResult};
pub use rates::{load_ecb_rates, parse_ecb_rates, rate_table_from_config};

use std::sync::Arc;

use cart_core::{Cart, CartLog, RateTable};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds a cart from configuration.
///
/// ## Failure Modes
/// - Catalog missing or invalid → error, no cart
/// - `rates_path` set but unreadable or invalid → error, no cart
/// - Display currency without a rate → cart is built; that column shows zero
pub fn open_cart(config: &CartConfig, log: Arc<dyn CartLog>) -> StoreResult<Cart> {
    let catalog = load_catalog(&config.catalog_path)?;
    let rates = load_rates(config)?;
    let currencies = config.currency_table()?;

    info!(
        products = catalog.len(),
        reference = rates.reference(),
        base = %currencies.base().code,
        "Opening cart"
    );

    Ok(Cart::new(Arc::new(catalog), Arc::new(rates), currencies, log))
}

/// Loads the rate file if configured, else the inline `[rates]` table.
pub fn load_rates(config: &CartConfig) -> StoreResult<RateTable> {
    match config.rates_path {
        Some(ref path) => load_ecb_rates(path),
        None => rate_table_from_config(&config.rates),
    }
}

/// Installs the global `tracing` subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show loader detail
/// - `RUST_LOG=cart_store=trace` - Trace this crate only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
