//! # cart-core: Pure Business Logic for Tally Cart
//!
//! Cart aggregation, catalog pricing and multi-currency receipts, as pure
//! code with no file or network access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                cart-store (I/O shell)                           │   │
//! │  │  product_prices.json   eurofxref.csv   cart.toml   RUST_LOG     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Catalog, RateTable, CurrencyTable      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ currency  │  │   cart    │  │  receipt  │  │   │
//! │  │   │  Catalog  │  │ RateTable │  │   Cart    │  │  Receipt  │  │   │
//! │  │   │           │  │ Converter │  │ AddOutcome│  │ LineItem  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   money   │  │ validation│  │    log    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO GLOBAL LOGGER SETUP                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and unit price types with integer arithmetic
//! - [`currency`] - Currencies, currency table, rate table, converter trait
//! - [`catalog`] - Validated product code → price table
//! - [`cart`] - The cart aggregator
//! - [`receipt`] - Receipt model and text rendering
//! - [`log`] - Injected log collaborator
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cart_core::{AddOutcome, Cart, Catalog, CurrencyTable, ExchangeRate, MemoryLog, RateTable};
//!
//! let catalog = Catalog::from_prices([
//!     ("orange".to_string(), 3.00),
//!     ("banana".to_string(), 1.10),
//! ])
//! .unwrap();
//! let rates = RateTable::new("EUR")
//!     .with_rate("USD", ExchangeRate::from_decimal(1.0812).unwrap())
//!     .with_rate("GBP", ExchangeRate::from_decimal(0.8574).unwrap());
//!
//! let mut cart = Cart::new(
//!     Arc::new(catalog),
//!     Arc::new(rates),
//!     CurrencyTable::default(),
//!     Arc::new(MemoryLog::new()),
//! );
//!
//! assert_eq!(cart.add("orange", 2), AddOutcome::Added);
//! assert_eq!(cart.add("orangeX", 2), AddOutcome::RejectedUnknownProduct);
//! cart.add("banana", 1);
//!
//! let receipt = cart.render();
//! assert_eq!(receipt[0], "orange - 2 - €6.00 - $6.49 - £5.14");
//! assert_eq!(receipt[1], "banana - 1 - €1.10 - $1.19 - £0.94");
//! assert_eq!(receipt[2], "Total = €7.10 - $7.68 - £6.09");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod log;
pub mod money;
pub mod receipt;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLine};
pub use catalog::Catalog;
pub use currency::{Currency, CurrencyConverter, CurrencyTable, ExchangeRate, RateTable};
pub use error::{ConversionError, ValidationError};
pub use log::{CartEvent, CartLog, LogEntry, LogLevel, MemoryLog, TracingLog};
pub use money::{Money, UnitPrice};
pub use receipt::{ConvertedAmount, LineItem, Receipt, ReceiptTotal};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency catalog prices are quoted in unless configured otherwise.
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";
