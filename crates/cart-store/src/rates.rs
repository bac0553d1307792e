//! # Exchange Rate Sources
//!
//! Builds a [`RateTable`] either from a European Central Bank reference rate
//! file or from the `[rates]` section of `cart.toml`.
//!
//! ## ECB File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  eurofxref.csv                                                          │
//! │                                                                         │
//! │  Date, USD, JPY, GBP, ... ,        ← header: currency codes            │
//! │  15 October 2026, 1.0812, 162.31, 0.8574, ... ,                        │
//! │       │             │                                                   │
//! │       │             └─ units of USD per 1 EUR                           │
//! │       └─ publication date (logged, not stored)                          │
//! │                                                                         │
//! │  • trailing comma yields a blank column → ignored                      │
//! │  • "N/A" cells (suspended currencies) → skipped                        │
//! │  • reference currency is always EUR                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use cart_core::validation::validate_currency_code;
use cart_core::{ExchangeRate, RateTable};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::config::RatesConfig;
use crate::error::{StoreError, StoreResult};

/// Reference currency of every ECB rate file.
pub const ECB_REFERENCE: &str = "EUR";

const DATE_COLUMN: &str = "Date";
const NOT_AVAILABLE: &str = "N/A";

/// Loads an ECB eurofxref CSV file.
pub fn load_ecb_rates(path: impl AsRef<Path>) -> StoreResult<RateTable> {
    let path = path.as_ref();
    debug!(?path, "Reading ECB rates");

    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let table = parse_ecb_rates(file)?;

    info!(?path, rates = table.len(), "Exchange rates loaded");
    Ok(table)
}

/// Parses ECB eurofxref CSV from any reader.
pub fn parse_ecb_rates<R: Read>(reader: R) -> StoreResult<RateTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(StoreError::InvalidRates("rate file has no data row".to_string()));
    }

    let mut table = RateTable::new(ECB_REFERENCE);
    for (code, cell) in headers.iter().zip(record.iter()) {
        if code.is_empty() || code == DATE_COLUMN {
            if code == DATE_COLUMN {
                debug!(date = cell, "ECB publication date");
            }
            continue;
        }
        if cell.is_empty() || cell == NOT_AVAILABLE {
            debug!(code, "Rate not available, skipping");
            continue;
        }

        validate_currency_code(code)?;
        let value: f64 = cell.parse().map_err(|_| {
            StoreError::InvalidRates(format!("rate for {} is not a number: '{}'", code, cell))
        })?;
        table.insert(code, ExchangeRate::from_decimal(value)?);
    }

    if table.is_empty() {
        return Err(StoreError::InvalidRates("rate file holds no usable rates".to_string()));
    }
    Ok(table)
}

/// Builds a table from the `[rates]` config section.
pub fn rate_table_from_config(config: &RatesConfig) -> StoreResult<RateTable> {
    validate_currency_code(&config.reference)?;

    let mut table = RateTable::new(config.reference.clone());
    for (code, value) in &config.table {
        validate_currency_code(code)?;
        table.insert(code.clone(), ExchangeRate::from_decimal(*value)?);
    }
    Ok(table)
}
