//! # Catalog Loader
//!
//! Reads the flat JSON product price file:
//!
//! ```json
//! { "apple": 1.00, "banana": 1.10, "orange": 3.00 }
//! ```
//!
//! Any problem with the file is fatal: a cart cannot exist without a valid
//! catalog.
//!
//! Entries are read in file order and a code that appears twice is rejected.
//! Going through `serde_json::Value` would silently keep the last one.

use std::fmt;
use std::fs;
use std::path::Path;

use cart_core::Catalog;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Loads and validates a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> StoreResult<Catalog> {
    let path = path.as_ref();
    debug!(?path, "Reading catalog");

    let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let catalog = parse_catalog(&contents)?;

    info!(?path, products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Parses catalog JSON held in memory.
pub fn parse_catalog(json: &str) -> StoreResult<Catalog> {
    let CatalogEntries(entries) = serde_json::from_str(json)?;

    let mut prices = Vec::with_capacity(entries.len());
    for (code, price) in entries {
        let price = price.as_f64().ok_or_else(|| {
            StoreError::InvalidCatalog(format!("price of '{}' is not a number: {}", code, price))
        })?;
        prices.push((code, price));
    }

    Ok(Catalog::from_prices(prices)?)
}

/// Raw `(code, value)` pairs of the root object, duplicates included.
struct CatalogEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for CatalogEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CatalogEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of product code to price")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((code, price)) = map.next_entry::<String, Value>()? {
                    entries.push((code, price));
                }
                Ok(CatalogEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
