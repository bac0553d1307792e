//! # Catalog
//!
//! The read-only product code → unit price table.
//!
//! A catalog is validated once when it is built. After that every lookup is
//! infallible apart from "code not present", so a cart never meets a bad
//! price at render time.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::money::UnitPrice;
use crate::validation::{validate_product_code, validate_unit_price, ValidationResult};

/// Immutable product code → base-currency unit price mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    prices: BTreeMap<String, UnitPrice>,
}

impl Catalog {
    /// Builds a catalog from decimal prices, as read from a catalog file.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::from_prices([
    ///     ("apple".to_string(), 1.00),
    ///     ("banana".to_string(), 1.10),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(catalog.unit_price("banana").unwrap().micros(), 1_100_000);
    /// assert!(Catalog::from_prices([("kiwi".to_string(), -3.0)]).is_err());
    /// ```
    pub fn from_prices<I>(prices: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut checked = Vec::new();
        for (code, price) in prices {
            let unit_price = validate_unit_price(price).map_err(|err| match err {
                ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
                    field: format!("price of '{}'", code),
                    reason,
                },
                other => other,
            })?;
            checked.push((code, unit_price));
        }

        Self::from_unit_prices(checked)
    }

    /// Builds a catalog from prices that are already in micro-units.
    pub fn from_unit_prices<I>(prices: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (String, UnitPrice)>,
    {
        let mut map = BTreeMap::new();
        for (code, price) in prices {
            validate_product_code(&code)?;

            if price.is_negative() {
                return Err(ValidationError::OutOfRange {
                    field: format!("price of '{}'", code),
                    min: 0,
                    max: i64::MAX,
                });
            }

            if map.contains_key(&code) {
                return Err(ValidationError::Duplicate {
                    field: "product code".to_string(),
                    value: code,
                });
            }

            map.insert(code, price);
        }

        Ok(Catalog { prices: map })
    }

    /// Unit price for a code, if the code is in the catalog.
    pub fn unit_price(&self, code: &str) -> Option<UnitPrice> {
        self.prices.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.prices.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Product codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Catalog {
        Catalog::from_prices([
            ("apple".to_string(), 1.00),
            ("banana".to_string(), 1.10),
            ("orange".to_string(), 3.00),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = fruit();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.unit_price("orange"), Some(UnitPrice::from_micros(3_000_000)));
        assert_eq!(catalog.unit_price("orangeX"), None);
        assert!(catalog.contains("apple"));
        assert!(!catalog.contains("kiwi"));
    }

    #[test]
    fn test_codes_are_sorted() {
        let catalog = fruit();
        let codes: Vec<&str> = catalog.codes().collect();
        assert_eq!(codes, vec!["apple", "banana", "orange"]);
    }

    #[test]
    fn test_sub_cent_prices_are_kept() {
        let catalog = Catalog::from_prices([
            ("gum".to_string(), 0.125),
            ("apple".to_string(), 1.00),
        ])
        .unwrap();

        assert_eq!(catalog.unit_price("gum"), Some(UnitPrice::from_micros(125_000)));
        assert_eq!(catalog.unit_price("apple"), Some(UnitPrice::from_micros(1_000_000)));
    }

    #[test]
    fn test_rejects_bad_prices() {
        let err = Catalog::from_prices([("apple".to_string(), f64::NAN)]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field, .. } if field == "price of 'apple'"));

        assert!(matches!(
            Catalog::from_prices([("apple".to_string(), -1.0)]),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(Catalog::from_unit_prices([("apple".to_string(), UnitPrice::from_micros(-1))]).is_err());
    }

    #[test]
    fn test_rejects_bad_codes() {
        assert!(matches!(
            Catalog::from_prices([(String::new(), 1.0)]),
            Err(ValidationError::Required { .. })
        ));
        let long_code = "a".repeat(65);
        let catalog = Catalog::from_prices([(long_code.clone(), 1.0), (" apple".to_string(), 2.0)]).unwrap();
        assert!(catalog.contains(&long_code));
        assert!(catalog.contains(" apple"));
        assert!(!catalog.contains("apple"));
        assert!(matches!(
            Catalog::from_prices([("apple".to_string(), 1.0), ("apple".to_string(), 2.0)]),
            Err(ValidationError::Duplicate { value, .. }) if value == "apple"
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_prices(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.unit_price("apple"), None);
    }
}
