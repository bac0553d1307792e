//! # Validation Module
//!
//! Input validation for cart-core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Loaders (cart-store)                                         │
//! │  ├── JSON / CSV / TOML syntax                                          │
//! │  └── Value types (number vs string)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (load time)                                      │
//! │  ├── Product codes, unit prices                                        │
//! │  └── Currency codes, symbols                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart::add (per call)                                         │
//! │  ├── validate_quantity                                                 │
//! │  └── Catalog membership                                                │
//! │     Failures here are logged, never returned as errors.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::validation::{validate_product_code, validate_quantity};
//!
//! assert!(validate_product_code("apple").is_ok());
//! assert!(validate_quantity(-3).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::UnitPrice;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog product code.
///
/// Codes are matched exactly as written in the catalog, so the only rule is
/// that a code is not empty. Whitespace and length are left alone.
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "product code".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 4217 style currency code: exactly three ASCII uppercase
/// letters.
///
/// ## Example
/// ```rust
/// use cart_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("GBP").is_ok());
/// assert!(validate_currency_code("US").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency code".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency code".to_string(),
            reason: format!("'{}' must be three uppercase letters", code),
        });
    }

    Ok(())
}

/// Validates a currency display symbol.
pub fn validate_currency_symbol(symbol: &str) -> ValidationResult<()> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency symbol".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to `Cart::add`.
///
/// ## Rules
/// - Must be positive (> 0)
/// - No upper bound
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog unit price and converts it to a [`UnitPrice`].
///
/// ## Rules
/// - Finite
/// - Non-negative (zero is allowed: free items)
/// - Sub-cent prices are kept; digits past the sixth decimal are rounded
///
/// ## Example
/// ```rust
/// use cart_core::validation::validate_unit_price;
///
/// assert_eq!(validate_unit_price(1.10).unwrap().micros(), 1_100_000);
/// assert_eq!(validate_unit_price(0.125).unwrap().micros(), 125_000);
/// assert!(validate_unit_price(-1.0).is_err());
/// ```
pub fn validate_unit_price(price: f64) -> ValidationResult<UnitPrice> {
    if price.is_sign_negative() && price != 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    UnitPrice::from_decimal(price).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: format!("{} is not a finite amount", price),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
