//! # Error Types
//!
//! Domain-specific error types for cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cart-core errors (this file)                                          │
//! │  ├── ValidationError  - Catalog / input validation failures            │
//! │  └── ConversionError  - Currency converter failures                    │
//! │                                                                         │
//! │  cart-store errors (separate crate)                                    │
//! │  └── StoreError       - File loading / config failures                 │
//! │                                                                         │
//! │  Flow: ValidationError ─► StoreError::Validation ─► binary exit        │
//! │        ConversionError ─► Cart log entry, column shows zero            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Which errors reach the caller?
//! `Cart::add` and `Cart::render` never return errors. Invalid additions and
//! conversion failures are reported through the log collaborator instead.
//! Only building a catalog, a rate table, or a currency table can fail.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building typed values (catalog, rates, currencies) from
/// untyped input, so that bad data is rejected up front instead of at
/// render time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite price, lowercase currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same product code twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Conversion Error
// =============================================================================

/// Failures reported by a [`CurrencyConverter`](crate::currency::CurrencyConverter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The converter has no rate for this currency code.
    #[error("{0} is not a supported currency")]
    UnsupportedCurrency(String),

    /// The converted amount does not fit in i64 minor units.
    #[error("Converted amount overflows")]
    Overflow,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for converter calls.
pub type ConversionResult<T> = Result<T, ConversionError>;

// =============================================================================
// Unit Tests
// =============================================================================
