//! # Store Error Types
//!
//! Error types for loading catalogs, rates and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / serde_json / csv / toml errors                              │
//! │  cart_core::ValidationError                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open_cart() fails ─► no cart is built (catalog errors are fatal)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use cart_core::ValidationError;
use thiserror::Error;

/// Loader and configuration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read.
    ///
    /// ## When This Occurs
    /// - Catalog or rate file path does not exist
    /// - Permissions
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON, or its root is not an object.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate file is not valid CSV.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Config file is not valid TOML (or has wrong value types).
    #[error("Malformed TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Catalog parsed, but its shape is wrong.
    ///
    /// ## When This Occurs
    /// - A price is not a number
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Rate data parsed, but is unusable.
    #[error("Invalid rates: {0}")]
    InvalidRates(String),

    /// Configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A value failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Wraps an I/O error with the path being read.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
