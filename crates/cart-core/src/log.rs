//! # Log Collaborator
//!
//! Carts never write to a global logger. Each cart is handed a [`CartLog`]
//! at construction and reports everything it does through it.
//!
//! ## Event Levels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Event               Level     Emitted by                               │
//! │  ─────────────────   ───────   ──────────────────────────────────────   │
//! │  CartCreated         INFO      Cart::new                                │
//! │  ItemAdded           INFO      Cart::add (Added / Merged)               │
//! │  InvalidQuantity     WARNING   Cart::add (qty <= 0)                     │
//! │  UnknownProduct      WARNING   Cart::add (code not in catalog)          │
//! │  QuantityOverflow    WARNING   Cart::add (i64 overflow)                 │
//! │  ReceiptGenerated    INFO      Cart::render                             │
//! │  ConversionFailed    ERROR     Cart::get_price_in_currency              │
//! │  CartCleared         INFO      Cart::clear                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two sinks ship with the crate: [`TracingLog`] forwards to the `tracing`
//! facade, [`MemoryLog`] keeps entries for inspection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

// =============================================================================
// Levels & Events
// =============================================================================

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Something a cart did or refused to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    CartCreated {
        catalog_size: usize,
    },
    ItemAdded {
        code: String,
        quantity: i64,
        accumulated: i64,
    },
    InvalidQuantity {
        code: String,
        quantity: i64,
    },
    UnknownProduct {
        code: String,
        quantity: i64,
    },
    QuantityOverflow {
        code: String,
        quantity: i64,
    },
    ReceiptGenerated {
        lines: Vec<String>,
    },
    ConversionFailed {
        currency: String,
        reason: String,
    },
    CartCleared,
}

impl CartEvent {
    /// The fixed level for this kind of event.
    pub fn level(&self) -> LogLevel {
        match self {
            CartEvent::CartCreated { .. }
            | CartEvent::ItemAdded { .. }
            | CartEvent::ReceiptGenerated { .. }
            | CartEvent::CartCleared => LogLevel::Info,
            CartEvent::InvalidQuantity { .. }
            | CartEvent::UnknownProduct { .. }
            | CartEvent::QuantityOverflow { .. } => LogLevel::Warning,
            CartEvent::ConversionFailed { .. } => LogLevel::Error,
        }
    }

    /// Short machine-friendly name, used as a structured field.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::CartCreated { .. } => "cart_created",
            CartEvent::ItemAdded { .. } => "item_added",
            CartEvent::InvalidQuantity { .. } => "invalid_quantity",
            CartEvent::UnknownProduct { .. } => "unknown_product",
            CartEvent::QuantityOverflow { .. } => "quantity_overflow",
            CartEvent::ReceiptGenerated { .. } => "receipt_generated",
            CartEvent::ConversionFailed { .. } => "conversion_failed",
            CartEvent::CartCleared => "cart_cleared",
        }
    }
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::CartCreated { catalog_size } => {
                write!(f, "Shopping cart created ({} products in catalog)", catalog_size)
            }
            CartEvent::ItemAdded {
                code,
                quantity,
                accumulated,
            } => write!(f, "Added {} x '{}' (now {})", quantity, code, accumulated),
            CartEvent::InvalidQuantity { code, quantity } => write!(
                f,
                "Quantity '{}' for product code '{}' is incorrect",
                quantity, code
            ),
            CartEvent::UnknownProduct { code, .. } => {
                write!(f, "Product code '{}' is incorrect", code)
            }
            CartEvent::QuantityOverflow { code, quantity } => write!(
                f,
                "Adding {} x '{}' would overflow the cart total",
                quantity, code
            ),
            CartEvent::ReceiptGenerated { lines } => write!(f, "Receipt = {:?}", lines),
            CartEvent::ConversionFailed { currency, reason } => {
                write!(f, "Currency conversion to '{}' failed: {}", currency, reason)
            }
            CartEvent::CartCleared => write!(f, "Shopping cart cleared"),
        }
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// A timestamped, leveled event from one cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub cart_id: Uuid,
    pub level: LogLevel,
    pub event: CartEvent,
}

impl LogEntry {
    /// Stamps an event with the current time and its level.
    pub fn now(cart_id: Uuid, event: CartEvent) -> Self {
        LogEntry {
            at: Utc::now(),
            cart_id,
            level: event.level(),
            event,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.at.to_rfc3339(), self.level, self.event)
    }
}

// =============================================================================
// Sink Trait
// =============================================================================

/// Receives a cart's diagnostic entries. Return values are never consulted.
pub trait CartLog: Send + Sync {
    fn record(&self, entry: LogEntry);
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Forwards entries to the `tracing` facade at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl CartLog for TracingLog {
    fn record(&self, entry: LogEntry) {
        let cart_id = entry.cart_id;
        let event = entry.event.name();
        match entry.level {
            LogLevel::Info => tracing::info!(%cart_id, event, "{}", entry.event),
            LogLevel::Warning => tracing::warn!(%cart_id, event, "{}", entry.event),
            LogLevel::Error => tracing::error!(%cart_id, event, "{}", entry.event),
        }
    }
}

// =============================================================================
// In-Memory Sink
// =============================================================================

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while pushing cannot leave the Vec half-written, so a poisoned
    // lock is still safe to read.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartLog for MemoryLog {
    fn record(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
