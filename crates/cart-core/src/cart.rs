//! # Cart Aggregator
//!
//! Accumulates product-code additions into quantities and renders the
//! multi-currency receipt.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  add("apple", 1) ──► qty > 0? ──no──► warn, RejectedInvalidQuantity    │
//! │                         │                                               │
//! │                        yes                                              │
//! │                         ▼                                               │
//! │                   in catalog? ──no──► warn, RejectedUnknownProduct      │
//! │                         │                                               │
//! │                        yes                                              │
//! │                         ▼                                               │
//! │                   already in cart? ──yes──► quantity += n (Merged)      │
//! │                         │                                               │
//! │                         no ──► push line (Added)                        │
//! │                                                                         │
//! │  render() ──► receipt() ──► for each line, in first-add order:         │
//! │                               base = unit × qty, rounded to cents       │
//! │                               convert base into each display currency   │
//! │                            ──► total = Σ base, converted the same way   │
//! │                            ──► Vec<String> (lines + "Total = ...")      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line's code exists in the catalog
//! - Every quantity is > 0
//! - Codes are unique; line order is first-add order
//! - The cart subtotal fits in i64 cents
//!
//! ## Thread Safety
//! Mutation takes `&mut self` and there is no internal locking. Callers that
//! share a cart serialise access themselves.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::currency::{CurrencyConverter, CurrencyTable};
use crate::error::ConversionResult;
use crate::log::{CartEvent, CartLog, LogEntry, TracingLog};
use crate::money::{Money, UnitPrice};
use crate::receipt::{ConvertedAmount, LineItem, Receipt, ReceiptTotal};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One aggregated product code in the cart.
///
/// The unit price is captured from the catalog when the code is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub code: String,
    pub quantity: i64,
    pub unit_price: UnitPrice,
}

impl CartLine {
    /// unit_price × quantity, rounded to the cent. Always fits: the cart
    /// checks on every add.
    pub fn line_total(&self) -> Money {
        self.unit_price
            .checked_line_total(self.quantity)
            .unwrap_or_default()
    }
}

// =============================================================================
// Add Outcome
// =============================================================================

/// What `Cart::add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// New code, appended at the end of the cart.
    Added,
    /// Existing code, quantity increased.
    Merged,
    /// Quantity was zero or negative. Cart unchanged.
    RejectedInvalidQuantity,
    /// Code is not in the catalog. Cart unchanged.
    RejectedUnknownProduct,
    /// The new quantity or cart subtotal would overflow. Cart unchanged.
    RejectedOverflow,
}

impl AddOutcome {
    /// True for `Added` and `Merged`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, AddOutcome::Added | AddOutcome::Merged)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart aggregator.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use cart_core::{Cart, Catalog, CurrencyTable, ExchangeRate, MemoryLog, RateTable};
///
/// let catalog = Catalog::from_prices([("apple".to_string(), 1.00)]).unwrap();
/// let rates = RateTable::new("EUR")
///     .with_rate("USD", ExchangeRate::from_decimal(1.10).unwrap())
///     .with_rate("GBP", ExchangeRate::from_decimal(0.85).unwrap());
///
/// let mut cart = Cart::new(
///     Arc::new(catalog),
///     Arc::new(rates),
///     CurrencyTable::default(),
///     Arc::new(MemoryLog::new()),
/// );
/// cart.add("apple", 2);
///
/// assert_eq!(
///     cart.render(),
///     vec![
///         "apple - 2 - €2.00 - $2.20 - £1.70".to_string(),
///         "Total = €2.00 - $2.20 - £1.70".to_string(),
///     ]
/// );
/// ```
pub struct Cart {
    id: Uuid,
    catalog: Arc<Catalog>,
    converter: Arc<dyn CurrencyConverter>,
    currencies: CurrencyTable,
    log: Arc<dyn CartLog>,
    lines: Vec<CartLine>,
    subtotal: Money,
}

impl Cart {
    /// Creates an empty cart and logs its creation.
    pub fn new(
        catalog: Arc<Catalog>,
        converter: Arc<dyn CurrencyConverter>,
        currencies: CurrencyTable,
        log: Arc<dyn CartLog>,
    ) -> Self {
        let cart = Cart {
            id: Uuid::new_v4(),
            catalog,
            converter,
            currencies,
            log,
            lines: Vec::new(),
            subtotal: Money::zero(),
        };
        cart.emit(CartEvent::CartCreated {
            catalog_size: cart.catalog.len(),
        });
        cart
    }

    /// Creates a cart with the default currency table that logs through
    /// `tracing`.
    pub fn with_tracing(catalog: Arc<Catalog>, converter: Arc<dyn CurrencyConverter>) -> Self {
        Self::new(
            catalog,
            converter,
            CurrencyTable::default(),
            Arc::new(TracingLog),
        )
    }

    /// Adds `quantity` of `code`, merging with an existing line.
    ///
    /// Rejected calls leave the cart untouched and log a warning. Callers that
    /// do not care about the outcome can ignore the return value.
    pub fn add(&mut self, code: &str, quantity: i64) -> AddOutcome {
        if validate_quantity(quantity).is_err() {
            self.emit(CartEvent::InvalidQuantity {
                code: code.to_string(),
                quantity,
            });
            return AddOutcome::RejectedInvalidQuantity;
        }

        let Some(catalog_price) = self.catalog.unit_price(code) else {
            self.emit(CartEvent::UnknownProduct {
                code: code.to_string(),
                quantity,
            });
            return AddOutcome::RejectedUnknownProduct;
        };

        let position = self.lines.iter().position(|line| line.code == code);
        let (current, unit_price, old_total) = match position {
            Some(i) => {
                let line = &self.lines[i];
                (line.quantity, line.unit_price, line.line_total())
            }
            None => (0, catalog_price, Money::zero()),
        };

        // Lines are rounded to the cent, so the subtotal swaps the old
        // rounded line for the new one rather than adding unit × quantity.
        let checked = current.checked_add(quantity).and_then(|accumulated| {
            unit_price
                .checked_line_total(accumulated)
                .and_then(|new_total| {
                    self.subtotal
                        .checked_sub(old_total)
                        .and_then(|rest| rest.checked_add(new_total))
                })
                .map(|subtotal| (accumulated, subtotal))
        });

        let Some((accumulated, subtotal)) = checked else {
            self.emit(CartEvent::QuantityOverflow {
                code: code.to_string(),
                quantity,
            });
            return AddOutcome::RejectedOverflow;
        };

        self.subtotal = subtotal;
        let outcome = match position {
            Some(i) => {
                self.lines[i].quantity = accumulated;
                AddOutcome::Merged
            }
            None => {
                self.lines.push(CartLine {
                    code: code.to_string(),
                    quantity,
                    unit_price,
                });
                AddOutcome::Added
            }
        };

        self.emit(CartEvent::ItemAdded {
            code: code.to_string(),
            quantity,
            accumulated,
        });
        outcome
    }

    /// Computes the structured receipt.
    ///
    /// Conversion failures are logged and show up as zero amounts with
    /// `failed = true`.
    pub fn receipt(&self) -> Receipt {
        let mut total = Money::zero();

        let lines = self
            .lines
            .iter()
            .map(|line| {
                let base_price = line.line_total();
                total += base_price;
                LineItem {
                    code: line.code.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    base_price,
                    converted: self.convert_for_display(base_price),
                }
            })
            .collect();

        let total = ReceiptTotal {
            base_price: total,
            converted: self.convert_for_display(total),
        };

        Receipt {
            currencies: self.currencies.clone(),
            lines,
            total,
        }
    }

    /// Renders the receipt as text: one string per line, then the total.
    pub fn render(&self) -> Vec<String> {
        let lines = self.receipt().to_lines();
        self.emit(CartEvent::ReceiptGenerated {
            lines: lines.clone(),
        });
        lines
    }

    /// Converts a base-currency amount, falling back to zero on failure.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use cart_core::{Cart, Catalog, Money, RateTable};
    ///
    /// let cart = Cart::with_tracing(Arc::new(Catalog::default()), Arc::new(RateTable::new("EUR")));
    /// assert!(cart.get_price_in_currency(Money::from_cents(200), "US").is_zero());
    /// ```
    pub fn get_price_in_currency(&self, amount: Money, currency: &str) -> Money {
        self.convert_logged(amount, currency).unwrap_or_default()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.subtotal = Money::zero();
        self.emit(CartEvent::CartCleared);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Accumulated quantity for a code, if present.
    pub fn quantity_of(&self, code: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.code == code)
            .map(|line| line.quantity)
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities (saturating).
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Base-currency subtotal.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn convert_for_display(&self, amount: Money) -> Vec<ConvertedAmount> {
        self.currencies
            .display()
            .iter()
            .map(|currency| match self.convert_logged(amount, &currency.code) {
                Ok(converted) => ConvertedAmount {
                    currency: currency.code.clone(),
                    amount: converted,
                    failed: false,
                },
                Err(_) => ConvertedAmount {
                    currency: currency.code.clone(),
                    amount: Money::zero(),
                    failed: true,
                },
            })
            .collect()
    }

    fn convert_logged(&self, amount: Money, currency: &str) -> ConversionResult<Money> {
        let base = &self.currencies.base().code;
        self.converter
            .convert(amount, base, currency)
            .map_err(|err| {
                self.emit(CartEvent::ConversionFailed {
                    currency: currency.to_string(),
                    reason: err.to_string(),
                });
                err
            })
    }

    fn emit(&self, event: CartEvent) {
        self.log.record(LogEntry::now(self.id, event));
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("id", &self.id)
            .field("currencies", &self.currencies)
            .field("lines", &self.lines)
            .field("subtotal", &self.subtotal)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
