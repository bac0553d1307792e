//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    1.10 + 3.00 + 3.00 = 7.1000000000000005  ❌                          │
//! │                                                                         │
//! │  Receipt totals must equal the sum of the printed lines exactly.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    110 + 300 + 300 = 710 cents → "7.10"                                 │
//! │    Catalog decimals are converted ONCE, at load time.                   │
//! │                                                                         │
//! │  Unit prices may be finer than a cent (0.125), so they are kept in     │
//! │  micro-units. A line is unit × qty in micros, rounded half away from   │
//! │  zero to cents; every amount from there on is Money.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::money::UnitPrice;
//!
//! let price = UnitPrice::from_decimal(1.10).unwrap();
//! let line = price.checked_line_total(3).unwrap();
//! assert_eq!(line.cents(), 330);
//! assert_eq!(line.format_with_symbol("€"), "€3.30");
//!
//! // 0.125 × 3 = 0.375 → 0.38
//! let gum = UnitPrice::from_decimal(0.125).unwrap();
//! assert_eq!(gum.checked_line_total(3).unwrap().cents(), 38);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Micro-units per major unit of a [`UnitPrice`].
pub const PRICE_SCALE: i64 = 1_000_000;

/// Micro-units per cent.
const MICROS_PER_CENT: i128 = (PRICE_SCALE / 100) as i128;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// The currency itself is not part of the value: amounts on a receipt are
/// tagged by the [`CurrencyTable`](crate::currency::CurrencyTable) column
/// they appear in.
///
/// ## Where Money is Used
/// ```text
/// UnitPrice × qty ──► CartLine.line_total ──► Receipt.total
///                              │                      │
///                              ▼                      ▼
///                      converter.convert()    converter.convert()
///                              │                      │
///                              ▼                      ▼
///                       "$1.08" on line        "$7.68" on total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with two decimals after a currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1310).format_with_symbol("€"), "€13.10");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("$"), "-$5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// A catalog unit price in micro-units (millionths of the major unit).
///
/// Catalog files may quote prices below a cent, so unit prices keep six
/// decimals. Only [`checked_line_total`](UnitPrice::checked_line_total)
/// turns them into [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitPrice(i64);

impl UnitPrice {
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        UnitPrice(micros)
    }

    /// Converts a decimal price (e.g. a JSON number) to micro-units,
    /// rounding to the nearest micro.
    ///
    /// Returns `None` when the value is not finite or does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::UnitPrice;
    ///
    /// assert_eq!(UnitPrice::from_decimal(1.10).unwrap().micros(), 1_100_000);
    /// assert_eq!(UnitPrice::from_decimal(0.125).unwrap().micros(), 125_000);
    /// assert_eq!(UnitPrice::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let micros = (value * PRICE_SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive.
        if micros.abs() >= i64::MAX as f64 {
            return None;
        }

        Some(UnitPrice(micros as i64))
    }

    /// A whole-cent price.
    pub const fn from_money(amount: Money) -> Option<Self> {
        match amount.0.checked_mul(PRICE_SCALE / 100) {
            Some(micros) => Some(UnitPrice(micros)),
            None => None,
        }
    }

    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// unit × quantity, rounded half away from zero to the cent.
    ///
    /// Returns `None` when the result does not fit in i64 cents.
    pub fn checked_line_total(&self, qty: i64) -> Option<Money> {
        let micros = self.0 as i128 * qty as i128;
        let cents = div_round_half_away(micros, MICROS_PER_CENT);
        i64::try_from(cents).ok().map(Money)
    }
}

/// Integer division rounding half away from zero. `d` must be positive.
pub(crate) fn div_round_half_away(n: i128, d: i128) -> i128 {
    if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a symbol ("13.10", "-5.50").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
