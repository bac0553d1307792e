//! # Currencies and Conversion
//!
//! Currency identities, the receipt's currency table, and the rate table
//! that converts between currencies.
//!
//! ## Conversion Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RateTable (reference = EUR, rates quoted per 1 EUR)                    │
//! │                                                                         │
//! │     USD 1.0812      GBP 0.8574      JPY 158.45                          │
//! │                                                                         │
//! │  convert(amount, from = USD, to = GBP)                                  │
//! │                                                                         │
//! │     amount(USD) ──÷ 1.0812──► EUR ──× 0.8574──► GBP                     │
//! │                                                                         │
//! │  Computed in one step as amount × rate(to) / rate(from) using i128     │
//! │  integer math, rounded half away from zero to the cent.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConversionError, ConversionResult, ValidationError};
use crate::money::{div_round_half_away, Money};
use crate::validation::{validate_currency_code, validate_currency_symbol, ValidationResult};

/// Number of micro-units in one unit of an exchange rate.
pub const RATE_SCALE: u64 = 1_000_000;

// =============================================================================
// Currency
// =============================================================================

/// A currency as it appears on a receipt: code plus display symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code ("EUR").
    pub code: String,
    /// Symbol printed before amounts ("€").
    pub symbol: String,
}

impl Currency {
    /// Creates a validated currency.
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> ValidationResult<Self> {
        let code = code.into();
        let symbol = symbol.into();
        validate_currency_code(&code)?;
        validate_currency_symbol(&symbol)?;
        Ok(Currency { code, symbol })
    }

    /// Euro (€).
    pub fn eur() -> Self {
        Currency {
            code: "EUR".to_string(),
            symbol: "€".to_string(),
        }
    }

    /// US dollar ($).
    pub fn usd() -> Self {
        Currency {
            code: "USD".to_string(),
            symbol: "$".to_string(),
        }
    }

    /// Pound sterling (£).
    pub fn gbp() -> Self {
        Currency {
            code: "GBP".to_string(),
            symbol: "£".to_string(),
        }
    }
}

// =============================================================================
// Currency Table
// =============================================================================

/// The base currency plus the ordered display currencies of a receipt.
///
/// Every amount on a receipt, base or converted, is formatted through
/// [`CurrencyTable::format`], so there is a single symbol lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyTable {
    base: Currency,
    display: Vec<Currency>,
}

impl CurrencyTable {
    /// Creates a table. Codes must be unique across base and display.
    pub fn new(base: Currency, display: Vec<Currency>) -> ValidationResult<Self> {
        let mut seen = vec![base.code.as_str()];
        for currency in &display {
            if seen.contains(&currency.code.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "currency".to_string(),
                    value: currency.code.clone(),
                });
            }
            seen.push(currency.code.as_str());
        }

        Ok(CurrencyTable { base, display })
    }

    /// The currency catalog prices are expressed in.
    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// Display currencies, in receipt column order.
    pub fn display(&self) -> &[Currency] {
        &self.display
    }

    /// Looks up the symbol for a code (base or display).
    pub fn symbol_for(&self, code: &str) -> Option<&str> {
        std::iter::once(&self.base)
            .chain(self.display.iter())
            .find(|c| c.code == code)
            .map(|c| c.symbol.as_str())
    }

    /// Formats an amount for a currency in this table.
    ///
    /// Codes missing from the table fall back to the code itself as prefix.
    pub fn format(&self, amount: Money, code: &str) -> String {
        amount.format_with_symbol(self.symbol_for(code).unwrap_or(code))
    }
}

impl Default for CurrencyTable {
    /// EUR base, USD then GBP display.
    fn default() -> Self {
        CurrencyTable {
            base: Currency::eur(),
            display: vec![Currency::usd(), Currency::gbp()],
        }
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// Units of a currency per one unit of the reference currency, in micros.
///
/// `ExchangeRate::from_micros(1_081_200)` = 1.0812
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExchangeRate(u64);

impl ExchangeRate {
    /// The reference currency's own rate.
    pub const ONE: ExchangeRate = ExchangeRate(RATE_SCALE);

    /// Creates a rate from micro-units. Zero is rejected.
    pub fn from_micros(micros: u64) -> ValidationResult<Self> {
        if micros == 0 {
            return Err(ValidationError::MustBePositive {
                field: "exchange rate".to_string(),
            });
        }
        Ok(ExchangeRate(micros))
    }

    /// Creates a rate from a decimal quote (e.g. a CSV or TOML value).
    pub fn from_decimal(rate: f64) -> ValidationResult<Self> {
        if !rate.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "exchange rate".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        let micros = (rate * RATE_SCALE as f64).round();
        if micros < 1.0 {
            return Err(ValidationError::MustBePositive {
                field: "exchange rate".to_string(),
            });
        }
        if micros >= u64::MAX as f64 {
            return Err(ValidationError::OutOfRange {
                field: "exchange rate".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        Ok(ExchangeRate(micros as u64))
    }

    #[inline]
    pub const fn micros(&self) -> u64 {
        self.0
    }

    /// The rate as a float, for display only.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / RATE_SCALE as f64
    }
}

// =============================================================================
// Converter Seam
// =============================================================================

/// Converts amounts between currencies.
///
/// Implementations are synchronous and side-effect free. Any resource behind
/// them (a rate file, a feed) is loaded before the converter is handed to a
/// cart.
pub trait CurrencyConverter: Send + Sync {
    /// Converts `amount` from `from` into `to`, rounded to the cent.
    fn convert(&self, amount: Money, from: &str, to: &str) -> ConversionResult<Money>;
}

// =============================================================================
// Rate Table
// =============================================================================

/// Exchange rates quoted against one reference currency.
///
/// ## Example
/// ```rust
/// use cart_core::currency::{CurrencyConverter, ExchangeRate, RateTable};
/// use cart_core::money::Money;
///
/// let rates = RateTable::new("EUR")
///     .with_rate("USD", ExchangeRate::from_micros(1_100_000).unwrap());
///
/// let usd = rates.convert(Money::from_cents(200), "EUR", "USD").unwrap();
/// assert_eq!(usd.cents(), 220);
/// assert!(rates.convert(Money::from_cents(200), "EUR", "US").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    reference: String,
    rates: BTreeMap<String, ExchangeRate>,
}

impl RateTable {
    /// Creates an empty table quoted against `reference`.
    pub fn new(reference: impl Into<String>) -> Self {
        RateTable {
            reference: reference.into(),
            rates: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with_rate(mut self, code: impl Into<String>, rate: ExchangeRate) -> Self {
        self.insert(code, rate);
        self
    }

    /// Inserts or replaces a rate, returning the previous one.
    ///
    /// The reference currency always converts at 1 and is never stored.
    pub fn insert(&mut self, code: impl Into<String>, rate: ExchangeRate) -> Option<ExchangeRate> {
        let code = code.into();
        if code == self.reference {
            return None;
        }
        self.rates.insert(code, rate)
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the rate for a code, `ONE` for the reference currency.
    pub fn rate(&self, code: &str) -> Option<ExchangeRate> {
        if code == self.reference {
            return Some(ExchangeRate::ONE);
        }
        self.rates.get(code).copied()
    }

    /// All convertible codes, reference first.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.reference.as_str()).chain(self.rates.keys().map(String::as_str))
    }

    /// Number of quoted (non-reference) rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn require(&self, code: &str) -> ConversionResult<ExchangeRate> {
        self.rate(code)
            .ok_or_else(|| ConversionError::UnsupportedCurrency(code.to_string()))
    }
}

impl CurrencyConverter for RateTable {
    fn convert(&self, amount: Money, from: &str, to: &str) -> ConversionResult<Money> {
        let from_rate = self.require(from)?;
        let to_rate = self.require(to)?;

        if from == to {
            return Ok(amount);
        }

        // amount × to / from, in i128 so large amounts cannot overflow mid-way
        let numerator = amount.cents() as i128 * to_rate.micros() as i128;
        let cents = div_round_half_away(numerator, from_rate.micros() as i128);

        i64::try_from(cents)
            .map(Money::from_cents)
            .map_err(|_| ConversionError::Overflow)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> RateTable {
        RateTable::new("EUR")
            .with_rate("USD", ExchangeRate::from_decimal(1.0812).unwrap())
            .with_rate("GBP", ExchangeRate::from_decimal(0.8574).unwrap())
    }

    #[test]
    fn test_currency_new_validates() {
        assert!(Currency::new("EUR", "€").is_ok());
        assert!(Currency::new("US", "$").is_err());
        assert!(Currency::new("usd", "$").is_err());
        assert!(Currency::new("USD", "").is_err());
    }

    #[test]
    fn test_currency_table_default_order() {
        let table = CurrencyTable::default();
        assert_eq!(table.base().code, "EUR");
        let codes: Vec<&str> = table.display().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "GBP"]);
    }

    #[test]
    fn test_currency_table_symbols() {
        let table = CurrencyTable::default();
        assert_eq!(table.symbol_for("EUR"), Some("€"));
        assert_eq!(table.symbol_for("USD"), Some("$"));
        assert_eq!(table.symbol_for("GBP"), Some("£"));
        assert_eq!(table.symbol_for("JPY"), None);

        assert_eq!(table.format(Money::from_cents(110), "EUR"), "€1.10");
        assert_eq!(table.format(Money::from_cents(110), "JPY"), "JPY1.10");
    }

    #[test]
    fn test_currency_table_rejects_duplicates() {
        assert!(CurrencyTable::new(Currency::eur(), vec![Currency::eur()]).is_err());
        assert!(CurrencyTable::new(Currency::eur(), vec![Currency::usd(), Currency::usd()]).is_err());
        assert!(CurrencyTable::new(Currency::eur(), vec![]).is_ok());
    }

    #[test]
    fn test_exchange_rate_from_decimal() {
        assert_eq!(ExchangeRate::from_decimal(1.0812).unwrap().micros(), 1_081_200);
        assert_eq!(ExchangeRate::from_decimal(0.85743).unwrap().micros(), 857_430);
        assert!(ExchangeRate::from_decimal(0.0).is_err());
        assert!(ExchangeRate::from_decimal(-1.0).is_err());
        assert!(ExchangeRate::from_decimal(f64::NAN).is_err());
        assert!(ExchangeRate::from_micros(0).is_err());
    }

    #[test]
    fn test_convert_from_reference() {
        let rates = sample_rates();
        // 1.00 EUR × 1.0812 = 1.0812 → 1.08
        assert_eq!(
            rates.convert(Money::from_cents(100), "EUR", "USD").unwrap(),
            Money::from_cents(108)
        );
        // 13.10 EUR × 0.8574 = 11.23194 → 11.23
        assert_eq!(
            rates.convert(Money::from_cents(1310), "EUR", "GBP").unwrap(),
            Money::from_cents(1123)
        );
    }

    #[test]
    fn test_convert_cross_rate() {
        let rates = sample_rates();
        // 10.00 USD → EUR 9.2490 → GBP 7.9301 → 7.93
        assert_eq!(
            rates.convert(Money::from_cents(1000), "USD", "GBP").unwrap(),
            Money::from_cents(793)
        );
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let rates = sample_rates();
        let amount = Money::from_cents(1234);
        assert_eq!(rates.convert(amount, "USD", "USD").unwrap(), amount);
        assert_eq!(rates.convert(amount, "EUR", "EUR").unwrap(), amount);
    }

    #[test]
    fn test_convert_zero() {
        let rates = sample_rates();
        assert!(rates.convert(Money::zero(), "EUR", "USD").unwrap().is_zero());
    }

    #[test]
    fn test_convert_rounds_half_away_from_zero() {
        let rates = RateTable::new("EUR").with_rate("XXX", ExchangeRate::from_micros(500_000).unwrap());
        // 0.01 × 0.5 = 0.005 → 0.01
        assert_eq!(
            rates.convert(Money::from_cents(1), "EUR", "XXX").unwrap(),
            Money::from_cents(1)
        );
        assert_eq!(
            rates.convert(Money::from_cents(-1), "EUR", "XXX").unwrap(),
            Money::from_cents(-1)
        );
    }

    #[test]
    fn test_convert_unknown_currency() {
        let rates = sample_rates();
        assert_eq!(
            rates.convert(Money::from_cents(200), "EUR", "US"),
            Err(ConversionError::UnsupportedCurrency("US".to_string()))
        );
        assert_eq!(
            rates.convert(Money::from_cents(200), "XYZ", "USD"),
            Err(ConversionError::UnsupportedCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_convert_overflow() {
        let rates = RateTable::new("EUR").with_rate("BIG", ExchangeRate::from_micros(10 * RATE_SCALE).unwrap());
        assert_eq!(
            rates.convert(Money::from_cents(i64::MAX), "EUR", "BIG"),
            Err(ConversionError::Overflow)
        );
    }

    #[test]
    fn test_reference_rate_is_never_stored() {
        let mut rates = RateTable::new("EUR");
        assert_eq!(rates.insert("EUR", ExchangeRate::from_micros(2).unwrap()), None);
        assert_eq!(rates.rate("EUR"), Some(ExchangeRate::ONE));
        assert!(rates.is_empty());

        let rates = sample_rates();
        let codes: Vec<&str> = rates.currencies().collect();
        assert_eq!(codes, vec!["EUR", "GBP", "USD"]);
        assert_eq!(rates.len(), 2);
    }
}
