//! # Receipt Model
//!
//! The structured receipt a cart computes, and its text rendering.
//!
//! ## Text Layout
//! ```text
//! apple - 1 - €1.00 - $1.08 - £0.86          ◄── one LineItem per cart line
//! banana - 3 - €3.30 - $3.57 - £2.83
//! Total = €4.30 - $4.65 - £3.69              ◄── ReceiptTotal (always last)
//! ```
//!
//! Columns after the base amount follow the display order of the
//! [`CurrencyTable`]. Every amount goes through `CurrencyTable::format`.

use serde::Serialize;

use crate::currency::CurrencyTable;
use crate::money::{Money, UnitPrice};

/// Separator between receipt columns.
pub const COLUMN_SEPARATOR: &str = " - ";

/// One display-currency column of a line or of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedAmount {
    pub currency: String,
    pub amount: Money,
    /// True when the converter failed and `amount` is the zero fallback.
    pub failed: bool,
}

/// A priced, converted cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub code: String,
    pub quantity: i64,
    pub unit_price: UnitPrice,
    /// quantity × unit_price rounded to the cent, base currency.
    pub base_price: Money,
    pub converted: Vec<ConvertedAmount>,
}

/// The grand total row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptTotal {
    /// Sum of every line's `base_price`.
    pub base_price: Money,
    /// Conversions of `base_price` itself.
    pub converted: Vec<ConvertedAmount>,
}

/// A complete receipt: lines in cart order, then the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub currencies: CurrencyTable,
    pub lines: Vec<LineItem>,
    pub total: ReceiptTotal,
}

impl Receipt {
    /// Renders every line followed by exactly one total line.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out: Vec<String> = self.lines.iter().map(|line| self.render_line(line)).collect();
        out.push(self.render_total());
        out
    }

    fn render_line(&self, line: &LineItem) -> String {
        let mut columns = vec![
            line.code.clone(),
            line.quantity.to_string(),
            self.base_column(line.base_price),
        ];
        columns.extend(self.converted_columns(&line.converted));
        columns.join(COLUMN_SEPARATOR)
    }

    fn render_total(&self) -> String {
        let mut columns = vec![self.base_column(self.total.base_price)];
        columns.extend(self.converted_columns(&self.total.converted));
        format!("Total = {}", columns.join(COLUMN_SEPARATOR))
    }

    fn base_column(&self, amount: Money) -> String {
        self.currencies.format(amount, &self.currencies.base().code)
    }

    fn converted_columns<'a>(
        &'a self,
        converted: &'a [ConvertedAmount],
    ) -> impl Iterator<Item = String> + 'a {
        converted
            .iter()
            .map(move |c| self.currencies.format(c.amount, &c.currency))
    }
}
