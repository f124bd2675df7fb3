//! A single order line and its subtotal.

use rust_decimal::Decimal;

use super::money::{format_money, parse_amount, round_money};
use crate::models::catalog::ProductId;

/// Quantity shown in a freshly added line.
pub const DEFAULT_QUANTITY: &str = "1";

/// Unit price shown in a freshly added line or after clearing the product.
pub const ZERO_PRICE: &str = "0.00";

/// One order line as the user sees it.
///
/// Quantity and unit price keep the raw text that was entered; the
/// subtotal is derived from them by [`OrderLine::recompute_subtotal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Persisted line id when editing an existing order.
    pub item_id: Option<u64>,
    pub product_id: Option<ProductId>,
    pub quantity: String,
    pub unit_price: String,
    subtotal: Decimal,
}

impl OrderLine {
    /// Creates an empty line: no product, quantity 1, price 0.00.
    pub fn new() -> Self {
        Self {
            item_id: None,
            product_id: None,
            quantity: DEFAULT_QUANTITY.to_string(),
            unit_price: ZERO_PRICE.to_string(),
            subtotal: Decimal::ZERO,
        }
    }

    /// Creates a line pre-filled from an existing order item.
    pub fn existing(
        item_id: u64,
        product_id: ProductId,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        let mut line = Self {
            item_id: Some(item_id),
            product_id: Some(product_id),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            subtotal: Decimal::ZERO,
        };
        line.recompute_subtotal();
        line
    }

    /// Rounded subtotal as of the last recompute.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Subtotal as displayed in the table.
    pub fn subtotal_text(&self) -> String {
        format_money(self.subtotal)
    }

    pub(crate) fn recompute_subtotal(&mut self) {
        self.subtotal = line_subtotal(&self.quantity, &self.unit_price);
    }
}

impl Default for OrderLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes `round(quantity * unit_price, 2)` from raw field text.
///
/// A product too large for [`Decimal`] counts as zero, like an unreadable field.
pub fn line_subtotal(quantity: &str, unit_price: &str) -> Decimal {
    let product = parse_amount(quantity)
        .checked_mul(parse_amount(unit_price))
        .unwrap_or(Decimal::ZERO);
    round_money(product)
}

/// Sums already-rounded subtotals and rounds the result.
pub fn order_total<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> Decimal {
    let sum = lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal()));
    round_money(sum)
}
