//! Submission payload for the order-creation endpoint.
//!
//! The payload mirrors a posted order form: header fields plus parallel
//! per-line arrays (`item_id`, `product_id`, `quantity`, `unit_price`) and
//! the aggregated `total_amount`.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::money::MONEY_DP;
use super::state::OrderForm;
use crate::error::FieldViolation;
use crate::models::catalog::ProductId;
use crate::models::customer::CustomerId;
use crate::models::order::{OrderStatus, PaymentMethod};
use crate::{OrderDeskError, Result};

/// Order payload ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSubmission {
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
    /// Persisted line ids; `None` for lines added in this session.
    pub item_id: Vec<Option<u64>>,
    pub product_id: Vec<ProductId>,
    pub quantity: Vec<u32>,
    pub unit_price: Vec<Decimal>,
    /// Two-decimal order total, identical to the form's hidden field.
    pub total_amount: String,
}

impl OrderSubmission {
    /// Serializes the payload as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl OrderForm {
    /// Checks the input constraints and builds the submission payload.
    ///
    /// Every violated constraint is reported, not only the first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDeskError::Validation`] listing each failed check.
    pub fn submit(&self) -> Result<OrderSubmission> {
        let mut violations = Vec::new();

        if self.is_empty() {
            violations.push(FieldViolation::order(
                "items",
                "the order must contain at least one item",
            ));
        }
        if self.header().customer_id.is_none() {
            violations.push(FieldViolation::order("customer", "a customer is required"));
        }

        let mut item_id = Vec::with_capacity(self.len());
        let mut product_id = Vec::with_capacity(self.len());
        let mut quantity = Vec::with_capacity(self.len());
        let mut unit_price = Vec::with_capacity(self.len());

        for (index, line) in self.lines().iter().enumerate() {
            match line.product_id {
                Some(id) => product_id.push(id),
                None => violations.push(FieldViolation::line(
                    index,
                    "product",
                    "a product is required",
                )),
            }
            match checked_quantity(&line.quantity) {
                Ok(qty) => quantity.push(qty),
                Err(message) => violations.push(FieldViolation::line(index, "quantity", message)),
            }
            match checked_unit_price(&line.unit_price) {
                Ok(price) => unit_price.push(price),
                Err(message) => violations.push(FieldViolation::line(index, "unit price", message)),
            }
            item_id.push(line.item_id);
        }

        if !violations.is_empty() {
            warn!(violations = violations.len(), "Submission rejected");
            return Err(OrderDeskError::Validation(violations));
        }

        let header = self.header();
        let submission = OrderSubmission {
            // Checked above.
            customer_id: header.customer_id.unwrap_or_default(),
            status: header.status,
            payment_method: header.payment_method,
            notes: header.notes.clone(),
            item_id,
            product_id,
            quantity,
            unit_price,
            total_amount: self.total_field().to_string(),
        };
        info!(
            lines = submission.product_id.len(),
            total = %submission.total_amount,
            "Order ready for submission"
        );
        Ok(submission)
    }
}

/// A quantity must be a whole number of at least one.
fn checked_quantity(text: &str) -> std::result::Result<u32, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("a quantity is required".to_string());
    }
    match trimmed.parse::<u32>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(qty) => Ok(qty),
        Err(_) => Err(format!("{trimmed:?} is not a whole number")),
    }
}

/// A unit price must be a non-negative amount in whole cents.
fn checked_unit_price(text: &str) -> std::result::Result<Decimal, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("a unit price is required".to_string());
    }
    let price = trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| format!("{trimmed:?} is not a valid amount"))?;
    if price < Decimal::ZERO {
        return Err("must not be negative".to_string());
    }
    if price.normalize().scale() > MONEY_DP {
        return Err("must be in steps of 0.01".to_string());
    }
    Ok(price)
}
