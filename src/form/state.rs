//! Order form state and the operations that mutate it.
//!
//! [`OrderForm`] owns the rendered order lines and keeps the order total
//! in step with them: every add, edit and removal recomputes the total
//! before returning.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::line::{OrderLine, ZERO_PRICE, order_total};
use super::money::format_money;
use crate::models::catalog::{Catalog, ProductId};
use crate::models::customer::{Customer, CustomerId};
use crate::models::order::{OrderStatus, PaymentMethod};
use crate::{OrderDeskError, Result};

/// Whether the line table or the empty-state message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// No lines: table hidden, placeholder shown.
    Empty,
    /// At least one line: table shown.
    HasRows,
}

/// Header fields of the order being entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHeader {
    pub customer_id: Option<CustomerId>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// State of one order-entry form.
#[derive(Debug, Clone)]
pub struct OrderForm {
    catalog: Arc<Catalog>,
    customers: Arc<Vec<Customer>>,
    header: OrderHeader,
    lines: Vec<OrderLine>,
    total: Decimal,
    total_display: String,
    total_field: String,
}

impl OrderForm {
    /// Creates an empty form over the given catalog.
    pub fn new(catalog: Arc<Catalog>, customers: Arc<Vec<Customer>>) -> Self {
        let mut form = Self {
            catalog,
            customers,
            header: OrderHeader::default(),
            lines: Vec::new(),
            total: Decimal::ZERO,
            total_display: String::new(),
            total_field: String::new(),
        };
        form.recompute_total();
        form
    }

    /// Creates a form pre-filled with the lines of an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDeskError::UnknownProduct`] if a line references a
    /// product missing from the catalog.
    pub fn with_lines(
        catalog: Arc<Catalog>,
        customers: Arc<Vec<Customer>>,
        header: OrderHeader,
        lines: Vec<OrderLine>,
    ) -> Result<Self> {
        if let Some(id) = lines
            .iter()
            .filter_map(|l| l.product_id)
            .find(|id| catalog.get(*id).is_none())
        {
            return Err(OrderDeskError::UnknownProduct(id));
        }

        let mut form = Self::new(catalog, customers);
        form.header = header;
        form.lines = lines;
        for line in &mut form.lines {
            line.recompute_subtotal();
        }
        form.recompute_total();
        info!(lines = form.lines.len(), "Loaded existing order lines");
        Ok(form)
    }

    // -- Row lifecycle --

    /// Appends an empty line and returns its position.
    pub fn add_row(&mut self) -> usize {
        let was_empty = self.lines.is_empty();
        self.lines.push(OrderLine::new());
        let index = self.lines.len() - 1;
        if was_empty {
            debug!("Line table shown");
        }
        info!(row = index, "Row added");
        self.recompute_total();
        index
    }

    /// Removes the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDeskError::RowNotFound`] if there is no such line.
    pub fn remove_row(&mut self, index: usize) -> Result<OrderLine> {
        if index >= self.lines.len() {
            warn!(row = index, rows = self.lines.len(), "Remove of missing row");
            return Err(OrderDeskError::RowNotFound(index));
        }
        let removed = self.lines.remove(index);
        info!(row = index, "Row removed");
        if self.lines.is_empty() {
            debug!("Line table hidden");
        }
        self.recompute_total();
        Ok(removed)
    }

    // -- Price and subtotal updates --

    /// Sets or clears the product of a line.
    ///
    /// Selecting a product copies its selling price into the line; clearing
    /// the selection resets the price to `0.00`. The subtotal and order
    /// total are recomputed either way.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDeskError::RowNotFound`] or
    /// [`OrderDeskError::UnknownProduct`]; the line is left untouched.
    pub fn select_product(&mut self, index: usize, product_id: Option<ProductId>) -> Result<()> {
        let price = match product_id {
            Some(id) => match self.catalog.get(id) {
                Some(product) => format_money(product.selling_price),
                None => {
                    warn!(row = index, product_id = id, "Unknown product selected");
                    return Err(OrderDeskError::UnknownProduct(id));
                }
            },
            None => ZERO_PRICE.to_string(),
        };

        let line = self.line_mut(index)?;
        line.product_id = product_id;
        line.unit_price = price;
        debug!(row = index, ?product_id, price = %line.unit_price, "Product selected");
        self.field_edited(index)
    }

    /// Replaces the quantity text of a line.
    pub fn edit_quantity(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.line_mut(index)?.quantity = text.into();
        self.field_edited(index)
    }

    /// Replaces the unit price text of a line.
    pub fn edit_unit_price(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.line_mut(index)?.unit_price = text.into();
        self.field_edited(index)
    }

    /// Recomputes the subtotal of one line, then the order total.
    pub fn field_edited(&mut self, index: usize) -> Result<()> {
        let line = self.line_mut(index)?;
        line.recompute_subtotal();
        debug!(row = index, subtotal = %line.subtotal(), "Subtotal recomputed");
        self.recompute_total();
        Ok(())
    }

    // -- Total aggregation --

    /// Sums every line subtotal into the displayed and submitted total.
    pub fn recompute_total(&mut self) {
        self.total = order_total(&self.lines);
        let text = format_money(self.total);
        self.total_field.clone_from(&text);
        self.total_display = text;
        debug!(total = %self.total_display, rows = self.lines.len(), "Total recomputed");
    }

    // -- Header --

    /// Selects (or clears) the customer.
    pub fn select_customer(&mut self, customer_id: Option<CustomerId>) -> Result<()> {
        if let Some(id) = customer_id
            && !self.customers.iter().any(|c| c.id == id)
        {
            return Err(OrderDeskError::Catalog(format!("unknown customer {id}")));
        }
        self.header.customer_id = customer_id;
        Ok(())
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.header.status = status;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.header.payment_method = method;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.header.notes = notes.into();
    }

    // -- Accessors --

    pub fn visibility(&self) -> Visibility {
        if self.lines.is_empty() {
            Visibility::Empty
        } else {
            Visibility::HasRows
        }
    }

    pub fn table_visible(&self) -> bool {
        self.visibility() == Visibility::HasRows
    }

    pub fn empty_message_visible(&self) -> bool {
        self.visibility() == Visibility::Empty
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&OrderLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Total as shown next to the table.
    pub fn total_display(&self) -> &str {
        &self.total_display
    }

    /// Total as carried by the submission payload.
    pub fn total_field(&self) -> &str {
        &self.total_field
    }

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Name of the selected customer, if any.
    pub fn customer_name(&self) -> Option<&str> {
        let id = self.header.customer_id?;
        self.customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut OrderLine> {
        self.lines
            .get_mut(index)
            .ok_or(OrderDeskError::RowNotFound(index))
    }
}
