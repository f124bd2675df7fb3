//! Order-entry form library and terminal front end.
//!
//! Holds the order lines of a new sales order, keeps per-line subtotals
//! and the order total in sync with every edit, and produces the payload
//! posted to the order-creation endpoint.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod tui;

pub use error::{FieldViolation, OrderDeskError, Result};
