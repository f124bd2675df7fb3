//! Crate-level error types.
//!
//! [`OrderDeskError`] unifies every error source (configuration, terminal
//! I/O, catalog loading, form operations) behind a single enum so callers
//! can match on the variant they care about while still using `?`.

use std::fmt;

use crate::models::catalog::ProductId;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderDeskError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OrderDeskError {
    /// A required environment variable is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The product catalog (or customer list) is unusable.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A row operation referenced a position that is not rendered.
    #[error("no order line at position {0}")]
    RowNotFound(usize),

    /// A product id that is not part of the catalog was selected.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The form failed its pre-submission checks.
    #[error("order cannot be submitted: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
}

/// A single failed input constraint found while preparing a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// 1-based row number, or `None` for order-level fields.
    pub row: Option<usize>,
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub(crate) fn order(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            row: None,
            field,
            message: message.into(),
        }
    }

    pub(crate) fn line(index: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            row: Some(index + 1),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {row} {}: {}", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<std::io::Error> for OrderDeskError {
    fn from(err: std::io::Error) -> Self {
        OrderDeskError::Io(err.to_string())
    }
}
