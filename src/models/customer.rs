//! Customer list used to fill the customer selector.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{OrderDeskError, Result};

/// Identifier of a customer record.
pub type CustomerId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Parses a JSON array of customers.
pub fn customers_from_json(json: &str) -> Result<Vec<Customer>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a customer list file.
pub fn load_customers(path: &Path) -> Result<Vec<Customer>> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        OrderDeskError::Catalog(format!("failed to read {}: {e}", path.display()))
    })?;
    let customers = customers_from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        customers = customers.len(),
        "Loaded customer list"
    );
    Ok(customers)
}
