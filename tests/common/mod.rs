//! Shared test utilities and fixtures.

use std::sync::Arc;

use orderdesk::form::OrderForm;
use orderdesk::models::catalog::Catalog;
use orderdesk::models::customer::{Customer, customers_from_json};

pub const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");
pub const CUSTOMERS_JSON: &str = include_str!("../fixtures/customers.json");

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json(CATALOG_JSON).expect("fixture catalog must parse"))
}

pub fn customers() -> Arc<Vec<Customer>> {
    Arc::new(customers_from_json(CUSTOMERS_JSON).expect("fixture customers must parse"))
}

/// An empty form over the fixture catalog and customers.
pub fn empty_form() -> OrderForm {
    OrderForm::new(catalog(), customers())
}
