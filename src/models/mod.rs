//! Externally supplied data the order form reads.
//!
//! The product catalog and customer list arrive as JSON arrays; order
//! header choices are fixed enums.

pub mod catalog;
pub mod customer;
pub mod order;

pub use catalog::{Catalog, Product, ProductId};
pub use customer::{Customer, CustomerId};
pub use order::{OrderStatus, PaymentMethod};
