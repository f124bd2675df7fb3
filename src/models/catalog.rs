//! Product catalog models.
//!
//! The catalog is supplied externally as a JSON array of products and is
//! read-only to the form.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OrderDeskError, Result};

/// Catalog identifier of a product.
pub type ProductId = u32;

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    /// Price copied into an order line when the product is selected.
    pub selling_price: Decimal,
    /// Units on hand. Informational only.
    #[serde(default)]
    pub stock_quantity: i64,
}

impl Product {
    /// Returns the text shown for this product in a product selector.
    pub fn option_label(&self) -> String {
        format!(
            "{} ({}) - stock: {}",
            self.name, self.sku, self.stock_quantity
        )
    }
}

/// Ordered, read-only list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDeskError::Catalog`] on duplicate ids or negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(OrderDeskError::Catalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if product.selling_price < Decimal::ZERO {
                return Err(OrderDeskError::Catalog(format!(
                    "product {} has a negative selling price",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parses a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            OrderDeskError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Returns the position of a product in selector order.
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: ProductId, price: Decimal) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            sku: format!("SKU-{id}"),
            selling_price: price,
            stock_quantity: 5,
        }
    }

    #[test]
    fn option_label_includes_sku_and_stock() {
        let p = product(7, dec!(1.50));
        assert_eq!(p.option_label(), "Product 7 (SKU-7) - stock: 5");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![product(1, dec!(1)), product(1, dec!(2))]).unwrap_err();
        assert!(err.to_string().contains("duplicate product id 1"));
    }

    #[test]
    fn rejects_negative_price() {
        assert!(Catalog::new(vec![product(1, dec!(-0.01))]).is_err());
    }

    #[test]
    fn lookup_by_id_and_position() {
        let catalog = Catalog::new(vec![product(4, dec!(1)), product(9, dec!(2))]).unwrap();
        assert_eq!(catalog.get(9).map(|p| p.selling_price), Some(dec!(2)));
        assert_eq!(catalog.position(9), Some(1));
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn parses_numeric_prices_and_missing_stock() {
        let json = r#"[{"id": 1, "name": "Tea", "sku": "T-1", "selling_price": 19.99}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let tea = catalog.get(1).unwrap();
        assert_eq!(tea.selling_price, dec!(19.99));
        assert_eq!(tea.stock_quantity, 0);
    }
}
