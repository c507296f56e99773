use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, ProductId};

/// Stock position of a product relative to its minimum-stock policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Catalog record: Product.
///
/// Reference data owned by the catalog. The transaction engine reads the
/// minimum-stock policy and unit of measure; it never creates or mutates
/// products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    /// Unit of measure, e.g. "pcs", "kg", "box".
    pub uom: String,
    /// Replenishment threshold. Reorder suggestions target twice this value.
    pub min_stock: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub price: Option<u64>,
    pub active: bool,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        uom: impl Into<String>,
        min_stock: i64,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        let name = name.into();
        let uom = uom.into();

        if sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if uom.trim().is_empty() {
            return Err(DomainError::validation("unit of measure cannot be empty"));
        }
        if min_stock < 0 {
            return Err(DomainError::validation("min_stock cannot be negative"));
        }

        Ok(Self {
            id: ProductId::new(),
            sku,
            name,
            category: None,
            uom,
            min_stock,
            price: None,
            active: true,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Classify an on-hand total against this product's minimum-stock policy.
    pub fn stock_status(&self, on_hand: i64) -> StockStatus {
        if on_hand <= 0 {
            StockStatus::OutOfStock
        } else if on_hand <= self.min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(min_stock: i64) -> Product {
        Product::new("SKU-001", "Test Product", "pcs", min_stock).unwrap()
    }

    #[test]
    fn new_product_is_active_by_default() {
        let product = test_product(10);
        assert!(product.active);
        assert_eq!(product.category, None);
        assert_eq!(product.price, None);
    }

    #[test]
    fn rejects_empty_sku() {
        let err = Product::new("   ", "Test Product", "pcs", 10).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty SKU"),
        }
    }

    #[test]
    fn rejects_empty_name() {
        let err = Product::new("SKU-001", "", "pcs", 10).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn rejects_negative_min_stock() {
        let err = Product::new("SKU-001", "Test Product", "pcs", -1).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("min_stock") => {}
            _ => panic!("Expected Validation error for negative min_stock"),
        }
    }

    #[test]
    fn stock_status_boundaries() {
        let product = test_product(20);
        assert_eq!(product.stock_status(0), StockStatus::OutOfStock);
        assert_eq!(product.stock_status(1), StockStatus::LowStock);
        assert_eq!(product.stock_status(20), StockStatus::LowStock);
        assert_eq!(product.stock_status(21), StockStatus::InStock);
    }

    #[test]
    fn zero_min_stock_never_reports_low() {
        let product = test_product(0);
        assert_eq!(product.stock_status(0), StockStatus::OutOfStock);
        assert_eq!(product.stock_status(1), StockStatus::InStock);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the three status classes partition the on-hand axis.
            #[test]
            fn stock_status_is_total_and_consistent(
                min_stock in 0i64..10_000,
                on_hand in -1_000i64..100_000
            ) {
                let product = Product::new("SKU-001", "Test Product", "pcs", min_stock).unwrap();
                let status = product.stock_status(on_hand);
                match status {
                    StockStatus::OutOfStock => prop_assert!(on_hand <= 0),
                    StockStatus::LowStock => prop_assert!(on_hand > 0 && on_hand <= min_stock),
                    StockStatus::InStock => prop_assert!(on_hand > min_stock),
                }
            }
        }
    }
}
