//! Composite key addressing a single stock level.

use serde::{Deserialize, Serialize};

use crate::id::{LocationId, ProductId, WarehouseId};

/// Address of one ledger entry: a product at a warehouse location.
///
/// `location_id` is `None` for the warehouse's General Stock (goods not put
/// away to a named location). Ordering is lexicographic over
/// (product, warehouse, location), with General Stock before named locations;
/// batch operations rely on this to acquire per-key locks in a stable order.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StockKey {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub location_id: Option<LocationId>,
}

impl StockKey {
    pub fn new(
        product_id: ProductId,
        warehouse_id: WarehouseId,
        location_id: Option<LocationId>,
    ) -> Self {
        Self {
            product_id,
            warehouse_id,
            location_id,
        }
    }

    /// Key for the warehouse's General Stock.
    pub fn general(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self::new(product_id, warehouse_id, None)
    }
}

impl core::fmt::Display for StockKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.location_id {
            Some(location) => write!(
                f,
                "product {} at {}/{}",
                self.product_id, self.warehouse_id, location
            ),
            None => write!(
                f,
                "product {} at {}/general",
                self.product_id, self.warehouse_id
            ),
        }
    }
}
