//! Reorder policy: how much to buy when stock runs low.

use serde::{Deserialize, Serialize};

use depot_core::{ProductId, WarehouseId};
use depot_transactions::Transaction;

/// Quantity that brings a warehouse up to twice the product's minimum stock.
///
/// Clamped at zero: a warehouse at or above target needs nothing.
pub fn suggested_quantity(min_stock: i64, current_stock: i64) -> i64 {
    (min_stock * 2 - current_stock).max(0)
}

/// Reorder policy outcome for one product at one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub min_stock: i64,
    pub current_stock: i64,
    pub suggested_qty: i64,
}

/// A suggestion materialized as a draft inbound transaction.
///
/// The draft is persisted but not finalized; callers may adjust its quantity
/// with `update` before committing it through `finalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedReorder {
    pub suggestion: ReorderSuggestion,
    pub transaction: Transaction,
}
