use std::sync::Arc;

use depot_core::{DomainResult, ProductId, StockKey};

use crate::level::{StockDelta, StockLevel};

/// Keyed store of on-hand stock: (product, warehouse, location) → quantity.
///
/// The single source of truth for current stock. Entries are created lazily
/// on the first movement into a key and are never deleted, only zeroed. All
/// writes flow through [`apply_deltas`](StockLedger::apply_deltas); in the
/// full system only the engine's finalize step reaches it.
///
/// ## Apply semantics
///
/// A batch commits atomically: implementations must net the batch per key,
/// verify that every affected entry stays non-negative, and only then write.
/// On a violation the whole batch is rejected with
/// `DomainError::InsufficientStock` naming the first violating key in key
/// order, and no entry changes. Concurrent batches over disjoint key sets may
/// proceed in parallel; overlapping batches serialize, and the later one is
/// checked against the post-update quantities.
pub trait StockLedger: Send + Sync {
    /// Current quantity at a key; 0 when no entry exists.
    fn get_quantity(&self, key: &StockKey) -> DomainResult<i64>;

    /// Every entry holding the product, across warehouses and locations,
    /// sorted by key.
    fn list_by_product(&self, product_id: ProductId) -> DomainResult<Vec<StockLevel>>;

    /// Atomically apply a batch of deltas (all or nothing).
    fn apply_deltas(&self, deltas: &[StockDelta]) -> DomainResult<()>;
}

impl<L> StockLedger for Arc<L>
where
    L: StockLedger + ?Sized,
{
    fn get_quantity(&self, key: &StockKey) -> DomainResult<i64> {
        (**self).get_quantity(key)
    }

    fn list_by_product(&self, product_id: ProductId) -> DomainResult<Vec<StockLevel>> {
        (**self).list_by_product(product_id)
    }

    fn apply_deltas(&self, deltas: &[StockDelta]) -> DomainResult<()> {
        (**self).apply_deltas(deltas)
    }
}
