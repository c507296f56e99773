//! In-memory stock ledger backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use depot_core::{DomainError, DomainResult, ProductId, StockKey};
use depot_ledger::{StockDelta, StockLedger, StockLevel, net_deltas};

/// In-memory implementation of [`StockLedger`].
///
/// Intended for tests/dev. Not optimized for performance.
///
/// Each stock key owns an independent quantity cell behind its own mutex, so
/// batches over disjoint key sets commit in parallel. A batch nets its deltas
/// per key, takes the affected cell locks in key order, verifies that every
/// cell stays non-negative, and only then writes. Overlapping batches
/// serialize on their shared cells; the stable lock order rules out
/// deadlocks between them.
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    levels: RwLock<HashMap<StockKey, Arc<Mutex<i64>>>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StockLedger for InMemoryStockLedger {
    fn get_quantity(&self, key: &StockKey) -> DomainResult<i64> {
        let levels = self
            .levels
            .read()
            .map_err(|_| DomainError::storage("stock ledger lock poisoned"))?;
        match levels.get(key) {
            Some(cell) => {
                let quantity = cell
                    .lock()
                    .map_err(|_| DomainError::storage("stock level lock poisoned"))?;
                Ok(*quantity)
            }
            None => Ok(0),
        }
    }

    fn list_by_product(&self, product_id: ProductId) -> DomainResult<Vec<StockLevel>> {
        let levels = self
            .levels
            .read()
            .map_err(|_| DomainError::storage("stock ledger lock poisoned"))?;
        let mut rows = Vec::new();
        for (key, cell) in levels.iter() {
            if key.product_id != product_id {
                continue;
            }
            let quantity = cell
                .lock()
                .map_err(|_| DomainError::storage("stock level lock poisoned"))?;
            rows.push(StockLevel::new(*key, *quantity));
        }
        rows.sort_by_key(|row| row.key);
        Ok(rows)
    }

    fn apply_deltas(&self, deltas: &[StockDelta]) -> DomainResult<()> {
        let net = net_deltas(deltas);
        if net.is_empty() {
            return Ok(());
        }

        // 1) Materialize a cell per affected key. Cells are created lazily
        //    here and never removed, so each key's Arc identity is stable.
        let cells: Vec<(StockKey, i64, Arc<Mutex<i64>>)> = {
            let mut levels = self
                .levels
                .write()
                .map_err(|_| DomainError::storage("stock ledger lock poisoned"))?;
            net.into_iter()
                .map(|(key, change)| {
                    let cell = Arc::clone(levels.entry(key).or_default());
                    (key, change, cell)
                })
                .collect()
        };

        // 2) Take every affected cell lock. `net_deltas` iterates in key
        //    order, so concurrent batches acquire overlapping locks in the
        //    same order.
        let mut guards = Vec::with_capacity(cells.len());
        for (key, change, cell) in &cells {
            let guard = cell
                .lock()
                .map_err(|_| DomainError::storage("stock level lock poisoned"))?;
            guards.push((*key, *change, guard));
        }

        // 3) Check the whole batch before writing any of it. The first
        //    violation in key order rejects the batch and releases every
        //    lock with all quantities untouched.
        for (key, change, guard) in &guards {
            if **guard + *change < 0 {
                return Err(DomainError::insufficient_stock(*key, **guard, -*change));
            }
        }

        // 4) Commit.
        for (_, change, guard) in &mut guards {
            **guard += *change;
        }

        Ok(())
    }
}
