//! Transaction execution pipeline (application-level orchestration).
//!
//! The engine composes the three storage contracts (catalog, stock ledger,
//! transaction repository) and runs every lifecycle operation through one
//! consistent pipeline:
//!
//! ```text
//! create / update                    finalize
//!   ↓                                  ↓
//! 1. Structural validation           1. Fetch document (per-id lock held)
//!   ↓                                  ↓
//! 2. Catalog resolution              2. Draft status guard
//!   ↓                                  ↓
//! 3. Feasibility pre-check           3. Atomic delta application (ledger)
//!   ↓                                  ↓
//! 4. Persist Draft                   4. Status CAS Draft → Completed
//! ```
//!
//! ## Execution guarantees
//!
//! - **Exactly-once stock effect**: `finalize` serializes per transaction id
//!   and the repository's compare-and-swap is the final guarded write, so a
//!   racing second finalize observes Completed and fails with `InvalidState`
//!   instead of re-applying the deltas.
//! - **No partial effects**: a failed feasibility check during finalize
//!   happens inside the ledger's atomic batch; the document stays Draft and
//!   no stock level changes.
//! - **Synchronous contract**: every call returns success or a domain error;
//!   there are no retries and no background work.
//!
//! The engine itself holds no stock state. Backends are injected, so tests
//! run against in-memory implementations and real ones slot in behind the
//! same traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use depot_catalog::CatalogReference;
use depot_core::{DomainError, DomainResult, ProductId, TransactionId, WarehouseId};
use depot_ledger::{StockDelta, StockLedger, net_deltas, warehouse_total};
use depot_transactions::{
    AdjustmentDirection, DraftUpdate, Movement, NewTransaction, Transaction, TransactionItem,
    TransactionRepository, TransactionStatus,
};

use crate::reorder::{PlannedReorder, ReorderSuggestion, suggested_quantity};

/// Per-transaction lock registry.
///
/// Serializes update/finalize/cancel per transaction id so the Draft status
/// check and the stock effect commit as one step. Entries are only
/// load-bearing while the document is Draft; they are dropped once it
/// reaches a terminal status.
#[derive(Debug, Default)]
struct TransactionLocks {
    inner: Mutex<HashMap<TransactionId, Arc<Mutex<()>>>>,
}

impl TransactionLocks {
    fn acquire(&self, id: TransactionId) -> DomainResult<Arc<Mutex<()>>> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| DomainError::storage("transaction lock registry poisoned"))?;
        Ok(Arc::clone(map.entry(id).or_default()))
    }

    fn forget(&self, id: TransactionId) {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(&id);
        }
    }
}

/// Orchestrates the transaction lifecycle against injected backends.
///
/// Generic over the catalog (`C`), stock ledger (`L`) and transaction
/// repository (`R`) contracts; share one engine across threads via `Arc`.
#[derive(Debug)]
pub struct TransactionEngine<C, L, R> {
    catalog: C,
    ledger: L,
    repository: R,
    locks: TransactionLocks,
}

impl<C, L, R> TransactionEngine<C, L, R> {
    pub fn new(catalog: C, ledger: L, repository: R) -> Self {
        Self {
            catalog,
            ledger,
            repository,
            locks: TransactionLocks::default(),
        }
    }
}

impl<C, L, R> TransactionEngine<C, L, R>
where
    C: CatalogReference,
    L: StockLedger,
    R: TransactionRepository,
{
    /// Validate and persist a new Draft transaction.
    ///
    /// Nothing is persisted on failure, and no stock moves until
    /// [`finalize`](Self::finalize).
    pub fn create(&self, new: NewTransaction) -> DomainResult<Transaction> {
        // 1) Structure: movement shape and item list
        let mut transaction = Transaction::draft(new.movement, new.items, Utc::now())?;
        if let Some(reference) = new.reference {
            transaction = transaction.with_reference(reference);
        }
        if let Some(notes) = new.notes {
            transaction = transaction.with_notes(notes);
        }

        // 2) Referents must exist in the catalog
        self.resolve_referents(&transaction)?;

        // 3) Outbound components must be coverable by current stock
        self.check_feasibility(&transaction.deltas())?;

        // 4) Persist as Draft
        self.repository.save(&transaction)?;
        tracing::debug!(
            "created {} transaction {}",
            transaction.movement().kind(),
            transaction.id()
        );
        Ok(transaction)
    }

    /// Draft an inbound receipt into a warehouse.
    pub fn receive(
        &self,
        warehouse_id: WarehouseId,
        items: Vec<TransactionItem>,
    ) -> DomainResult<Transaction> {
        self.create(NewTransaction::new(Movement::In { warehouse_id }, items))
    }

    /// Draft an outbound delivery from a warehouse.
    pub fn ship(
        &self,
        warehouse_id: WarehouseId,
        items: Vec<TransactionItem>,
    ) -> DomainResult<Transaction> {
        self.create(NewTransaction::new(Movement::Out { warehouse_id }, items))
    }

    /// Draft a transfer between two warehouses.
    pub fn transfer(
        &self,
        source_warehouse_id: WarehouseId,
        destination_warehouse_id: WarehouseId,
        items: Vec<TransactionItem>,
    ) -> DomainResult<Transaction> {
        self.create(NewTransaction::new(
            Movement::Transfer {
                source_warehouse_id,
                destination_warehouse_id,
            },
            items,
        ))
    }

    /// Draft a signed stock adjustment within one warehouse.
    pub fn adjust(
        &self,
        warehouse_id: WarehouseId,
        direction: AdjustmentDirection,
        items: Vec<TransactionItem>,
    ) -> DomainResult<Transaction> {
        self.create(NewTransaction::new(
            Movement::Adjust {
                warehouse_id,
                direction,
            },
            items,
        ))
    }

    /// Replace a Draft's items and notes, re-running creation validation.
    pub fn update(&self, id: TransactionId, update: DraftUpdate) -> DomainResult<Transaction> {
        let lock = self.locks.acquire(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| DomainError::storage("transaction lock poisoned"))?;

        let mut transaction = self.repository.get(id)?;
        transaction.replace_items(update.items)?;
        transaction.set_notes(update.notes)?;

        self.resolve_referents(&transaction)?;
        self.check_feasibility(&transaction.deltas())?;

        self.repository.save(&transaction)?;
        Ok(transaction)
    }

    /// Commit a Draft's stock effect and mark it Completed.
    ///
    /// Re-checks feasibility against *current* stock inside the ledger's
    /// atomic batch; on `InsufficientStock` the document stays Draft and no
    /// level changes. A concurrent second finalize of the same id fails with
    /// `InvalidState` after the first commits.
    pub fn finalize(&self, id: TransactionId) -> DomainResult<Transaction> {
        let lock = self.locks.acquire(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| DomainError::storage("transaction lock poisoned"))?;

        // 1) Fetch and guard status
        let transaction = self.repository.get(id)?;
        if !transaction.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "cannot finalize a {} transaction",
                transaction.status()
            )));
        }

        // 2) Apply the whole delta batch atomically (feasibility inside)
        let deltas = transaction.deltas();
        self.ledger.apply_deltas(&deltas)?;

        // 3) Flip status through the guarded write
        let completed = match self.repository.transition_status(
            id,
            TransactionStatus::Draft,
            TransactionStatus::Completed,
            Utc::now(),
        ) {
            Ok(updated) => updated,
            Err(err) => {
                // Unreachable while every status writer goes through the
                // per-id lock. If a writer bypassed the engine, unwind the
                // stock effect so the ledger matches the stored status.
                let inverse: Vec<_> = deltas.iter().map(StockDelta::inverted).collect();
                if let Err(revert) = self.ledger.apply_deltas(&inverse) {
                    tracing::error!(
                        "failed to revert stock after status conflict on {id}: {revert}"
                    );
                }
                return Err(err);
            }
        };

        self.locks.forget(id);
        tracing::info!(
            "finalized {} transaction {} ({} items)",
            completed.movement().kind(),
            id,
            completed.items().len()
        );
        Ok(completed)
    }

    /// Discard a Draft: Draft → Cancelled, no stock effect ever.
    pub fn cancel(&self, id: TransactionId) -> DomainResult<Transaction> {
        let lock = self.locks.acquire(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| DomainError::storage("transaction lock poisoned"))?;

        let transaction = self.repository.get(id)?;
        if !transaction.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "cannot cancel a {} transaction",
                transaction.status()
            )));
        }

        let cancelled = self.repository.transition_status(
            id,
            TransactionStatus::Draft,
            TransactionStatus::Cancelled,
            Utc::now(),
        )?;
        self.locks.forget(id);
        tracing::debug!("cancelled transaction {id}");
        Ok(cancelled)
    }

    /// Compute a replenishment suggestion and materialize it as a Draft
    /// inbound transaction.
    ///
    /// "Current stock" is the warehouse-scoped total over all of that
    /// warehouse's locations, General Stock included. Fails with
    /// `Validation` when the warehouse already meets the reorder target
    /// (a zero-quantity item is not representable).
    pub fn suggest_reorder(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<PlannedReorder> {
        let product = self.catalog.resolve_product(product_id)?;
        self.catalog.resolve_warehouse(warehouse_id)?;

        let levels = self.ledger.list_by_product(product_id)?;
        let current_stock = warehouse_total(&levels, warehouse_id);
        let suggested_qty = suggested_quantity(product.min_stock, current_stock);

        if suggested_qty == 0 {
            return Err(DomainError::validation(format!(
                "stock for product {product_id} already meets the reorder target"
            )));
        }

        let transaction = self.create(NewTransaction::new(
            Movement::In { warehouse_id },
            vec![TransactionItem::new(product_id, suggested_qty)],
        ))?;

        Ok(PlannedReorder {
            suggestion: ReorderSuggestion {
                product_id,
                warehouse_id,
                min_stock: product.min_stock,
                current_stock,
                suggested_qty,
            },
            transaction,
        })
    }

    /// Every catalog referent of the document must resolve, and named item
    /// locations must belong to the movement's warehouse (the source side
    /// for transfers).
    fn resolve_referents(&self, transaction: &Transaction) -> DomainResult<()> {
        let movement = transaction.movement();
        for warehouse_id in movement.warehouse_ids() {
            self.catalog.resolve_warehouse(warehouse_id)?;
        }

        let location_warehouse = movement.location_warehouse();
        for item in transaction.items() {
            self.catalog.resolve_product(item.product_id)?;
            if let Some(location_id) = item.location_id {
                let location = self.catalog.resolve_location(location_id)?;
                if location.warehouse_id != location_warehouse {
                    return Err(DomainError::validation(format!(
                        "location {location_id} does not belong to warehouse {location_warehouse}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Read-only feasibility pre-check: every net-negative key must be
    /// covered by current stock. The authoritative check runs again inside
    /// `apply_deltas` during finalize.
    fn check_feasibility(&self, deltas: &[StockDelta]) -> DomainResult<()> {
        for (key, change) in net_deltas(deltas) {
            if change < 0 {
                let available = self.ledger.get_quantity(&key)?;
                if available + change < 0 {
                    return Err(DomainError::insufficient_stock(key, available, -change));
                }
            }
        }
        Ok(())
    }
}
