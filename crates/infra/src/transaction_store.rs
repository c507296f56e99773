//! In-memory transaction repository backend.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use depot_core::{DomainError, DomainResult, TransactionId};
use depot_transactions::{
    Transaction, TransactionFilter, TransactionRepository, TransactionStatus,
};

/// In-memory implementation of [`TransactionRepository`].
///
/// Intended for tests/dev. Not optimized for performance.
///
/// `transition_status` runs entirely under the map's write lock, so the
/// compare-and-swap is atomic with respect to every other status writer.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    documents: RwLock<HashMap<TransactionId, Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn save(&self, transaction: &Transaction) -> DomainResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DomainError::storage("transaction store lock poisoned"))?;
        documents.insert(transaction.id(), transaction.clone());
        Ok(())
    }

    fn get(&self, id: TransactionId) -> DomainResult<Transaction> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DomainError::storage("transaction store lock poisoned"))?;
        documents
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("transaction", id))
    }

    fn list(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DomainError::storage("transaction store lock poisoned"))?;
        let mut matching: Vec<Transaction> = documents
            .values()
            .filter(|transaction| filter.matches(transaction))
            .cloned()
            .collect();
        // Most recent first; time-ordered ids break created_at ties.
        matching.sort_by(|a, b| (b.created_at(), b.id()).cmp(&(a.created_at(), a.id())));
        Ok(matching)
    }

    fn transition_status(
        &self,
        id: TransactionId,
        expected: TransactionStatus,
        next: TransactionStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Transaction> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DomainError::storage("transaction store lock poisoned"))?;
        let stored = documents
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("transaction", id))?;

        if stored.status() != expected {
            return Err(DomainError::invalid_state(format!(
                "expected a {expected} transaction, found {}",
                stored.status()
            )));
        }

        match next {
            TransactionStatus::Completed => stored.complete(at)?,
            TransactionStatus::Cancelled => stored.cancel()?,
            TransactionStatus::Draft => {
                return Err(DomainError::invalid_state(
                    "cannot transition a transaction back to draft",
                ));
            }
        }

        Ok(stored.clone())
    }
}
