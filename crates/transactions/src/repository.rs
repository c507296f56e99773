use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{DomainResult, TransactionId};

use crate::movement::TransactionKind;
use crate::transaction::{Transaction, TransactionStatus};

/// Filter for transaction listings. Empty filter matches everything.
///
/// The date range applies to `created_at` and is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub status: Option<TransactionStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.movement().kind() != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if transaction.status() != status {
                return false;
            }
        }
        if let Some(from) = self.from {
            if transaction.created_at() < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if transaction.created_at() > to {
                return false;
            }
        }
        true
    }
}

/// Durable storage of transaction documents, keyed by id.
///
/// ## Status transitions
///
/// `transition_status` is the only way a stored document's status changes:
/// a compare-and-swap that fails with `InvalidState` when the stored status
/// no longer matches `expected`. The engine leans on this so a transaction's
/// stock effect cannot be committed twice even if two callers race on the
/// same id.
pub trait TransactionRepository: Send + Sync {
    /// Insert or replace a document by id.
    fn save(&self, transaction: &Transaction) -> DomainResult<()>;

    /// Fetch by id; `NotFound` if absent.
    fn get(&self, id: TransactionId) -> DomainResult<Transaction>;

    /// Matching documents, most recent first.
    fn list(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>>;

    /// Compare-and-swap status flip; returns the updated document.
    ///
    /// `at` is recorded as the completion time when `next` is Completed.
    fn transition_status(
        &self,
        id: TransactionId,
        expected: TransactionStatus,
        next: TransactionStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Transaction>;
}

impl<R> TransactionRepository for Arc<R>
where
    R: TransactionRepository + ?Sized,
{
    fn save(&self, transaction: &Transaction) -> DomainResult<()> {
        (**self).save(transaction)
    }

    fn get(&self, id: TransactionId) -> DomainResult<Transaction> {
        (**self).get(id)
    }

    fn list(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>> {
        (**self).list(filter)
    }

    fn transition_status(
        &self,
        id: TransactionId,
        expected: TransactionStatus,
        next: TransactionStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Transaction> {
        (**self).transition_status(id, expected, next, at)
    }
}
