//! Read side: transaction listings and activity summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{DomainResult, TransactionId};
use depot_transactions::{
    Transaction, TransactionFilter, TransactionKind, TransactionRepository, TransactionStatus,
};

/// Condensed view of a transaction for lists and activity feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TransactionSummary {
    pub fn of(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id(),
            kind: transaction.movement().kind(),
            status: transaction.status(),
            reference: transaction.reference().map(str::to_owned),
            item_count: transaction.items().len(),
            total_quantity: transaction.items().iter().map(|i| i.quantity).sum(),
            created_at: transaction.created_at(),
            completed_at: transaction.completed_at(),
        }
    }
}

/// Read-only queries over the transaction repository.
///
/// Listing and summarizing only; nothing here mutates documents or stock.
#[derive(Debug)]
pub struct TransactionHistory<R> {
    repository: R,
}

impl<R> TransactionHistory<R>
where
    R: TransactionRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Matching transactions, most recent first.
    pub fn transactions(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>> {
        self.repository.list(filter)
    }

    /// Condensed summaries, most recent first.
    pub fn summaries(&self, filter: &TransactionFilter) -> DomainResult<Vec<TransactionSummary>> {
        Ok(self
            .repository
            .list(filter)?
            .iter()
            .map(TransactionSummary::of)
            .collect())
    }
}
