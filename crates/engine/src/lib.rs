//! `depot-engine`: transaction orchestration over injected backends.
//!
//! The [`TransactionEngine`] builds, validates, finalizes and cancels stock
//! transactions and computes reorder suggestions; [`TransactionHistory`] is
//! the matching read side. Both are generic over the storage contracts from
//! `depot-catalog`, `depot-ledger` and `depot-transactions`, so the same
//! code runs against the in-memory backends in `depot-infra` and against
//! real ones.

pub mod engine;
pub mod history;
pub mod reorder;

pub use engine::TransactionEngine;
pub use history::{TransactionHistory, TransactionSummary};
pub use reorder::{PlannedReorder, ReorderSuggestion, suggested_quantity};
