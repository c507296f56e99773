//! `depot-transactions`: the stock transaction document model.
//!
//! A [`Transaction`] records one movement of goods (in, out, transfer or
//! adjustment) as a multi-item document with a monotonic lifecycle. The
//! document knows its own rules: what makes it structurally valid, which
//! status transitions exist, and which ledger deltas completing it would
//! apply. Orchestration (feasibility checks, atomic application) lives in
//! `depot-engine`; persistence behind [`TransactionRepository`].

pub mod movement;
pub mod repository;
pub mod transaction;

pub use movement::{AdjustmentDirection, Movement, TransactionKind};
pub use repository::{TransactionFilter, TransactionRepository};
pub use transaction::{
    DraftUpdate, NewTransaction, Transaction, TransactionItem, TransactionStatus,
};
