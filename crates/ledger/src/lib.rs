//! `depot-ledger`: the stock ledger contract and its pure helpers.
//!
//! Defines what a stock ledger *is* (the [`StockLedger`] trait and its row
//! and delta types) plus the pure aggregation used by every implementation
//! and by read-side callers. Backends live elsewhere; the in-memory
//! reference implementation ships with `depot-infra`.

pub mod level;
pub mod store;

pub use level::{StockDelta, StockLevel, net_deltas, total_quantity, warehouse_total};
pub use store::StockLedger;
