//! `depot-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the stock addressing key, and the shared error model.

pub mod error;
pub mod id;
pub mod stock_key;

pub use error::{DomainError, DomainResult};
pub use id::{LocationId, ProductId, TransactionId, WarehouseId};
pub use stock_key::StockKey;
