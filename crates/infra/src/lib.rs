//! Infrastructure layer: storage backends for the catalog, the stock
//! ledger, and the transaction repository.
//!
//! Everything here is in-memory. The domain crates define the storage
//! traits; this crate provides the reference implementations used by the
//! CLI, the tests, and the benchmarks.

pub mod catalog;
pub mod stock_ledger;
pub mod transaction_store;


pub use catalog::InMemoryCatalog;
pub use stock_ledger::InMemoryStockLedger;
pub use transaction_store::InMemoryTransactionRepository;
