//! `depot-catalog`: product/warehouse reference data.
//!
//! Catalog records are **reference data** from the stock core's perspective:
//! the engine resolves them through [`CatalogReference`] and never mutates
//! them. Record types live here so backends and callers share one model.

pub mod product;
pub mod reference;
pub mod warehouse;

pub use product::{Product, StockStatus};
pub use reference::{CatalogReference, LocationRef, ProductRef};
pub use warehouse::{Location, Warehouse};
