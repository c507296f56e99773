use std::sync::Arc;

use depot_core::{DomainResult, LocationId, ProductId, WarehouseId};

/// What the transaction engine needs to know about a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    pub min_stock: i64,
    pub uom: String,
}

/// What the transaction engine needs to know about a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRef {
    pub warehouse_id: WarehouseId,
}

/// Read-only view of the catalog.
///
/// The engine treats the catalog as an external system: referents are
/// resolved, never created or mutated, through this interface. Every lookup
/// of an unknown identifier fails with `DomainError::NotFound`.
pub trait CatalogReference: Send + Sync {
    /// Minimum-stock policy and unit of measure for a product.
    fn resolve_product(&self, id: ProductId) -> DomainResult<ProductRef>;

    /// Existence check for a warehouse.
    fn resolve_warehouse(&self, id: WarehouseId) -> DomainResult<()>;

    /// Owning warehouse of a named location.
    fn resolve_location(&self, id: LocationId) -> DomainResult<LocationRef>;
}

impl<C> CatalogReference for Arc<C>
where
    C: CatalogReference + ?Sized,
{
    fn resolve_product(&self, id: ProductId) -> DomainResult<ProductRef> {
        (**self).resolve_product(id)
    }

    fn resolve_warehouse(&self, id: WarehouseId) -> DomainResult<()> {
        (**self).resolve_warehouse(id)
    }

    fn resolve_location(&self, id: LocationId) -> DomainResult<LocationRef> {
        (**self).resolve_location(id)
    }
}
