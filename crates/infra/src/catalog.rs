//! In-memory catalog backend.

use std::collections::HashMap;
use std::sync::RwLock;

use depot_catalog::{CatalogReference, Location, LocationRef, Product, ProductRef, Warehouse};
use depot_core::{DomainError, DomainResult, LocationId, ProductId, WarehouseId};

/// In-memory implementation of [`CatalogReference`].
///
/// Intended for tests/dev. Not optimized for performance.
///
/// Records are registered through the `add_*` methods and looked up through
/// the `CatalogReference` trait. Registering a location requires its parent
/// warehouse to exist already.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    warehouses: RwLock<HashMap<WarehouseId, Warehouse>>,
    locations: RwLock<HashMap<LocationId, Location>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product, replacing any previous record with the same id.
    pub fn add_product(&self, product: Product) -> DomainResult<()> {
        let mut products = self
            .products
            .write()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        products.insert(product.id, product);
        Ok(())
    }

    /// Register a warehouse, replacing any previous record with the same id.
    pub fn add_warehouse(&self, warehouse: Warehouse) -> DomainResult<()> {
        let mut warehouses = self
            .warehouses
            .write()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        warehouses.insert(warehouse.id, warehouse);
        Ok(())
    }

    /// Register a location. Its parent warehouse must already be registered.
    pub fn add_location(&self, location: Location) -> DomainResult<()> {
        self.resolve_warehouse(location.warehouse_id)?;
        let mut locations = self
            .locations
            .write()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        locations.insert(location.id, location);
        Ok(())
    }

    /// Full product record, for display purposes. `NotFound` if absent.
    pub fn product(&self, id: ProductId) -> DomainResult<Product> {
        let products = self
            .products
            .read()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        products
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("product", id))
    }
}

impl CatalogReference for InMemoryCatalog {
    fn resolve_product(&self, id: ProductId) -> DomainResult<ProductRef> {
        let products = self
            .products
            .read()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        let product = products
            .get(&id)
            .ok_or_else(|| DomainError::not_found("product", id))?;
        Ok(ProductRef {
            min_stock: product.min_stock,
            uom: product.uom.clone(),
        })
    }

    fn resolve_warehouse(&self, id: WarehouseId) -> DomainResult<()> {
        let warehouses = self
            .warehouses
            .read()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        if warehouses.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found("warehouse", id))
        }
    }

    fn resolve_location(&self, id: LocationId) -> DomainResult<LocationRef> {
        let locations = self
            .locations
            .read()
            .map_err(|_| DomainError::storage("catalog lock poisoned"))?;
        let location = locations
            .get(&id)
            .ok_or_else(|| DomainError::not_found("location", id))?;
        Ok(LocationRef {
            warehouse_id: location.warehouse_id,
        })
    }
}
