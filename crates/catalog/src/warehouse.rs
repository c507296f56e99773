use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, LocationId, WarehouseId};

/// Catalog record: Warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    /// Short label used on labels and picking lists, e.g. "WH-A".
    pub shortcode: String,
    pub capacity: Option<u64>,
}

impl Warehouse {
    pub fn new(name: impl Into<String>, shortcode: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let shortcode = shortcode.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }
        if shortcode.trim().is_empty() {
            return Err(DomainError::validation("warehouse shortcode cannot be empty"));
        }

        Ok(Self {
            id: WarehouseId::new(),
            name,
            shortcode,
            capacity: None,
        })
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Catalog record: a named location within a warehouse.
///
/// Goods not put away to a named location sit in the warehouse's General
/// Stock, which has no `Location` record (`None` in a stock key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub warehouse_id: WarehouseId,
    pub name: String,
}

impl Location {
    pub fn new(warehouse_id: WarehouseId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("location name cannot be empty"));
        }

        Ok(Self {
            id: LocationId::new(),
            warehouse_id,
            name,
        })
    }
}
