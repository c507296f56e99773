//! Domain error model.

use thiserror::Error;

use crate::stock_key::StockKey;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every operation fails synchronously with one of these; there is no retry
/// machinery. `Storage` is the one infrastructure escape hatch, surfaced by
/// backends for faults the domain cannot describe (poisoned lock, backend
/// unavailable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or incomplete input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The operation is not permitted in the document's current status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An outbound movement would drive a stock level negative.
    #[error("insufficient stock for {key}: available {available}, requested {requested}")]
    InsufficientStock {
        key: StockKey,
        available: i64,
        requested: i64,
    },

    /// Infrastructure fault reported by a storage backend.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn insufficient_stock(key: StockKey, available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            key,
            available,
            requested,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
