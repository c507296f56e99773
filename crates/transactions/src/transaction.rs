use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, LocationId, ProductId, TransactionId};
use depot_ledger::StockDelta;

use crate::movement::Movement;

/// Transaction status lifecycle.
///
/// Transitions are monotonic: Draft → Completed or Draft → Cancelled, and
/// both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Draft,
    Completed,
    Cancelled,
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TransactionStatus::Draft => "draft",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One line of a transaction: a product and a positive quantity, optionally
/// at a named location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub product_id: ProductId,
    pub quantity: i64,
    /// `None` means the warehouse's General Stock.
    pub location_id: Option<LocationId>,
}

impl TransactionItem {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
            location_id: None,
        }
    }

    pub fn at_location(mut self, location_id: LocationId) -> Self {
        self.location_id = Some(location_id);
        self
    }
}

/// Stock transaction document.
///
/// A multi-item movement with a lifecycle. Items and notes are mutable only
/// while the document is Draft; completing applies its stock effect (exactly
/// once, by the engine) and cancelling discards it. The status field is the
/// durable source of truth for where the document stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    movement: Movement,
    status: TransactionStatus,
    reference: Option<String>,
    notes: Option<String>,
    items: Vec<TransactionItem>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Build a Draft, validating the movement and the item list.
    pub fn draft(
        movement: Movement,
        items: Vec<TransactionItem>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        movement.validate()?;
        validate_items(&items)?;

        Ok(Self {
            id: TransactionId::new(),
            movement,
            status: TransactionStatus::Draft,
            reference: None,
            notes: None,
            items,
            created_at,
            completed_at: None,
        })
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn items(&self) -> &[TransactionItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, TransactionStatus::Draft)
    }

    /// The ledger deltas completing this transaction would apply.
    pub fn deltas(&self) -> Vec<StockDelta> {
        self.movement.deltas(&self.items)
    }

    /// Replace the item list. Draft only; re-validates like creation.
    pub fn replace_items(&mut self, items: Vec<TransactionItem>) -> DomainResult<()> {
        self.ensure_modifiable("update")?;
        validate_items(&items)?;
        self.items = items;
        Ok(())
    }

    /// Replace the notes. Draft only.
    pub fn set_notes(&mut self, notes: Option<String>) -> DomainResult<()> {
        self.ensure_modifiable("update")?;
        self.notes = notes;
        Ok(())
    }

    /// Mark the stock effect applied: Draft → Completed.
    pub fn complete(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_modifiable("finalize")?;
        self.status = TransactionStatus::Completed;
        self.completed_at = Some(at);
        Ok(())
    }

    /// Discard without any stock effect: Draft → Cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.ensure_modifiable("cancel")?;
        self.status = TransactionStatus::Cancelled;
        Ok(())
    }

    fn ensure_modifiable(&self, op: &str) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "cannot {op} a {} transaction",
                self.status
            )));
        }
        Ok(())
    }
}

fn validate_items(items: &[TransactionItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation(
            "transaction must have at least one item",
        ));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(DomainError::validation(format!(
                "item quantity must be positive (product {})",
                item.product_id
            )));
        }
    }
    Ok(())
}

/// Creation payload for a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub movement: Movement,
    pub items: Vec<TransactionItem>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(movement: Movement, items: Vec<TransactionItem>) -> Self {
        Self {
            movement,
            items,
            reference: None,
            notes: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Update payload for a Draft: replaces the item list and the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUpdate {
    pub items: Vec<TransactionItem>,
    pub notes: Option<String>,
}
