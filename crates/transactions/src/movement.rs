use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult, StockKey, WarehouseId};
use depot_ledger::StockDelta;

use crate::transaction::TransactionItem;

/// Transaction kind, as recorded on documents and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    In,
    Out,
    Transfer,
    Adjust,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TransactionKind::In => "in",
            TransactionKind::Out => "out",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Adjust => "adjust",
        };
        f.write_str(s)
    }
}

/// Sign of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    Add,
    Remove,
}

/// Where a transaction moves stock.
///
/// Each variant carries exactly the warehouses it touches, and validation and
/// delta derivation dispatch on the variant. Adding a movement kind means
/// adding a variant here, not extending a conditional chain somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Movement {
    /// Goods arriving into a warehouse.
    In { warehouse_id: WarehouseId },
    /// Goods leaving a warehouse.
    Out { warehouse_id: WarehouseId },
    /// Goods moving from one warehouse to another.
    ///
    /// Item locations name spots in the source warehouse; the inbound side
    /// always lands in the destination's General Stock.
    Transfer {
        source_warehouse_id: WarehouseId,
        destination_warehouse_id: WarehouseId,
    },
    /// Manual correction within one warehouse.
    Adjust {
        warehouse_id: WarehouseId,
        direction: AdjustmentDirection,
    },
}

impl Movement {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Movement::In { .. } => TransactionKind::In,
            Movement::Out { .. } => TransactionKind::Out,
            Movement::Transfer { .. } => TransactionKind::Transfer,
            Movement::Adjust { .. } => TransactionKind::Adjust,
        }
    }

    /// Every warehouse this movement touches.
    pub fn warehouse_ids(&self) -> Vec<WarehouseId> {
        match self {
            Movement::In { warehouse_id }
            | Movement::Out { warehouse_id }
            | Movement::Adjust { warehouse_id, .. } => vec![*warehouse_id],
            Movement::Transfer {
                source_warehouse_id,
                destination_warehouse_id,
            } => vec![*source_warehouse_id, *destination_warehouse_id],
        }
    }

    /// The warehouse an item's named location must belong to.
    pub fn location_warehouse(&self) -> WarehouseId {
        match self {
            Movement::In { warehouse_id }
            | Movement::Out { warehouse_id }
            | Movement::Adjust { warehouse_id, .. } => *warehouse_id,
            Movement::Transfer {
                source_warehouse_id,
                ..
            } => *source_warehouse_id,
        }
    }

    /// Structural check of the movement itself.
    pub fn validate(&self) -> DomainResult<()> {
        if let Movement::Transfer {
            source_warehouse_id,
            destination_warehouse_id,
        } = self
        {
            if source_warehouse_id == destination_warehouse_id {
                return Err(DomainError::validation(
                    "transfer source and destination warehouses must differ",
                ));
            }
        }
        Ok(())
    }

    /// The ledger deltas this movement produces for a set of items.
    ///
    /// One delta per item, except transfers which produce two (outbound at
    /// the source, inbound at the destination's General Stock).
    pub fn deltas(&self, items: &[TransactionItem]) -> Vec<StockDelta> {
        match self {
            Movement::In { warehouse_id } => items
                .iter()
                .map(|item| {
                    StockDelta::new(
                        StockKey::new(item.product_id, *warehouse_id, item.location_id),
                        item.quantity,
                    )
                })
                .collect(),
            Movement::Out { warehouse_id } => items
                .iter()
                .map(|item| {
                    StockDelta::new(
                        StockKey::new(item.product_id, *warehouse_id, item.location_id),
                        -item.quantity,
                    )
                })
                .collect(),
            Movement::Transfer {
                source_warehouse_id,
                destination_warehouse_id,
            } => items
                .iter()
                .flat_map(|item| {
                    [
                        StockDelta::new(
                            StockKey::new(item.product_id, *source_warehouse_id, item.location_id),
                            -item.quantity,
                        ),
                        StockDelta::new(
                            StockKey::general(item.product_id, *destination_warehouse_id),
                            item.quantity,
                        ),
                    ]
                })
                .collect(),
            Movement::Adjust {
                warehouse_id,
                direction,
            } => items
                .iter()
                .map(|item| {
                    let change = match direction {
                        AdjustmentDirection::Add => item.quantity,
                        AdjustmentDirection::Remove => -item.quantity,
                    };
                    StockDelta::new(
                        StockKey::new(item.product_id, *warehouse_id, item.location_id),
                        change,
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{LocationId, ProductId};
    use uuid::Uuid;

    fn pid(n: u128) -> ProductId {
        ProductId::from_uuid(Uuid::from_u128(n))
    }

    fn wid(n: u128) -> WarehouseId {
        WarehouseId::from_uuid(Uuid::from_u128(n))
    }

    fn lid(n: u128) -> LocationId {
        LocationId::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn inbound_deltas_are_positive_at_the_item_location() {
        let movement = Movement::In {
            warehouse_id: wid(1),
        };
        let items = vec![
            TransactionItem::new(pid(1), 5),
            TransactionItem::new(pid(2), 3).at_location(lid(1)),
        ];

        let deltas = movement.deltas(&items);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].key, StockKey::general(pid(1), wid(1)));
        assert_eq!(deltas[0].change, 5);
        assert_eq!(deltas[1].key, StockKey::new(pid(2), wid(1), Some(lid(1))));
        assert_eq!(deltas[1].change, 3);
    }

    #[test]
    fn outbound_deltas_are_negative() {
        let movement = Movement::Out {
            warehouse_id: wid(1),
        };
        let deltas = movement.deltas(&[TransactionItem::new(pid(1), 4)]);
        assert_eq!(deltas[0].change, -4);
    }

    #[test]
    fn transfer_produces_two_deltas_per_item() {
        let movement = Movement::Transfer {
            source_warehouse_id: wid(1),
            destination_warehouse_id: wid(2),
        };
        let items = vec![TransactionItem::new(pid(1), 7).at_location(lid(1))];

        let deltas = movement.deltas(&items);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].key, StockKey::new(pid(1), wid(1), Some(lid(1))));
        assert_eq!(deltas[0].change, -7);
        assert_eq!(deltas[1].key, StockKey::general(pid(1), wid(2)));
        assert_eq!(deltas[1].change, 7);
    }

    #[test]
    fn adjustment_direction_sets_the_sign() {
        let add = Movement::Adjust {
            warehouse_id: wid(1),
            direction: AdjustmentDirection::Add,
        };
        let remove = Movement::Adjust {
            warehouse_id: wid(1),
            direction: AdjustmentDirection::Remove,
        };
        let items = vec![TransactionItem::new(pid(1), 2)];

        assert_eq!(add.deltas(&items)[0].change, 2);
        assert_eq!(remove.deltas(&items)[0].change, -2);
    }

    #[test]
    fn transfer_rejects_same_warehouse() {
        let movement = Movement::Transfer {
            source_warehouse_id: wid(1),
            destination_warehouse_id: wid(1),
        };
        let err = movement.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("must differ") => {}
            _ => panic!("Expected Validation error for same-warehouse transfer"),
        }
    }

    #[test]
    fn location_warehouse_is_the_source_for_transfers() {
        let movement = Movement::Transfer {
            source_warehouse_id: wid(1),
            destination_warehouse_id: wid(2),
        };
        assert_eq!(movement.location_warehouse(), wid(1));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use depot_ledger::net_deltas;
        use proptest::prelude::*;

        fn arb_items() -> impl Strategy<Value = Vec<TransactionItem>> {
            prop::collection::vec(
                (1u128..6, 1i64..1_000, prop::option::of(1u128..4)).prop_map(|(p, q, l)| {
                    let item = TransactionItem::new(pid(p), q);
                    match l {
                        Some(l) => item.at_location(lid(l)),
                        None => item,
                    }
                }),
                1..16,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a transfer conserves total stock for every product.
            #[test]
            fn transfer_conserves_stock_per_product(items in arb_items()) {
                let movement = Movement::Transfer {
                    source_warehouse_id: wid(1),
                    destination_warehouse_id: wid(2),
                };
                let deltas = movement.deltas(&items);
                for product in items.iter().map(|i| i.product_id) {
                    let sum: i64 = deltas
                        .iter()
                        .filter(|d| d.key.product_id == product)
                        .map(|d| d.change)
                        .sum();
                    prop_assert_eq!(sum, 0);
                }
            }

            /// Property: inbound deltas add up to exactly the item quantities.
            #[test]
            fn inbound_total_matches_item_total(items in arb_items()) {
                let movement = Movement::In {
                    warehouse_id: wid(1),
                };
                let item_total: i64 = items.iter().map(|i| i.quantity).sum();
                let delta_total: i64 = net_deltas(&movement.deltas(&items)).values().sum();
                prop_assert_eq!(item_total, delta_total);
            }

            /// Property: outbound movements never produce a positive delta.
            #[test]
            fn outbound_deltas_never_positive(items in arb_items()) {
                let movement = Movement::Out {
                    warehouse_id: wid(1),
                };
                for delta in movement.deltas(&items) {
                    prop_assert!(delta.change < 0);
                }
            }
        }
    }
}
