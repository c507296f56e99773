use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use depot_core::{StockKey, WarehouseId};

/// One ledger row: the on-hand quantity at a stock key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub key: StockKey,
    /// Never negative.
    pub quantity: i64,
}

impl StockLevel {
    pub fn new(key: StockKey, quantity: i64) -> Self {
        Self { key, quantity }
    }
}

/// A signed quantity change against one stock key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDelta {
    pub key: StockKey,
    pub change: i64,
}

impl StockDelta {
    pub fn new(key: StockKey, change: i64) -> Self {
        Self { key, change }
    }

    /// The delta that undoes this one.
    pub fn inverted(&self) -> Self {
        Self {
            key: self.key,
            change: -self.change,
        }
    }
}

/// Net change per key for a batch of deltas.
///
/// Multiple deltas against the same key collapse into one signed change, and
/// keys whose changes cancel out are dropped (a zero net must not create a
/// ledger entry). Returned as a `BTreeMap` so iteration follows key order;
/// batch appliers rely on that to take per-key locks in a stable order.
pub fn net_deltas(deltas: &[StockDelta]) -> BTreeMap<StockKey, i64> {
    let mut net: BTreeMap<StockKey, i64> = BTreeMap::new();
    for delta in deltas {
        *net.entry(delta.key).or_insert(0) += delta.change;
    }
    net.retain(|_, change| *change != 0);
    net
}

/// Sum of on-hand quantities over a set of levels.
pub fn total_quantity(levels: &[StockLevel]) -> i64 {
    levels.iter().map(|level| level.quantity).sum()
}

/// Sum of on-hand quantities held in one warehouse, General Stock included.
pub fn warehouse_total(levels: &[StockLevel], warehouse_id: WarehouseId) -> i64 {
    levels
        .iter()
        .filter(|level| level.key.warehouse_id == warehouse_id)
        .map(|level| level.quantity)
        .sum()
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
    fn net_deltas_collapses_repeated_keys() {
        let key = StockKey::general(pid(1), wid(1));
        let net = net_deltas(&[StockDelta::new(key, 5), StockDelta::new(key, -2)]);
        assert_eq!(net.len(), 1);
        assert_eq!(net[&key], 3);
    }

    #[test]
    fn net_deltas_drops_cancelled_keys() {
        let key = StockKey::general(pid(1), wid(1));
        let other = StockKey::general(pid(2), wid(1));
        let net = net_deltas(&[
            StockDelta::new(key, 5),
            StockDelta::new(key, -5),
            StockDelta::new(other, 1),
        ]);
        assert_eq!(net.len(), 1);
        assert_eq!(net[&other], 1);
    }

    #[test]
    fn net_deltas_iterates_in_key_order() {
        let keys = [
            StockKey::new(pid(2), wid(1), None),
            StockKey::new(pid(1), wid(2), Some(lid(1))),
            StockKey::new(pid(1), wid(1), None),
        ];
        let deltas: Vec<_> = keys.iter().map(|k| StockDelta::new(*k, 1)).collect();
        let ordered: Vec<_> = net_deltas(&deltas).into_keys().collect();
        assert_eq!(ordered, vec![keys[2], keys[1], keys[0]]);
    }

    #[test]
    fn warehouse_total_ignores_other_warehouses() {
        let levels = vec![
            StockLevel::new(StockKey::general(pid(1), wid(1)), 10),
            StockLevel::new(StockKey::new(pid(1), wid(1), Some(lid(1))), 4),
            StockLevel::new(StockKey::general(pid(1), wid(2)), 99),
        ];
        assert_eq!(warehouse_total(&levels, wid(1)), 14);
        assert_eq!(total_quantity(&levels), 113);
    }

    #[test]
    fn inverted_delta_cancels() {
        let key = StockKey::general(pid(1), wid(1));
        let delta = StockDelta::new(key, 7);
        let net = net_deltas(&[delta, delta.inverted()]);
        assert!(net.is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_key() -> impl Strategy<Value = StockKey> {
            // Small id spaces to force collisions.
            (1u128..4, 1u128..3, prop::option::of(1u128..3)).prop_map(|(p, w, l)| {
                StockKey::new(pid(p), wid(w), l.map(lid))
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: netting preserves the total signed change.
            #[test]
            fn netting_preserves_total_change(
                batch in prop::collection::vec((arb_key(), -50i64..50), 0..32)
            ) {
                let deltas: Vec<_> = batch
                    .iter()
                    .map(|(key, change)| StockDelta::new(*key, *change))
                    .collect();
                let raw_total: i64 = deltas.iter().map(|d| d.change).sum();
                let net_total: i64 = net_deltas(&deltas).values().sum();
                prop_assert_eq!(raw_total, net_total);
            }

            /// Property: a batch plus its inversion nets to nothing.
            #[test]
            fn inversion_cancels_batch(
                batch in prop::collection::vec((arb_key(), -50i64..50), 0..32)
            ) {
                let mut deltas: Vec<_> = batch
                    .iter()
                    .map(|(key, change)| StockDelta::new(*key, *change))
                    .collect();
                let inverses: Vec<_> = deltas.iter().map(StockDelta::inverted).collect();
                deltas.extend(inverses);
                prop_assert!(net_deltas(&deltas).is_empty());
            }
        }
    }
}
