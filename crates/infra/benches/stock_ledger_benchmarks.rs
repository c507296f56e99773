use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use depot_catalog::{Product, Warehouse};
use depot_core::{ProductId, StockKey, WarehouseId};
use depot_engine::TransactionEngine;
use depot_infra::{InMemoryCatalog, InMemoryStockLedger, InMemoryTransactionRepository};
use depot_ledger::{StockDelta, StockLedger};
use depot_transactions::TransactionItem;
use uuid::Uuid;

fn pid(n: u128) -> ProductId {
    ProductId::from_uuid(Uuid::from_u128(n))
}

fn wid(n: u128) -> WarehouseId {
    WarehouseId::from_uuid(Uuid::from_u128(n))
}

type Engine = TransactionEngine<
    Arc<InMemoryCatalog>,
    Arc<InMemoryStockLedger>,
    Arc<InMemoryTransactionRepository>,
>;

fn setup_engine() -> (Engine, ProductId, WarehouseId) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let ledger = Arc::new(InMemoryStockLedger::new());
    let repository = Arc::new(InMemoryTransactionRepository::new());

    let product = Product::new("SKU-001", "Bench Widget", "pcs", 10).unwrap();
    let warehouse = Warehouse::new("Main", "WH-A").unwrap();
    let product_id = product.id;
    let warehouse_id = warehouse.id;
    catalog.add_product(product).unwrap();
    catalog.add_warehouse(warehouse).unwrap();

    (
        TransactionEngine::new(catalog, ledger, repository),
        product_id,
        warehouse_id,
    )
}

fn bench_delta_apply_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_apply_latency");
    group.sample_size(1000);

    // Benchmark: repeated single-key apply (the hot-key path)
    group.bench_function("single_key_apply", |b| {
        let ledger = InMemoryStockLedger::new();
        let key = StockKey::general(pid(1), wid(1));
        let deltas = [StockDelta::new(key, 1)];
        b.iter(|| {
            ledger.apply_deltas(black_box(&deltas)).unwrap();
        });
    });

    // Benchmark: a ten-key batch (lock acquisition in key order)
    group.bench_function("ten_key_batch_apply", |b| {
        let ledger = InMemoryStockLedger::new();
        let deltas: Vec<StockDelta> = (1..=10)
            .map(|n| StockDelta::new(StockKey::general(pid(n), wid(1)), 1))
            .collect();
        b.iter(|| {
            ledger.apply_deltas(black_box(&deltas)).unwrap();
        });
    });

    group.finish();
}

fn bench_batch_apply_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_apply_throughput");

    for batch_size in [1, 10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_with_input(
            BenchmarkId::new("batch_apply", batch_size),
            batch_size,
            |b, &size| {
                let ledger = InMemoryStockLedger::new();
                let deltas: Vec<StockDelta> = (1..=size)
                    .map(|n| StockDelta::new(StockKey::general(pid(n as u128), wid(1)), 1))
                    .collect();
                b.iter(|| {
                    ledger.apply_deltas(black_box(&deltas)).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_product_scan_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_scan_speed");

    for entry_count in [10, 100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("list_by_product", entry_count),
            entry_count,
            |b, &count| {
                let ledger = InMemoryStockLedger::new();
                let product_id = pid(1);

                // One entry per warehouse, plus noise under another product.
                for n in 1..=count {
                    let key = StockKey::general(product_id, wid(n as u128));
                    ledger.apply_deltas(&[StockDelta::new(key, 5)]).unwrap();
                    let noise = StockKey::general(pid(2), wid(n as u128));
                    ledger.apply_deltas(&[StockDelta::new(noise, 5)]).unwrap();
                }

                b.iter(|| {
                    black_box(ledger.list_by_product(black_box(product_id)).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_engine_vs_raw_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_vs_raw_ledger");
    group.sample_size(1000);

    // Benchmark: the full document pipeline (draft + validate + finalize)
    group.bench_function("engine_receive_and_finalize", |b| {
        let (engine, product_id, warehouse_id) = setup_engine();
        b.iter(|| {
            let receipt = engine
                .receive(
                    warehouse_id,
                    vec![TransactionItem::new(product_id, black_box(10))],
                )
                .unwrap();
            engine.finalize(receipt.id()).unwrap();
        });
    });

    // Benchmark: a bare delta against the ledger (no document, no lifecycle)
    group.bench_function("raw_ledger_apply", |b| {
        let ledger = InMemoryStockLedger::new();
        let key = StockKey::general(pid(1), wid(1));
        b.iter(|| {
            ledger
                .apply_deltas(&[StockDelta::new(key, black_box(10))])
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_delta_apply_latency,
    bench_batch_apply_throughput,
    bench_product_scan_speed,
    bench_engine_vs_raw_ledger
);
criterion_main!(benches);
