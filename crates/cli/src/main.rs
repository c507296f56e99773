//! End-to-end walkthrough of the transaction engine against the in-memory
//! backends: receive, transfer, ship, adjust, correct a draft, cancel one,
//! plan a reorder, then print the stock position and the activity history.

use std::sync::Arc;

use depot_catalog::{Location, Product, Warehouse};
use depot_engine::{TransactionEngine, TransactionHistory};
use depot_infra::{InMemoryCatalog, InMemoryStockLedger, InMemoryTransactionRepository};
use depot_ledger::{StockLedger, warehouse_total};
use depot_transactions::{
    AdjustmentDirection, DraftUpdate, Movement, NewTransaction, TransactionFilter, TransactionItem,
};

fn main() -> anyhow::Result<()> {
    depot_observability::init();

    let catalog = Arc::new(InMemoryCatalog::new());
    let ledger = Arc::new(InMemoryStockLedger::new());
    let repository = Arc::new(InMemoryTransactionRepository::new());

    // Reference data: two products, two warehouses, one named location.
    let widget = Product::new("SKU-1001", "Steel Widget", "pcs", 20)?
        .with_category("Hardware")
        .with_price(1250);
    let gadget = Product::new("SKU-2002", "Brass Gadget", "box", 5)?;
    let main_wh = Warehouse::new("Main Warehouse", "WH-A")?.with_capacity(10_000);
    let annex = Warehouse::new("Annex", "WH-B")?;
    let aisle = Location::new(main_wh.id, "Aisle 1")?;

    catalog.add_product(widget.clone())?;
    catalog.add_product(gadget.clone())?;
    catalog.add_warehouse(main_wh.clone())?;
    catalog.add_warehouse(annex.clone())?;
    catalog.add_location(aisle.clone())?;

    let engine = TransactionEngine::new(catalog.clone(), ledger.clone(), repository.clone());

    // 1) Receive a purchase order into Main, split across a named aisle and
    //    General Stock.
    let receipt = engine.create(
        NewTransaction::new(
            Movement::In {
                warehouse_id: main_wh.id,
            },
            vec![
                TransactionItem::new(widget.id, 80).at_location(aisle.id),
                TransactionItem::new(widget.id, 40),
            ],
        )
        .with_reference("PO-1042"),
    )?;
    let receipt = engine.finalize(receipt.id())?;
    let received: i64 = receipt.items().iter().map(|item| item.quantity).sum();
    tracing::info!(
        "received {} widget units under {}",
        received,
        receipt.reference().unwrap_or("-")
    );

    // 2) Transfer 30 units from the aisle to the Annex.
    let transfer = engine.transfer(
        main_wh.id,
        annex.id,
        vec![TransactionItem::new(widget.id, 30).at_location(aisle.id)],
    )?;
    engine.finalize(transfer.id())?;

    // 3) Ship 25 units out of the Annex.
    let shipment = engine.ship(annex.id, vec![TransactionItem::new(widget.id, 25)])?;
    engine.finalize(shipment.id())?;

    // 4) Write off 3 damaged units in Main.
    let write_off = engine.adjust(
        main_wh.id,
        AdjustmentDirection::Remove,
        vec![TransactionItem::new(widget.id, 3)],
    )?;
    engine.finalize(write_off.id())?;

    // 5) Draft a gadget receipt, correct the count, then finalize it.
    let gadget_receipt = engine.receive(main_wh.id, vec![TransactionItem::new(gadget.id, 10)])?;
    let gadget_receipt = engine.update(
        gadget_receipt.id(),
        DraftUpdate {
            items: vec![TransactionItem::new(gadget.id, 15)],
            notes: Some("recount at the dock".to_string()),
        },
    )?;
    engine.finalize(gadget_receipt.id())?;

    // 6) Draft a shipment and discard it; the ledger never sees it.
    let discarded = engine.ship(main_wh.id, vec![TransactionItem::new(widget.id, 10)])?;
    engine.cancel(discarded.id())?;

    // 7) The Annex is down to 5 widgets against a minimum of 20; plan and
    //    receive the suggested reorder.
    let planned = engine.suggest_reorder(widget.id, annex.id)?;
    println!(
        "reorder suggestion:\n{}",
        serde_json::to_string_pretty(&planned.suggestion)?
    );
    engine.finalize(planned.transaction.id())?;

    // 8) Stock position per warehouse.
    let levels = ledger.list_by_product(widget.id)?;
    for warehouse in [&main_wh, &annex] {
        let on_hand = warehouse_total(&levels, warehouse.id);
        println!(
            "{} ({}): {} {} on hand, status {:?}",
            warehouse.name,
            warehouse.shortcode,
            on_hand,
            widget.uom,
            widget.stock_status(on_hand)
        );
    }

    // 9) Full activity feed, most recent first.
    let history = TransactionHistory::new(repository.clone());
    println!(
        "history:\n{}",
        serde_json::to_string_pretty(&history.summaries(&TransactionFilter::default())?)?
    );

    Ok(())
}
