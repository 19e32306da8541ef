mod common;

use assert_matches::assert_matches;
use common::{
    create_test_label, create_test_location, create_test_operator, create_test_sku, setup,
};
use stockledger_api::{
    entities::{stock_transaction::TransactionType, warehouse_location::LocationKind},
    errors::ServiceError,
    services::ledger::{AppendStockTransaction, TransferStock},
};
use uuid::Uuid;

#[tokio::test]
async fn ledger_append_updates_projection_and_snapshots_balance() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "ledger_op").await;
    let sku = create_test_sku(&ctx, "SKU-LEDGER").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "STOR-01", LocationKind::Storage).await;

    let append = |qty: i32, txn_type: TransactionType, reference: &str| AppendStockTransaction {
        txn_type,
        sku_id: sku.id,
        label_version_id: label.id,
        location_id: location.id,
        quantity_change: qty,
        operator_id: operator.id,
        reference_doc: reference.to_string(),
    };

    // +100 inbound
    let first = ctx
        .services
        .ledger
        .append(append(100, TransactionType::Inbound, "GRN-1"))
        .await
        .expect("inbound");
    assert_eq!(first.balance_after, 100);
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        100
    );

    // -30 outbound
    let second = ctx
        .services
        .ledger
        .append(append(-30, TransactionType::Outbound, "SHIP-1"))
        .await
        .expect("outbound");
    assert_eq!(second.balance_after, 70);
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        70
    );

    // -100 would go negative: refused, nothing written.
    let overdraw = ctx
        .services
        .ledger
        .append(append(-100, TransactionType::Outbound, "SHIP-2"))
        .await;
    assert_matches!(overdraw, Err(ServiceError::NegativeStock(_)));
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        70
    );
    let history = ctx
        .services
        .ledger
        .transactions_for_pair(location.id, label.id)
        .await
        .expect("history");
    assert_eq!(history.len(), 2);

    // Projection always equals replayed ledger.
    let report = ctx
        .services
        .ledger
        .reconcile(location.id, label.id)
        .await
        .expect("reconcile");
    assert!(report.ok);
    assert_eq!(report.expected, 70);
    assert_eq!(report.actual, 70);
}

#[tokio::test]
async fn append_validates_inputs_and_references() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "val_op").await;
    let sku = create_test_sku(&ctx, "SKU-VAL").await;
    let other_sku = create_test_sku(&ctx, "SKU-OTHER").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "STOR-VAL", LocationKind::Storage).await;

    let base = AppendStockTransaction {
        txn_type: TransactionType::Adjust,
        sku_id: sku.id,
        label_version_id: label.id,
        location_id: location.id,
        quantity_change: 5,
        operator_id: operator.id,
        reference_doc: String::new(),
    };

    let zero = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            quantity_change: 0,
            ..base.clone()
        })
        .await;
    assert_matches!(zero, Err(ServiceError::ValidationError(_)));

    let move_direct = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            txn_type: TransactionType::Move,
            ..base.clone()
        })
        .await;
    assert_matches!(move_direct, Err(ServiceError::InvalidOperation(_)));

    let wrong_sku = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            sku_id: other_sku.id,
            ..base.clone()
        })
        .await;
    assert_matches!(wrong_sku, Err(ServiceError::ValidationError(_)));

    let missing_label = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            label_version_id: Uuid::new_v4(),
            ..base.clone()
        })
        .await;
    assert_matches!(missing_label, Err(ServiceError::NotFound(_)));

    let missing_location = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            location_id: Uuid::new_v4(),
            ..base.clone()
        })
        .await;
    assert_matches!(missing_location, Err(ServiceError::NotFound(_)));

    let missing_operator = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            operator_id: Uuid::new_v4(),
            ..base
        })
        .await;
    assert_matches!(missing_operator, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn transfer_writes_linked_pair_atomically() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "mover").await;
    let sku = create_test_sku(&ctx, "SKU-MOVE").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let source = create_test_location(&ctx, "RECV-01", LocationKind::Receiving).await;
    let dest = create_test_location(&ctx, "PICK-01", LocationKind::Picking).await;

    ctx.services
        .ledger
        .append(AppendStockTransaction {
            txn_type: TransactionType::Inbound,
            sku_id: sku.id,
            label_version_id: label.id,
            location_id: source.id,
            quantity_change: 100,
            operator_id: operator.id,
            reference_doc: "GRN-MOVE".to_string(),
        })
        .await
        .expect("seed stock");

    let (out_entry, in_entry) = ctx
        .services
        .ledger
        .transfer(TransferStock {
            sku_id: sku.id,
            label_version_id: label.id,
            from_location_id: source.id,
            to_location_id: dest.id,
            quantity: 40,
            operator_id: operator.id,
            reference_doc: "MOVE-1".to_string(),
        })
        .await
        .expect("transfer");

    assert_eq!(out_entry.quantity_change, -40);
    assert_eq!(out_entry.balance_after, 60);
    assert_eq!(in_entry.quantity_change, 40);
    assert_eq!(in_entry.balance_after, 40);
    assert_eq!(out_entry.txn_type, "move");
    assert_eq!(in_entry.txn_type, "move");
    assert_eq!(out_entry.reference_doc, in_entry.reference_doc);

    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(source.id, label.id)
            .await
            .expect("source"),
        60
    );
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(dest.id, label.id)
            .await
            .expect("dest"),
        40
    );

    // Overdrawing the source aborts the whole pair.
    let overdraw = ctx
        .services
        .ledger
        .transfer(TransferStock {
            sku_id: sku.id,
            label_version_id: label.id,
            from_location_id: source.id,
            to_location_id: dest.id,
            quantity: 61,
            operator_id: operator.id,
            reference_doc: "MOVE-2".to_string(),
        })
        .await;
    assert_matches!(overdraw, Err(ServiceError::NegativeStock(_)));
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(source.id, label.id)
            .await
            .expect("source"),
        60
    );
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(dest.id, label.id)
            .await
            .expect("dest"),
        40
    );

    for (loc, _) in [(source.id, "source"), (dest.id, "dest")] {
        let report = ctx
            .services
            .ledger
            .reconcile(loc, label.id)
            .await
            .expect("reconcile");
        assert!(report.ok);
    }
}

#[tokio::test]
async fn concurrent_appends_to_one_pair_never_lose_updates() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "swarm").await;
    let sku = create_test_sku(&ctx, "SKU-SWARM").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "STOR-SWARM", LocationKind::Storage).await;

    let mut tasks = Vec::new();
    for i in 0..10 {
        let ledger = ctx.services.ledger.clone();
        let (sku_id, label_id, location_id, operator_id) =
            (sku.id, label.id, location.id, operator.id);
        tasks.push(tokio::spawn(async move {
            ledger
                .append(AppendStockTransaction {
                    txn_type: TransactionType::Inbound,
                    sku_id,
                    label_version_id: label_id,
                    location_id,
                    quantity_change: 10,
                    operator_id,
                    reference_doc: format!("GRN-{}", i),
                })
                .await
        }));
    }
    for task in tasks {
        task.await.expect("join").expect("append");
    }

    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        100
    );

    // Every entry saw a distinct running balance.
    let mut balances: Vec<i32> = ctx
        .services
        .ledger
        .transactions_for_pair(location.id, label.id)
        .await
        .expect("history")
        .iter()
        .map(|e| e.balance_after)
        .collect();
    balances.sort_unstable();
    assert_eq!(balances, (1..=10).map(|n| n * 10).collect::<Vec<i32>>());

    let report = ctx
        .services
        .ledger
        .reconcile(location.id, label.id)
        .await
        .expect("reconcile");
    assert!(report.ok);
}

#[tokio::test]
async fn inactive_references_are_refused() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "inactive_op").await;
    let sku = create_test_sku(&ctx, "SKU-INACT").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "STOR-INACT", LocationKind::Storage).await;

    ctx.services
        .locations
        .deactivate_location(location.id)
        .await
        .expect("deactivate");

    let result = ctx
        .services
        .ledger
        .append(AppendStockTransaction {
            txn_type: TransactionType::Inbound,
            sku_id: sku.id,
            label_version_id: label.id,
            location_id: location.id,
            quantity_change: 10,
            operator_id: operator.id,
            reference_doc: String::new(),
        })
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}
