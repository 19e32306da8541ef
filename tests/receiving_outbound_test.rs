mod common;

use assert_matches::assert_matches;
use common::{
    create_test_label, create_test_location, create_test_operator, create_test_sku, setup,
    TestContext,
};
use stockledger_api::{
    entities::{outbound_execution::ExecutionStatus, warehouse_location::LocationKind},
    errors::ServiceError,
    services::{
        batches::{CreateShipmentBatch, ReviewBatch},
        outbound::{AdvanceOutbound, CreateOutboundExecution},
        receiving::{CreateInboundReceipt, NewReceiptLine, RecordScan},
    },
};

#[tokio::test]
async fn receipt_scan_and_post_flow() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "dock_worker").await;
    let sku = create_test_sku(&ctx, "SKU-RECV").await;
    let label = create_test_label(&ctx, sku.id, "FN_RECV", "UPC_RECV").await;
    let location = create_test_location(&ctx, "RECV-DOCK", LocationKind::Receiving).await;

    let (receipt, lines) = ctx
        .services
        .receiving
        .create_receipt(CreateInboundReceipt {
            receipt_number: "GRN-100".to_string(),
            created_by: operator.id,
            lines: vec![NewReceiptLine {
                label_version_id: label.id,
                location_id: location.id,
                expected_quantity: 50,
            }],
        })
        .await
        .expect("receipt");
    assert_eq!(receipt.status, "open");
    assert_eq!(lines.len(), 1);

    // Posting before any scan is refused.
    let premature = ctx
        .services
        .receiving
        .post_receipt(receipt.id, operator.id)
        .await;
    assert_matches!(premature, Err(ServiceError::ValidationError(_)));

    // A scan with the wrong identifiers records the mismatch.
    let bad_scan = ctx
        .services
        .receiving
        .record_scan(
            lines[0].id,
            RecordScan {
                scanned_quantity: 48,
                scanned_fnsku: Some("FN_WRONG".to_string()),
                scanned_upc: Some("UPC_RECV".to_string()),
            },
        )
        .await
        .expect("scan");
    assert_eq!(bad_scan.scan_matched, Some(false));

    // A mismatched line blocks posting.
    let blocked = ctx
        .services
        .receiving
        .post_receipt(receipt.id, operator.id)
        .await;
    assert_matches!(blocked, Err(ServiceError::ValidationError(_)));

    // Rescan with the right label, then post.
    let good_scan = ctx
        .services
        .receiving
        .record_scan(
            lines[0].id,
            RecordScan {
                scanned_quantity: 48,
                scanned_fnsku: Some("FN_RECV".to_string()),
                scanned_upc: Some("UPC_RECV".to_string()),
            },
        )
        .await
        .expect("rescan");
    assert_eq!(good_scan.scan_matched, Some(true));

    let posted = ctx
        .services
        .receiving
        .post_receipt(receipt.id, operator.id)
        .await
        .expect("post");
    assert_eq!(posted.status, "posted");
    assert!(posted.posted_at.is_some());

    // The scanned quantity, not the expected one, hits the ledger.
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        48
    );
    let history = ctx
        .services
        .ledger
        .transactions_for_pair(location.id, label.id)
        .await
        .expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reference_doc, "GRN-100");

    // Posting twice is refused and appends nothing.
    let reposted = ctx
        .services
        .receiving
        .post_receipt(receipt.id, operator.id)
        .await;
    assert_matches!(reposted, Err(ServiceError::InvalidOperation(_)));
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, label.id)
            .await
            .expect("projection"),
        48
    );
}

#[tokio::test]
async fn duplicate_receipt_number_conflicts() {
    let ctx = setup().await;
    let operator = create_test_operator(&ctx, "dock_dup").await;
    let sku = create_test_sku(&ctx, "SKU-RDUP").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "RECV-DUP", LocationKind::Receiving).await;

    let make = || CreateInboundReceipt {
        receipt_number: "GRN-DUP".to_string(),
        created_by: operator.id,
        lines: vec![NewReceiptLine {
            label_version_id: label.id,
            location_id: location.id,
            expected_quantity: 1,
        }],
    };

    ctx.services
        .receiving
        .create_receipt(make())
        .await
        .expect("first receipt");
    let dup = ctx.services.receiving.create_receipt(make()).await;
    assert_matches!(dup, Err(ServiceError::Conflict(_)));
}

/// Seeds an approved batch with stock available at a shipping location.
async fn seed_approved_batch(
    ctx: &TestContext,
    tag: &str,
    batch_quantity: i32,
    stocked: i32,
) -> (
    stockledger_api::entities::shipment_batch::Model,
    stockledger_api::entities::warehouse_location::Model,
    stockledger_api::entities::operator::Model,
) {
    let creator = create_test_operator(ctx, &format!("creator_{}", tag)).await;
    let reviewer1 = create_test_operator(ctx, &format!("r1_{}", tag)).await;
    let reviewer2 = create_test_operator(ctx, &format!("r2_{}", tag)).await;
    let sku = create_test_sku(ctx, &format!("SKU-{}", tag)).await;
    let label = create_test_label(ctx, sku.id, "FN_OUT", "UPC_OUT").await;
    let location = create_test_location(ctx, &format!("SHIP-{}", tag), LocationKind::Shipping).await;

    if stocked > 0 {
        ctx.services
            .ledger
            .append(stockledger_api::services::ledger::AppendStockTransaction {
                txn_type: stockledger_api::entities::stock_transaction::TransactionType::Inbound,
                sku_id: sku.id,
                label_version_id: label.id,
                location_id: location.id,
                quantity_change: stocked,
                operator_id: creator.id,
                reference_doc: format!("SEED-{}", tag),
            })
            .await
            .expect("seed stock");
    }

    let batch = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: format!("BATCH-{}", tag),
            label_version_id: label.id,
            quantity: batch_quantity,
            created_by: creator.id,
        })
        .await
        .expect("batch");

    for (role, reviewer) in [(1u8, &reviewer1), (2u8, &reviewer2)] {
        ctx.services
            .batches
            .review(
                batch.id,
                ReviewBatch {
                    role,
                    reviewer_id: reviewer.id,
                    approved: true,
                    comment: "OK".to_string(),
                },
            )
            .await
            .expect("review");
    }

    let batch = ctx.services.batches.get_batch(batch.id).await.expect("get");
    assert_eq!(batch.status, "approved");

    (batch, location, creator)
}

#[tokio::test]
async fn outbound_execution_ships_and_decrements_stock() {
    let ctx = setup().await;
    let (batch, location, operator) = seed_approved_batch(&ctx, "OUT", 30, 100).await;

    let execution = ctx
        .services
        .outbound
        .create_execution(CreateOutboundExecution {
            batch_id: batch.id,
            location_id: location.id,
            created_by: operator.id,
        })
        .await
        .expect("execution");
    assert_eq!(execution.status, "pending");

    // One execution per approved batch.
    let second = ctx
        .services
        .outbound
        .create_execution(CreateOutboundExecution {
            batch_id: batch.id,
            location_id: location.id,
            created_by: operator.id,
        })
        .await;
    assert_matches!(second, Err(ServiceError::Conflict(_)));

    // Steps cannot be skipped.
    let skipped = ctx
        .services
        .outbound
        .advance(
            execution.id,
            AdvanceOutbound {
                next_status: ExecutionStatus::Shipped,
                operator_id: operator.id,
                tracking_number: Some("TRK-1".to_string()),
            },
        )
        .await;
    assert_matches!(skipped, Err(ServiceError::InvalidOperation(_)));

    for status in [ExecutionStatus::Picking, ExecutionStatus::Packing] {
        ctx.services
            .outbound
            .advance(
                execution.id,
                AdvanceOutbound {
                    next_status: status,
                    operator_id: operator.id,
                    tracking_number: None,
                },
            )
            .await
            .expect("advance");
    }

    // Shipping without a tracking number is refused.
    let untracked = ctx
        .services
        .outbound
        .advance(
            execution.id,
            AdvanceOutbound {
                next_status: ExecutionStatus::Shipped,
                operator_id: operator.id,
                tracking_number: None,
            },
        )
        .await;
    assert_matches!(untracked, Err(ServiceError::ValidationError(_)));

    let shipped = ctx
        .services
        .outbound
        .advance(
            execution.id,
            AdvanceOutbound {
                next_status: ExecutionStatus::Shipped,
                operator_id: operator.id,
                tracking_number: Some("TRK-1".to_string()),
            },
        )
        .await
        .expect("ship");
    assert_eq!(shipped.status, "shipped");
    assert!(shipped.shipped_at.is_some());
    assert_eq!(shipped.tracking_number.as_deref(), Some("TRK-1"));

    // The batch quantity left the execution's location.
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, batch.label_version_id)
            .await
            .expect("projection"),
        70
    );
    let history = ctx
        .services
        .ledger
        .transactions_for_pair(location.id, batch.label_version_id)
        .await
        .expect("history");
    let outbound_entry = history.last().expect("entry");
    assert_eq!(outbound_entry.txn_type, "outbound");
    assert_eq!(outbound_entry.quantity_change, -30);
    assert_eq!(outbound_entry.reference_doc, batch.batch_code);

    // Shipped is terminal.
    let after_terminal = ctx
        .services
        .outbound
        .advance(
            execution.id,
            AdvanceOutbound {
                next_status: ExecutionStatus::Shipped,
                operator_id: operator.id,
                tracking_number: Some("TRK-2".to_string()),
            },
        )
        .await;
    assert_matches!(after_terminal, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn execution_requires_approved_batch() {
    let ctx = setup().await;
    let creator = create_test_operator(&ctx, "pending_creator").await;
    let sku = create_test_sku(&ctx, "SKU-PEND").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;
    let location = create_test_location(&ctx, "SHIP-PEND", LocationKind::Shipping).await;

    let batch = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: "BATCH-PEND".to_string(),
            label_version_id: label.id,
            quantity: 5,
            created_by: creator.id,
        })
        .await
        .expect("batch");

    let result = ctx
        .services
        .outbound
        .create_execution(CreateOutboundExecution {
            batch_id: batch.id,
            location_id: location.id,
            created_by: creator.id,
        })
        .await;

    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn shipping_more_than_stocked_fails_and_leaves_state_unchanged() {
    let ctx = setup().await;
    let (batch, location, operator) = seed_approved_batch(&ctx, "SHORT", 50, 20).await;

    let execution = ctx
        .services
        .outbound
        .create_execution(CreateOutboundExecution {
            batch_id: batch.id,
            location_id: location.id,
            created_by: operator.id,
        })
        .await
        .expect("execution");

    for status in [ExecutionStatus::Picking, ExecutionStatus::Packing] {
        ctx.services
            .outbound
            .advance(
                execution.id,
                AdvanceOutbound {
                    next_status: status,
                    operator_id: operator.id,
                    tracking_number: None,
                },
            )
            .await
            .expect("advance");
    }

    let short = ctx
        .services
        .outbound
        .advance(
            execution.id,
            AdvanceOutbound {
                next_status: ExecutionStatus::Shipped,
                operator_id: operator.id,
                tracking_number: Some("TRK-SHORT".to_string()),
            },
        )
        .await;
    assert_matches!(short, Err(ServiceError::NegativeStock(_)));

    // Neither the status flip nor the ledger entry survived the rollback.
    let unchanged = ctx
        .services
        .outbound
        .get_execution(execution.id)
        .await
        .expect("get");
    assert_eq!(unchanged.status, "packing");
    assert!(unchanged.shipped_at.is_none());
    assert_eq!(
        ctx.services
            .ledger
            .projected_stock(location.id, batch.label_version_id)
            .await
            .expect("projection"),
        20
    );
}
