mod common;

use assert_matches::assert_matches;
use common::{create_test_sku, setup};
use stockledger_api::{
    errors::ServiceError,
    services::labels::{label_checksum, CreateLabelVersion},
};
use uuid::Uuid;

#[tokio::test]
async fn version_numbers_increment_and_checksums_change() {
    let ctx = setup().await;
    let sku = create_test_sku(&ctx, "SKU-001").await;

    let v0 = ctx
        .services
        .labels
        .create_version(CreateLabelVersion {
            sku_id: sku.id,
            fnsku: "FNSKU_A".into(),
            upc: "UPC_A".into(),
            created_by: "system".into(),
        })
        .await
        .expect("v0");
    assert_eq!(v0.version_number, 0);
    assert_eq!(v0.checksum.len(), 64);
    assert_eq!(v0.checksum, label_checksum("FNSKU_A", "UPC_A"));

    let v1 = ctx
        .services
        .labels
        .create_version(CreateLabelVersion {
            sku_id: sku.id,
            fnsku: "FNSKU_B".into(),
            upc: "UPC_A".into(),
            created_by: "system".into(),
        })
        .await
        .expect("v1");
    assert_eq!(v1.version_number, 1);
    assert_ne!(v0.checksum, v1.checksum);

    // Old versions are untouched by new ones.
    let v0_check = ctx.services.labels.get_label(v0.id).await.expect("v0 read");
    assert_eq!(v0_check.fnsku, "FNSKU_A");
    assert_eq!(v0_check.checksum, v0.checksum);

    let history = ctx.services.labels.list_versions(sku.id).await.expect("history");
    assert_eq!(
        history.iter().map(|v| v.version_number).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[tokio::test]
async fn versions_are_independent_per_sku() {
    let ctx = setup().await;
    let sku_a = create_test_sku(&ctx, "SKU-A").await;
    let sku_b = create_test_sku(&ctx, "SKU-B").await;

    let a0 = common::create_test_label(&ctx, sku_a.id, "FA", "UA").await;
    let b0 = common::create_test_label(&ctx, sku_b.id, "FB", "UB").await;
    let a1 = common::create_test_label(&ctx, sku_a.id, "FA2", "UA").await;

    assert_eq!(a0.version_number, 0);
    assert_eq!(b0.version_number, 0);
    assert_eq!(a1.version_number, 1);
}

#[tokio::test]
async fn create_version_for_unknown_sku_fails() {
    let ctx = setup().await;

    let result = ctx
        .services
        .labels
        .create_version(CreateLabelVersion {
            sku_id: Uuid::new_v4(),
            fnsku: "F".into(),
            upc: "U".into(),
            created_by: "system".into(),
        })
        .await;

    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_versions_for_one_sku_stay_dense() {
    let ctx = setup().await;
    let sku = create_test_sku(&ctx, "SKU-RACE").await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let labels = ctx.services.labels.clone();
        let sku_id = sku.id;
        tasks.push(tokio::spawn(async move {
            labels
                .create_version(CreateLabelVersion {
                    sku_id,
                    fnsku: format!("FNSKU_{}", i),
                    upc: "UPC".into(),
                    created_by: "racer".into(),
                })
                .await
        }));
    }

    let mut created = 0;
    for task in tasks {
        match task.await.expect("join") {
            Ok(_) => created += 1,
            // A loser that exhausted its single retry is acceptable; a gap
            // or duplicate in the sequence is not.
            Err(ServiceError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(created >= 1);

    let mut numbers: Vec<i32> = ctx
        .services
        .labels
        .list_versions(sku.id)
        .await
        .expect("history")
        .iter()
        .map(|v| v.version_number)
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (0..created).collect::<Vec<i32>>());
}

#[tokio::test]
async fn verify_label_roundtrip() {
    let ctx = setup().await;
    let sku = create_test_sku(&ctx, "SKU-VERIFY").await;
    let label = common::create_test_label(&ctx, sku.id, "FN_TEST", "UPC_TEST").await;

    let ok = ctx
        .services
        .labels
        .verify_label(label.id, "FN_TEST", "UPC_TEST")
        .await
        .expect("verify");
    assert!(ok);

    let tampered = ctx
        .services
        .labels
        .verify_label(label.id, "FN_TEST", "UPC_WRONG")
        .await
        .expect("verify");
    assert!(!tampered);

    let missing = ctx
        .services
        .labels
        .verify_label(Uuid::new_v4(), "FN_TEST", "UPC_TEST")
        .await;
    assert_matches!(missing, Err(ServiceError::NotFound(_)));
}
