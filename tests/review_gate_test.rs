mod common;

use assert_matches::assert_matches;
use common::{create_test_label, create_test_operator, create_test_sku, setup, TestContext};
use stockledger_api::{
    entities::shipment_batch,
    errors::ServiceError,
    services::batches::{CreateShipmentBatch, ReviewBatch},
};

async fn seed_batch(ctx: &TestContext, batch_code: &str) -> (shipment_batch::Model, TestActors) {
    let creator = create_test_operator(ctx, &format!("op_{}", batch_code)).await;
    let reviewer1 = create_test_operator(ctx, &format!("mgr1_{}", batch_code)).await;
    let reviewer2 = create_test_operator(ctx, &format!("mgr2_{}", batch_code)).await;
    let sku = create_test_sku(ctx, &format!("SKU_{}", batch_code)).await;
    let label = create_test_label(ctx, sku.id, "FN_TEST", "UPC_TEST").await;

    let batch = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: batch_code.to_string(),
            label_version_id: label.id,
            quantity: 100,
            created_by: creator.id,
        })
        .await
        .expect("batch");

    (
        batch,
        TestActors {
            creator,
            reviewer1,
            reviewer2,
        },
    )
}

struct TestActors {
    creator: stockledger_api::entities::operator::Model,
    reviewer1: stockledger_api::entities::operator::Model,
    reviewer2: stockledger_api::entities::operator::Model,
}

fn review(role: u8, reviewer: &stockledger_api::entities::operator::Model, approved: bool) -> ReviewBatch {
    ReviewBatch {
        role,
        reviewer_id: reviewer.id,
        approved,
        comment: String::new(),
    }
}

#[tokio::test]
async fn dual_review_approval_choreography() {
    let ctx = setup().await;
    let (batch, actors) = seed_batch(&ctx, "BATCH-2023001").await;
    assert_eq!(batch.status, "pending");

    // Creator cannot review their own batch under any role.
    for role in [1u8, 2u8] {
        let result = ctx
            .services
            .batches
            .review(batch.id, review(role, &actors.creator, true))
            .await;
        assert_matches!(result, Err(ServiceError::SelfReview(_)));
    }

    // First reviewer approves: one decided seat holds the batch in review.
    let after_first = ctx
        .services
        .batches
        .review(batch.id, review(1, &actors.reviewer1, true))
        .await
        .expect("first review");
    assert_eq!(after_first.status, "reviewing");

    // The same person cannot take the second seat.
    let collision = ctx
        .services
        .batches
        .review(batch.id, review(2, &actors.reviewer1, true))
        .await;
    assert_matches!(collision, Err(ServiceError::RoleCollision(_)));
    let unchanged = ctx.services.batches.get_batch(batch.id).await.expect("get");
    assert_eq!(unchanged.status, "reviewing");

    // Second reviewer approves: released.
    let approved = ctx
        .services
        .batches
        .review(batch.id, review(2, &actors.reviewer2, true))
        .await
        .expect("second review");
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.reviewer1_id, Some(actors.reviewer1.id));
    assert_eq!(approved.reviewer2_id, Some(actors.reviewer2.id));
}

#[tokio::test]
async fn rejection_by_either_reviewer_is_final() {
    let ctx = setup().await;

    // Reviewer 2 rejects after reviewer 1 approved.
    let (batch_a, actors_a) = seed_batch(&ctx, "BATCH-REJ-A").await;
    ctx.services
        .batches
        .review(batch_a.id, review(1, &actors_a.reviewer1, true))
        .await
        .expect("approve");
    let rejected = ctx
        .services
        .batches
        .review(batch_a.id, review(2, &actors_a.reviewer2, false))
        .await
        .expect("reject");
    assert_eq!(rejected.status, "rejected");

    // Order reversed: rejection first short-circuits immediately.
    let (batch_b, actors_b) = seed_batch(&ctx, "BATCH-REJ-B").await;
    let rejected = ctx
        .services
        .batches
        .review(batch_b.id, review(2, &actors_b.reviewer2, false))
        .await
        .expect("reject");
    assert_eq!(rejected.status, "rejected");

    // A terminal batch refuses any further review.
    let late = ctx
        .services
        .batches
        .review(batch_b.id, review(1, &actors_b.reviewer1, true))
        .await;
    assert_matches!(late, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn reviewer_may_revise_their_decision_before_terminal_state() {
    let ctx = setup().await;
    let (batch, actors) = seed_batch(&ctx, "BATCH-REVISE").await;

    ctx.services
        .batches
        .review(batch.id, review(1, &actors.reviewer1, true))
        .await
        .expect("initial approval");

    // Same seat, revised decision: the overwrite lands and drives the
    // transition.
    let revised = ctx
        .services
        .batches
        .review(batch.id, review(1, &actors.reviewer1, false))
        .await
        .expect("revised decision");
    assert_eq!(revised.status, "rejected");
}

#[tokio::test]
async fn invalid_role_is_rejected() {
    let ctx = setup().await;
    let (batch, actors) = seed_batch(&ctx, "BATCH-ROLE").await;

    let result = ctx
        .services
        .batches
        .review(batch.id, review(3, &actors.reviewer1, true))
        .await;
    assert_matches!(result, Err(ServiceError::InvalidRole(_)));
}

#[tokio::test]
async fn duplicate_batch_code_conflicts() {
    let ctx = setup().await;
    let (_, actors) = seed_batch(&ctx, "BATCH-DUP").await;
    let sku = create_test_sku(&ctx, "SKU-DUP-2").await;
    let label = create_test_label(&ctx, sku.id, "FN2", "UP2").await;

    let result = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: "BATCH-DUP".to_string(),
            label_version_id: label.id,
            quantity: 10,
            created_by: actors.creator.id,
        })
        .await;

    assert_matches!(result, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn batch_requires_existing_label_and_positive_quantity() {
    let ctx = setup().await;
    let creator = create_test_operator(&ctx, "op_validation").await;
    let sku = create_test_sku(&ctx, "SKU-VALID").await;
    let label = create_test_label(&ctx, sku.id, "FN", "UP").await;

    let missing_label = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: "BATCH-NOLABEL".to_string(),
            label_version_id: uuid::Uuid::new_v4(),
            quantity: 10,
            created_by: creator.id,
        })
        .await;
    assert_matches!(missing_label, Err(ServiceError::NotFound(_)));

    let zero_quantity = ctx
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: "BATCH-ZERO".to_string(),
            label_version_id: label.id,
            quantity: 0,
            created_by: creator.id,
        })
        .await;
    assert_matches!(zero_quantity, Err(ServiceError::ValidationError(_)));
}
