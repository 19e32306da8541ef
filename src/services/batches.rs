use crate::{
    db::DbPool,
    entities::{
        label_version::Entity as LabelVersion,
        shipment_batch::{self, BatchStatus, Entity as ShipmentBatch},
    },
    errors::{is_unique_violation, ServiceError},
    events::{Event, EventSender},
    services::operators::load_active_operator,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// One reviewer seat as seen by the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewerSlot {
    pub assigned: bool,
    pub approved: bool,
}

impl ReviewerSlot {
    pub fn empty() -> Self {
        Self {
            assigned: false,
            approved: false,
        }
    }

    pub fn decided(approved: bool) -> Self {
        Self {
            assigned: true,
            approved,
        }
    }
}

/// The dual-review transition function. Pure over the two slots:
/// any assigned rejection is final and short-circuits, both approvals
/// release the batch, one approval holds it in review.
pub fn derive_status(slot1: ReviewerSlot, slot2: ReviewerSlot) -> BatchStatus {
    let slots = [slot1, slot2];

    if slots.iter().any(|s| s.assigned && !s.approved) {
        return BatchStatus::Rejected;
    }

    match slots.iter().filter(|s| s.assigned).count() {
        2 => BatchStatus::Approved,
        1 => BatchStatus::Reviewing,
        _ => BatchStatus::Pending,
    }
}

#[derive(Debug, Clone)]
pub struct CreateShipmentBatch {
    pub batch_code: String,
    pub label_version_id: Uuid,
    pub quantity: i32,
    pub created_by: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReviewBatch {
    pub role: u8,
    pub reviewer_id: Uuid,
    pub approved: bool,
    pub comment: String,
}

/// Dual-Review Gate over shipment batches.
///
/// The stored status is never written directly by callers; every change
/// flows through `review`, which persists the slot write and the derived
/// status atomically.
#[derive(Clone)]
pub struct BatchService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl BatchService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_batch(
        &self,
        command: CreateShipmentBatch,
    ) -> Result<shipment_batch::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        if command.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "batch quantity must be positive".to_string(),
            ));
        }
        if command.batch_code.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "batch_code cannot be empty".to_string(),
            ));
        }

        LabelVersion::find_by_id(command.label_version_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "label version {} not found",
                    command.label_version_id
                ))
            })?;
        let creator = load_active_operator(db, command.created_by).await?;

        let model = shipment_batch::ActiveModel {
            id: Set(Uuid::new_v4()),
            batch_code: Set(command.batch_code.clone()),
            label_version_id: Set(command.label_version_id),
            quantity: Set(command.quantity),
            status: Set(BatchStatus::Pending.as_str().to_string()),
            created_by: Set(creator.id),
            reviewer1_id: Set(None),
            reviewer1_approved: Set(false),
            reviewer1_comment: Set(String::new()),
            reviewer1_at: Set(None),
            reviewer2_id: Set(None),
            reviewer2_approved: Set(false),
            reviewer2_comment: Set(String::new()),
            reviewer2_at: Set(None),
            version: Set(1),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict(format!("batch '{}' already exists", command.batch_code))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        info!(batch_code = %created.batch_code, quantity = created.quantity, "Shipment batch created");
        self.event_sender
            .send_or_log(Event::BatchCreated(created.id))
            .await;

        Ok(created)
    }

    /// Records one reviewer's decision and recomputes the batch status.
    ///
    /// Preconditions, each a distinct failure: the creator cannot review
    /// (SelfReview), one person cannot hold both seats (RoleCollision), the
    /// role must be 1 or 2 (InvalidRole). A terminal batch refuses further
    /// reviews. Concurrent reviews of the same batch are serialized by the
    /// row version: the stale writer gets Conflict and can retry.
    #[instrument(skip(self))]
    pub async fn review(
        &self,
        batch_id: Uuid,
        command: ReviewBatch,
    ) -> Result<shipment_batch::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let reviewer = load_active_operator(db, command.reviewer_id).await?;
        let cmd = command.clone();

        let updated = db
            .transaction::<_, shipment_batch::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let batch = ShipmentBatch::find_by_id(batch_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("batch {} not found", batch_id))
                        })?;

                    let current = BatchStatus::from_str(&batch.status).ok_or_else(|| {
                        ServiceError::InternalError(format!(
                            "batch {} has unknown status '{}'",
                            batch.batch_code, batch.status
                        ))
                    })?;
                    if current.is_terminal() {
                        return Err(ServiceError::InvalidOperation(format!(
                            "batch '{}' is already {}; submit a new batch instead",
                            batch.batch_code, batch.status
                        )));
                    }

                    if batch.created_by == cmd.reviewer_id {
                        return Err(ServiceError::SelfReview(
                            "reviewer cannot be the creator of the batch".to_string(),
                        ));
                    }

                    let now = Utc::now();
                    let mut update =
                        <shipment_batch::ActiveModel as sea_orm::ActiveModelTrait>::default();

                    let (slot1, slot2) = match cmd.role {
                        1 => {
                            if batch.reviewer2_id == Some(cmd.reviewer_id) {
                                return Err(ServiceError::RoleCollision(
                                    "reviewer 1 cannot be the same as reviewer 2".to_string(),
                                ));
                            }
                            update.reviewer1_id = Set(Some(cmd.reviewer_id));
                            update.reviewer1_approved = Set(cmd.approved);
                            update.reviewer1_comment = Set(cmd.comment.clone());
                            update.reviewer1_at = Set(Some(now));
                            (
                                ReviewerSlot::decided(cmd.approved),
                                ReviewerSlot {
                                    assigned: batch.reviewer2_id.is_some(),
                                    approved: batch.reviewer2_approved,
                                },
                            )
                        }
                        2 => {
                            if batch.reviewer1_id == Some(cmd.reviewer_id) {
                                return Err(ServiceError::RoleCollision(
                                    "reviewer 2 cannot be the same as reviewer 1".to_string(),
                                ));
                            }
                            update.reviewer2_id = Set(Some(cmd.reviewer_id));
                            update.reviewer2_approved = Set(cmd.approved);
                            update.reviewer2_comment = Set(cmd.comment.clone());
                            update.reviewer2_at = Set(Some(now));
                            (
                                ReviewerSlot {
                                    assigned: batch.reviewer1_id.is_some(),
                                    approved: batch.reviewer1_approved,
                                },
                                ReviewerSlot::decided(cmd.approved),
                            )
                        }
                        _ => {
                            return Err(ServiceError::InvalidRole(format!(
                                "invalid reviewer role {}; use 1 or 2",
                                cmd.role
                            )))
                        }
                    };

                    let next = derive_status(slot1, slot2);
                    update.status = Set(next.as_str().to_string());
                    update.version = Set(batch.version + 1);

                    let result = ShipmentBatch::update_many()
                        .set(update)
                        .filter(shipment_batch::Column::Id.eq(batch_id))
                        .filter(shipment_batch::Column::Version.eq(batch.version))
                        .exec(txn)
                        .await?;

                    if result.rows_affected == 0 {
                        return Err(ServiceError::Conflict(format!(
                            "batch '{}' was reviewed concurrently; retry",
                            batch.batch_code
                        )));
                    }

                    ShipmentBatch::find_by_id(batch_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::InternalError("batch vanished during review".to_string())
                        })
                })
            })
            .await?;

        info!(
            batch_code = %updated.batch_code,
            reviewer = %reviewer.username,
            role = command.role,
            approved = command.approved,
            status = %updated.status,
            "Batch reviewed"
        );
        self.event_sender
            .send_or_log(Event::BatchReviewed {
                batch_id: updated.id,
                role: command.role,
                approved: command.approved,
                status: updated.status.clone(),
            })
            .await;

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_batch(&self, batch_id: Uuid) -> Result<shipment_batch::Model, ServiceError> {
        ShipmentBatch::find_by_id(batch_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("batch {} not found", batch_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_batches(
        &self,
        page: u64,
        limit: u64,
        status: Option<BatchStatus>,
    ) -> Result<(Vec<shipment_batch::Model>, u64), ServiceError> {
        let mut query = ShipmentBatch::find().order_by_desc(shipment_batch::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(shipment_batch::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db_pool.as_ref(), limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReviewerSlot::empty(), ReviewerSlot::empty(), BatchStatus::Pending)]
    #[case(ReviewerSlot::decided(true), ReviewerSlot::empty(), BatchStatus::Reviewing)]
    #[case(ReviewerSlot::empty(), ReviewerSlot::decided(true), BatchStatus::Reviewing)]
    #[case(
        ReviewerSlot::decided(true),
        ReviewerSlot::decided(true),
        BatchStatus::Approved
    )]
    #[case(
        ReviewerSlot::decided(false),
        ReviewerSlot::empty(),
        BatchStatus::Rejected
    )]
    #[case(
        ReviewerSlot::empty(),
        ReviewerSlot::decided(false),
        BatchStatus::Rejected
    )]
    #[case(
        ReviewerSlot::decided(true),
        ReviewerSlot::decided(false),
        BatchStatus::Rejected
    )]
    #[case(
        ReviewerSlot::decided(false),
        ReviewerSlot::decided(true),
        BatchStatus::Rejected
    )]
    #[case(
        ReviewerSlot::decided(false),
        ReviewerSlot::decided(false),
        BatchStatus::Rejected
    )]
    fn transition_table(
        #[case] slot1: ReviewerSlot,
        #[case] slot2: ReviewerSlot,
        #[case] expected: BatchStatus,
    ) {
        assert_eq!(derive_status(slot1, slot2), expected);
    }

    #[test]
    fn rejection_short_circuits_regardless_of_order() {
        // A single rejection decides the batch even while the other seat is
        // still empty or already approved.
        for other in [
            ReviewerSlot::empty(),
            ReviewerSlot::decided(true),
            ReviewerSlot::decided(false),
        ] {
            assert_eq!(
                derive_status(ReviewerSlot::decided(false), other),
                BatchStatus::Rejected
            );
            assert_eq!(
                derive_status(other, ReviewerSlot::decided(false)),
                BatchStatus::Rejected
            );
        }
    }
}
