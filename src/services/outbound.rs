use crate::{
    db::DbPool,
    entities::{
        label_version::Entity as LabelVersion,
        outbound_execution::{self, Entity as OutboundExecution, ExecutionStatus},
        shipment_batch::{BatchStatus, Entity as ShipmentBatch},
        stock_transaction::TransactionType,
    },
    errors::{is_unique_violation, ServiceError},
    events::{Event, EventSender},
    services::{
        ledger::{post_movement, Movement},
        locations::load_active_location,
        operators::load_active_operator,
    },
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateOutboundExecution {
    pub batch_id: Uuid,
    pub location_id: Uuid,
    pub created_by: Uuid,
}

#[derive(Debug, Clone)]
pub struct AdvanceOutbound {
    pub next_status: ExecutionStatus,
    pub operator_id: Uuid,
    pub tracking_number: Option<String>,
}

/// Fulfillment of approved batches.
///
/// An execution is created only for an approved batch, exactly once, and
/// walks pending → picking → packing → shipped. The ledger is touched only
/// at the shipped transition, in the same transaction as the status flip.
#[derive(Clone)]
pub struct OutboundService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl OutboundService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_execution(
        &self,
        command: CreateOutboundExecution,
    ) -> Result<outbound_execution::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let batch = ShipmentBatch::find_by_id(command.batch_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("batch {} not found", command.batch_id))
            })?;
        if batch.status != BatchStatus::Approved.as_str() {
            return Err(ServiceError::InvalidOperation(format!(
                "batch '{}' is {}, not approved for release",
                batch.batch_code, batch.status
            )));
        }

        load_active_location(db, command.location_id).await?;
        load_active_operator(db, command.created_by).await?;

        let model = outbound_execution::ActiveModel {
            id: Set(Uuid::new_v4()),
            batch_id: Set(batch.id),
            location_id: Set(command.location_id),
            status: Set(ExecutionStatus::Pending.as_str().to_string()),
            tracking_number: Set(None),
            created_by: Set(command.created_by),
            shipped_at: Set(None),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict(format!(
                    "an execution already exists for batch '{}'",
                    batch.batch_code
                ))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        info!(
            batch_code = %batch.batch_code,
            execution_id = %created.id,
            "Outbound execution created"
        );

        Ok(created)
    }

    /// Advances the execution one step; shipping decrements stock.
    ///
    /// Transitions are forward-only and single-step. `shipped` requires a
    /// tracking number, writes the outbound ledger entry for the batch
    /// quantity at the execution's location, and is irreversible.
    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        execution_id: Uuid,
        command: AdvanceOutbound,
    ) -> Result<outbound_execution::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        load_active_operator(db, command.operator_id).await?;

        let cmd = command.clone();
        let updated = db
            .transaction::<_, outbound_execution::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let execution = OutboundExecution::find_by_id(execution_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("execution {} not found", execution_id))
                        })?;

                    let current =
                        ExecutionStatus::from_str(&execution.status).ok_or_else(|| {
                            ServiceError::InternalError(format!(
                                "execution {} has unknown status '{}'",
                                execution.id, execution.status
                            ))
                        })?;
                    if current == ExecutionStatus::Shipped {
                        return Err(ServiceError::InvalidOperation(
                            "execution is already shipped".to_string(),
                        ));
                    }
                    if cmd.next_status.rank() != current.rank() + 1 {
                        return Err(ServiceError::InvalidOperation(format!(
                            "cannot advance from {} to {}",
                            current.as_str(),
                            cmd.next_status.as_str()
                        )));
                    }

                    let mut active: outbound_execution::ActiveModel = execution.clone().into();
                    active.status = Set(cmd.next_status.as_str().to_string());
                    if let Some(tracking) = &cmd.tracking_number {
                        active.tracking_number = Set(Some(tracking.clone()));
                    }

                    if cmd.next_status == ExecutionStatus::Shipped {
                        let tracking = cmd.tracking_number.as_deref().unwrap_or("");
                        if tracking.trim().is_empty() {
                            return Err(ServiceError::ValidationError(
                                "a tracking number is required to ship".to_string(),
                            ));
                        }

                        let batch = ShipmentBatch::find_by_id(execution.batch_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InternalError(format!(
                                    "batch {} missing for execution {}",
                                    execution.batch_id, execution.id
                                ))
                            })?;
                        let label = LabelVersion::find_by_id(batch.label_version_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InternalError(format!(
                                    "label version {} missing for batch '{}'",
                                    batch.label_version_id, batch.batch_code
                                ))
                            })?;

                        post_movement(
                            txn,
                            Movement {
                                txn_type: TransactionType::Outbound,
                                sku_id: label.sku_id,
                                label_version_id: batch.label_version_id,
                                location_id: execution.location_id,
                                quantity_change: -batch.quantity,
                                operator_id: cmd.operator_id,
                                reference_doc: batch.batch_code.clone(),
                            },
                        )
                        .await?;

                        active.shipped_at = Set(Some(Utc::now()));
                    }

                    let updated = active.update(txn).await?;
                    Ok(updated)
                })
            })
            .await?;

        info!(
            execution_id = %updated.id,
            status = %updated.status,
            "Outbound execution advanced"
        );
        if updated.status == ExecutionStatus::Shipped.as_str() {
            self.event_sender
                .send_or_log(Event::OutboundShipped {
                    execution_id: updated.id,
                    batch_id: updated.batch_id,
                    tracking_number: updated.tracking_number.clone().unwrap_or_default(),
                })
                .await;
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_execution(
        &self,
        execution_id: Uuid,
    ) -> Result<outbound_execution::Model, ServiceError> {
        OutboundExecution::find_by_id(execution_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("execution {} not found", execution_id)))
    }
}
