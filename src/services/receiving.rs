use crate::{
    db::DbPool,
    entities::{
        inbound_line_item::{self, Entity as InboundLineItem},
        inbound_receipt::{self, Entity as InboundReceipt, ReceiptStatus},
        label_version::Entity as LabelVersion,
        stock_transaction::TransactionType,
    },
    errors::{is_unique_violation, ServiceError},
    events::{Event, EventSender},
    services::{
        labels::label_checksum,
        ledger::{post_movement, Movement},
        locations::load_active_location,
        operators::load_active_operator,
    },
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewReceiptLine {
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub expected_quantity: i32,
}

#[derive(Debug, Clone)]
pub struct CreateInboundReceipt {
    pub receipt_number: String,
    pub created_by: Uuid,
    pub lines: Vec<NewReceiptLine>,
}

#[derive(Debug, Clone)]
pub struct RecordScan {
    pub scanned_quantity: i32,
    pub scanned_fnsku: Option<String>,
    pub scanned_upc: Option<String>,
}

/// Receiving flow: open a receipt with expected lines, scan each line
/// (optionally cross-checking the physical label against the stored
/// checksum), then post the receipt to the ledger.
#[derive(Clone)]
pub struct ReceivingService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ReceivingService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, command), fields(receipt_number = %command.receipt_number))]
    pub async fn create_receipt(
        &self,
        command: CreateInboundReceipt,
    ) -> Result<(inbound_receipt::Model, Vec<inbound_line_item::Model>), ServiceError> {
        let db = self.db_pool.as_ref();

        if command.lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "receipt must have at least one line".to_string(),
            ));
        }
        if command
            .lines
            .iter()
            .any(|line| line.expected_quantity <= 0)
        {
            return Err(ServiceError::ValidationError(
                "expected quantity must be positive".to_string(),
            ));
        }

        load_active_operator(db, command.created_by).await?;
        for line in &command.lines {
            LabelVersion::find_by_id(line.label_version_id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "label version {} not found",
                        line.label_version_id
                    ))
                })?;
            load_active_location(db, line.location_id).await?;
        }

        let cmd = command.clone();
        let (receipt, lines) = db
            .transaction::<_, (inbound_receipt::Model, Vec<inbound_line_item::Model>), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        let now = Utc::now();
                        let receipt = inbound_receipt::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            receipt_number: Set(cmd.receipt_number.clone()),
                            status: Set(ReceiptStatus::Open.as_str().to_string()),
                            created_by: Set(cmd.created_by),
                            created_at: Set(now),
                            posted_at: Set(None),
                        };
                        let receipt = receipt.insert(txn).await.map_err(|e| {
                            if is_unique_violation(&e) {
                                ServiceError::Conflict(format!(
                                    "receipt '{}' already exists",
                                    cmd.receipt_number
                                ))
                            } else {
                                ServiceError::DatabaseError(e)
                            }
                        })?;

                        let mut lines = Vec::with_capacity(cmd.lines.len());
                        for line in &cmd.lines {
                            let model = inbound_line_item::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                receipt_id: Set(receipt.id),
                                label_version_id: Set(line.label_version_id),
                                location_id: Set(line.location_id),
                                expected_quantity: Set(line.expected_quantity),
                                scanned_quantity: Set(None),
                                scanned_checksum: Set(None),
                                scan_matched: Set(None),
                                scanned_at: Set(None),
                                created_at: Set(now),
                            };
                            lines.push(model.insert(txn).await?);
                        }

                        Ok((receipt, lines))
                    })
                },
            )
            .await?;

        info!(
            receipt_number = %receipt.receipt_number,
            line_count = lines.len(),
            "Inbound receipt created"
        );

        Ok((receipt, lines))
    }

    /// Records what was actually counted at the dock for one line.
    ///
    /// When the scan supplies the label identifiers, the checksum computed
    /// from them is compared to the label version's stored checksum and the
    /// outcome recorded. A mismatch does not fail the scan; it blocks the
    /// posting step.
    #[instrument(skip(self))]
    pub async fn record_scan(
        &self,
        line_id: Uuid,
        command: RecordScan,
    ) -> Result<inbound_line_item::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        if command.scanned_quantity < 0 {
            return Err(ServiceError::ValidationError(
                "scanned quantity cannot be negative".to_string(),
            ));
        }

        let line = InboundLineItem::find_by_id(line_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("receipt line {} not found", line_id)))?;

        let receipt = InboundReceipt::find_by_id(line.receipt_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "receipt {} missing for line {}",
                    line.receipt_id, line_id
                ))
            })?;
        if receipt.status != ReceiptStatus::Open.as_str() {
            return Err(ServiceError::InvalidOperation(format!(
                "receipt '{}' is already posted",
                receipt.receipt_number
            )));
        }

        let label = LabelVersion::find_by_id(line.label_version_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "label version {} missing for line {}",
                    line.label_version_id, line_id
                ))
            })?;

        let (scanned_checksum, scan_matched) =
            match (&command.scanned_fnsku, &command.scanned_upc) {
                (Some(fnsku), Some(upc)) => {
                    let checksum = label_checksum(fnsku, upc);
                    let matched = checksum == label.checksum;
                    if !matched {
                        warn!(
                            line_id = %line_id,
                            label_version_id = %label.id,
                            "Scanned label does not match stored checksum"
                        );
                    }
                    (Some(checksum), Some(matched))
                }
                _ => (None, None),
            };

        let mut active: inbound_line_item::ActiveModel = line.into();
        active.scanned_quantity = Set(Some(command.scanned_quantity));
        active.scanned_checksum = Set(scanned_checksum);
        active.scan_matched = Set(scan_matched);
        active.scanned_at = Set(Some(Utc::now()));
        let updated = active.update(db).await?;

        Ok(updated)
    }

    /// Posts a receipt: one inbound ledger entry per scanned line, the
    /// receipt number as the shared reference document, and the status flip
    /// to `posted` — all in one transaction.
    #[instrument(skip(self))]
    pub async fn post_receipt(
        &self,
        receipt_id: Uuid,
        operator_id: Uuid,
    ) -> Result<inbound_receipt::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        load_active_operator(db, operator_id).await?;

        let posted = db
            .transaction::<_, inbound_receipt::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let receipt = InboundReceipt::find_by_id(receipt_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("receipt {} not found", receipt_id))
                        })?;
                    if receipt.status != ReceiptStatus::Open.as_str() {
                        return Err(ServiceError::InvalidOperation(format!(
                            "receipt '{}' is already posted",
                            receipt.receipt_number
                        )));
                    }

                    let lines = InboundLineItem::find()
                        .filter(inbound_line_item::Column::ReceiptId.eq(receipt.id))
                        .order_by_asc(inbound_line_item::Column::CreatedAt)
                        .all(txn)
                        .await?;

                    for line in &lines {
                        let scanned = line.scanned_quantity.ok_or_else(|| {
                            ServiceError::ValidationError(format!(
                                "line {} has not been scanned",
                                line.id
                            ))
                        })?;
                        if line.scan_matched == Some(false) {
                            return Err(ServiceError::ValidationError(format!(
                                "line {} failed the label cross-check",
                                line.id
                            )));
                        }
                        if scanned == 0 {
                            // Nothing arrived for this line; no ledger entry.
                            continue;
                        }

                        let label = LabelVersion::find_by_id(line.label_version_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InternalError(format!(
                                    "label version {} missing for line {}",
                                    line.label_version_id, line.id
                                ))
                            })?;

                        post_movement(
                            txn,
                            Movement {
                                txn_type: TransactionType::Inbound,
                                sku_id: label.sku_id,
                                label_version_id: line.label_version_id,
                                location_id: line.location_id,
                                quantity_change: scanned,
                                operator_id,
                                reference_doc: receipt.receipt_number.clone(),
                            },
                        )
                        .await?;
                    }

                    let mut active: inbound_receipt::ActiveModel = receipt.into();
                    active.status = Set(ReceiptStatus::Posted.as_str().to_string());
                    active.posted_at = Set(Some(Utc::now()));
                    let posted = active.update(txn).await?;

                    Ok(posted)
                })
            })
            .await?;

        info!(receipt_number = %posted.receipt_number, "Inbound receipt posted");
        self.event_sender
            .send_or_log(Event::ReceiptPosted {
                receipt_id: posted.id,
                receipt_number: posted.receipt_number.clone(),
            })
            .await;

        Ok(posted)
    }

    #[instrument(skip(self))]
    pub async fn get_receipt(
        &self,
        receipt_id: Uuid,
    ) -> Result<(inbound_receipt::Model, Vec<inbound_line_item::Model>), ServiceError> {
        let db = self.db_pool.as_ref();

        let receipt = InboundReceipt::find_by_id(receipt_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("receipt {} not found", receipt_id)))?;
        let lines = InboundLineItem::find()
            .filter(inbound_line_item::Column::ReceiptId.eq(receipt.id))
            .order_by_asc(inbound_line_item::Column::CreatedAt)
            .all(db)
            .await?;

        Ok((receipt, lines))
    }
}
