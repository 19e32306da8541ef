use crate::{
    db::DbPool,
    entities::{
        inventory_stock::{self, Entity as InventoryStock},
        label_version::Entity as LabelVersion,
        stock_transaction::{self, Entity as StockTransaction, TransactionType},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{locations::load_active_location, operators::load_active_operator},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AppendStockTransaction {
    pub txn_type: TransactionType,
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub quantity_change: i32,
    pub operator_id: Uuid,
    pub reference_doc: String,
}

#[derive(Debug, Clone)]
pub struct TransferStock {
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub from_location_id: Uuid,
    pub to_location_id: Uuid,
    pub quantity: i32,
    pub operator_id: Uuid,
    pub reference_doc: String,
}

/// Result of replaying the ledger against the live projection row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReconcileReport {
    pub ok: bool,
    /// Signed sum of all ledger entries for the pair
    pub expected: i64,
    /// Quantity currently held by the projection row
    pub actual: i64,
}

/// A single balance change, applied inside an open transaction.
#[derive(Debug, Clone)]
pub(crate) struct Movement {
    pub txn_type: TransactionType,
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub quantity_change: i32,
    pub operator_id: Uuid,
    pub reference_doc: String,
}

/// Applies one movement: lock the projection row for the
/// (location, label_version) pair, check the resulting balance, append the
/// ledger entry with its balance snapshot, and upsert the projection.
///
/// This is the only place in the crate that writes either table, and both
/// writes always commit or roll back together with the caller's transaction.
pub(crate) async fn post_movement(
    txn: &DatabaseTransaction,
    movement: Movement,
) -> Result<stock_transaction::Model, ServiceError> {
    let existing = InventoryStock::find()
        .filter(inventory_stock::Column::LocationId.eq(movement.location_id))
        .filter(inventory_stock::Column::LabelVersionId.eq(movement.label_version_id))
        .lock_exclusive()
        .one(txn)
        .await?;

    let prior_balance = existing.as_ref().map(|s| s.quantity).unwrap_or(0);
    let new_balance = prior_balance + movement.quantity_change;
    if new_balance < 0 {
        return Err(ServiceError::NegativeStock(format!(
            "movement of {} would drive stock to {} (current balance {})",
            movement.quantity_change, new_balance, prior_balance
        )));
    }

    let now = Utc::now();
    let entry = stock_transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        txn_type: Set(movement.txn_type.as_str().to_string()),
        sku_id: Set(movement.sku_id),
        label_version_id: Set(movement.label_version_id),
        location_id: Set(movement.location_id),
        quantity_change: Set(movement.quantity_change),
        balance_after: Set(new_balance),
        operator_id: Set(movement.operator_id),
        reference_doc: Set(movement.reference_doc),
        created_at: Set(now),
    };
    let entry = entry.insert(txn).await?;

    match existing {
        Some(stock) => {
            let mut active: inventory_stock::ActiveModel = stock.into();
            active.quantity = Set(new_balance);
            active.updated_at = Set(now);
            active.update(txn).await?;
        }
        None => {
            let stock = inventory_stock::ActiveModel {
                id: Set(Uuid::new_v4()),
                location_id: Set(movement.location_id),
                label_version_id: Set(movement.label_version_id),
                quantity: Set(new_balance),
                created_at: Set(now),
                updated_at: Set(now),
            };
            // Two first-ever appends to the same pair can both see no row;
            // the unique (location, label_version) index rejects the loser.
            stock.insert(txn).await.map_err(|e| {
                if crate::errors::is_unique_violation(&e) {
                    ServiceError::Conflict(
                        "stock row initialized concurrently; retry the movement".to_string(),
                    )
                } else {
                    ServiceError::DatabaseError(e)
                }
            })?;
        }
    }

    Ok(entry)
}

/// Append-only stock ledger and its derived projection.
///
/// Balances exist only as the sum of ledger entries; the projection row is a
/// cache maintained in the same transaction as each append and always
/// reconstructable by replay.
#[derive(Clone)]
pub struct StockLedgerService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StockLedgerService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Appends a single ledger entry and updates the projection atomically.
    ///
    /// Concurrent appends to the same (location, label_version) pair are
    /// serialized by the row lock taken in `post_movement`; appends to
    /// different pairs proceed independently.
    #[instrument(skip(self))]
    pub async fn append(
        &self,
        command: AppendStockTransaction,
    ) -> Result<stock_transaction::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        if command.quantity_change == 0 {
            return Err(ServiceError::ValidationError(
                "quantity_change cannot be zero".to_string(),
            ));
        }
        if command.txn_type == TransactionType::Move {
            return Err(ServiceError::InvalidOperation(
                "move entries are written in pairs; use the transfer operation".to_string(),
            ));
        }

        self.validate_references(&command).await?;

        let movement = Movement {
            txn_type: command.txn_type,
            sku_id: command.sku_id,
            label_version_id: command.label_version_id,
            location_id: command.location_id,
            quantity_change: command.quantity_change,
            operator_id: command.operator_id,
            reference_doc: command.reference_doc.clone(),
        };

        let entry = db
            .transaction::<_, stock_transaction::Model, ServiceError>(move |txn| {
                Box::pin(post_movement(txn, movement))
            })
            .await?;

        info!(
            txn_type = %entry.txn_type,
            location_id = %entry.location_id,
            label_version_id = %entry.label_version_id,
            quantity_change = entry.quantity_change,
            balance_after = entry.balance_after,
            "Stock transaction appended"
        );
        self.event_sender
            .send_or_log(Event::StockAppended {
                transaction_id: entry.id,
                location_id: entry.location_id,
                label_version_id: entry.label_version_id,
                quantity_change: entry.quantity_change,
                balance_after: entry.balance_after,
            })
            .await;

        Ok(entry)
    }

    /// Moves quantity between two locations as two linked `move` entries
    /// sharing one reference document, written in a single transaction.
    #[instrument(skip(self))]
    pub async fn transfer(
        &self,
        command: TransferStock,
    ) -> Result<(stock_transaction::Model, stock_transaction::Model), ServiceError> {
        let db = self.db_pool.as_ref();

        if command.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "transfer quantity must be positive".to_string(),
            ));
        }
        if command.from_location_id == command.to_location_id {
            return Err(ServiceError::ValidationError(
                "transfer source and destination must differ".to_string(),
            ));
        }

        self.validate_references(&AppendStockTransaction {
            txn_type: TransactionType::Move,
            sku_id: command.sku_id,
            label_version_id: command.label_version_id,
            location_id: command.from_location_id,
            quantity_change: -command.quantity,
            operator_id: command.operator_id,
            reference_doc: command.reference_doc.clone(),
        })
        .await?;
        load_active_location(db, command.to_location_id).await?;

        let cmd = command.clone();
        let (out_entry, in_entry) = db
            .transaction::<_, (stock_transaction::Model, stock_transaction::Model), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        // Lock both projection rows up front in a fixed order
                        // so opposite-direction transfers cannot deadlock.
                        let mut pair = [cmd.from_location_id, cmd.to_location_id];
                        pair.sort();
                        for location_id in pair {
                            InventoryStock::find()
                                .filter(inventory_stock::Column::LocationId.eq(location_id))
                                .filter(
                                    inventory_stock::Column::LabelVersionId
                                        .eq(cmd.label_version_id),
                                )
                                .lock_exclusive()
                                .one(txn)
                                .await?;
                        }

                        let out_entry = post_movement(
                            txn,
                            Movement {
                                txn_type: TransactionType::Move,
                                sku_id: cmd.sku_id,
                                label_version_id: cmd.label_version_id,
                                location_id: cmd.from_location_id,
                                quantity_change: -cmd.quantity,
                                operator_id: cmd.operator_id,
                                reference_doc: cmd.reference_doc.clone(),
                            },
                        )
                        .await?;

                        let in_entry = post_movement(
                            txn,
                            Movement {
                                txn_type: TransactionType::Move,
                                sku_id: cmd.sku_id,
                                label_version_id: cmd.label_version_id,
                                location_id: cmd.to_location_id,
                                quantity_change: cmd.quantity,
                                operator_id: cmd.operator_id,
                                reference_doc: cmd.reference_doc,
                            },
                        )
                        .await?;

                        Ok((out_entry, in_entry))
                    })
                },
            )
            .await?;

        info!(
            label_version_id = %command.label_version_id,
            from = %command.from_location_id,
            to = %command.to_location_id,
            quantity = command.quantity,
            "Stock transferred"
        );
        self.event_sender
            .send_or_log(Event::StockTransferred {
                label_version_id: command.label_version_id,
                from_location_id: command.from_location_id,
                to_location_id: command.to_location_id,
                quantity: command.quantity,
                reference_doc: command.reference_doc,
            })
            .await;

        Ok((out_entry, in_entry))
    }

    /// Current projected quantity for a pair; 0 when no row exists.
    #[instrument(skip(self))]
    pub async fn projected_stock(
        &self,
        location_id: Uuid,
        label_version_id: Uuid,
    ) -> Result<i32, ServiceError> {
        let stock = InventoryStock::find()
            .filter(inventory_stock::Column::LocationId.eq(location_id))
            .filter(inventory_stock::Column::LabelVersionId.eq(label_version_id))
            .one(self.db_pool.as_ref())
            .await?;

        Ok(stock.map(|s| s.quantity).unwrap_or(0))
    }

    /// Replays the ledger for a pair and compares against the projection.
    #[instrument(skip(self))]
    pub async fn reconcile(
        &self,
        location_id: Uuid,
        label_version_id: Uuid,
    ) -> Result<ReconcileReport, ServiceError> {
        let entries = self
            .transactions_for_pair(location_id, label_version_id)
            .await?;
        let expected: i64 = entries.iter().map(|e| i64::from(e.quantity_change)).sum();
        let actual = i64::from(self.projected_stock(location_id, label_version_id).await?);

        let report = ReconcileReport {
            ok: expected == actual,
            expected,
            actual,
        };
        if !report.ok {
            tracing::error!(
                %location_id,
                %label_version_id,
                expected = report.expected,
                actual = report.actual,
                "Projection out of sync with ledger"
            );
        }

        Ok(report)
    }

    /// Ledger history for a pair in append order.
    #[instrument(skip(self))]
    pub async fn transactions_for_pair(
        &self,
        location_id: Uuid,
        label_version_id: Uuid,
    ) -> Result<Vec<stock_transaction::Model>, ServiceError> {
        let entries = StockTransaction::find()
            .filter(stock_transaction::Column::LocationId.eq(location_id))
            .filter(stock_transaction::Column::LabelVersionId.eq(label_version_id))
            .order_by_asc(stock_transaction::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;

        Ok(entries)
    }

    /// Checks that the label resolves, belongs to the given SKU, and that
    /// the location and operator are usable.
    async fn validate_references(
        &self,
        command: &AppendStockTransaction,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();

        let label = LabelVersion::find_by_id(command.label_version_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "label version {} not found",
                    command.label_version_id
                ))
            })?;
        if label.sku_id != command.sku_id {
            return Err(ServiceError::ValidationError(format!(
                "label version {} does not belong to SKU {}",
                command.label_version_id, command.sku_id
            )));
        }

        load_active_location(db, command.location_id).await?;
        load_active_operator(db, command.operator_id).await?;

        Ok(())
    }
}
