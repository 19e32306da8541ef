use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of stock movements recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Inbound,
    Outbound,
    Adjust,
    Move,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Inbound => "inbound",
            TransactionType::Outbound => "outbound",
            TransactionType::Adjust => "adjust",
            TransactionType::Move => "move",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "inbound" => Some(TransactionType::Inbound),
            "outbound" => Some(TransactionType::Outbound),
            "adjust" => Some(TransactionType::Adjust),
            "move" => Some(TransactionType::Move),
            _ => None,
        }
    }
}

/// Append-only ledger entry; the sole authoritative record of movement.
///
/// No update or delete path exists for this table anywhere in the crate.
/// `balance_after` snapshots the resulting quantity for the
/// (location, label_version) pair at append time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub txn_type: String, // stored as string, converted to/from TransactionType
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub quantity_change: i32,
    pub balance_after: i32,
    pub operator_id: Uuid,
    pub reference_doc: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::label_version::Entity",
        from = "Column::LabelVersionId",
        to = "super::label_version::Column::Id"
    )]
    LabelVersion,
    #[sea_orm(
        belongs_to = "super::warehouse_location::Entity",
        from = "Column::LocationId",
        to = "super::warehouse_location::Column::Id"
    )]
    WarehouseLocation,
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if let ActiveValue::NotSet = active_model.created_at {
            active_model.created_at = Set(Utc::now());
        }
        Ok(active_model)
    }
}
