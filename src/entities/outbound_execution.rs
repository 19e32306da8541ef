use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fulfillment progress of an approved batch. Forward-only; `Shipped` is
/// terminal and is the point where outbound stock is actually decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Pending,
    Picking,
    Packing,
    Shipped,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Picking => "picking",
            ExecutionStatus::Packing => "packing",
            ExecutionStatus::Shipped => "shipped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ExecutionStatus::Pending),
            "picking" => Some(ExecutionStatus::Picking),
            "packing" => Some(ExecutionStatus::Packing),
            "shipped" => Some(ExecutionStatus::Shipped),
            _ => None,
        }
    }

    /// Position in the pending → picking → packing → shipped sequence.
    pub fn rank(&self) -> u8 {
        match self {
            ExecutionStatus::Pending => 0,
            ExecutionStatus::Picking => 1,
            ExecutionStatus::Packing => 2,
            ExecutionStatus::Shipped => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outbound_executions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_id: Uuid,
    pub location_id: Uuid,
    pub status: String,
    pub tracking_number: Option<String>,
    pub created_by: Uuid,
    pub shipped_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shipment_batch::Entity",
        from = "Column::BatchId",
        to = "super::shipment_batch::Column::Id"
    )]
    ShipmentBatch,
    #[sea_orm(
        belongs_to = "super::warehouse_location::Entity",
        from = "Column::LocationId",
        to = "super::warehouse_location::Column::Id"
    )]
    WarehouseLocation,
}

impl Related<super::shipment_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
