use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content-addressed snapshot of a SKU's external identifiers.
///
/// Rows are append-only: corrections create a new version, never an update.
/// (sku_id, version_number) is unique; the checksum is derived at creation
/// time and is never settable by callers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "label_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sku_id: Uuid,
    pub version_number: i32,
    pub fnsku: String,
    pub upc: String,
    pub created_by: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sku::Entity",
        from = "Column::SkuId",
        to = "super::sku::Column::Id"
    )]
    Sku,
    #[sea_orm(has_many = "super::shipment_batch::Entity")]
    ShipmentBatch,
}

impl Related<super::sku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sku.def()
    }
}

impl Related<super::shipment_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
