use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Projected on-hand quantity for one label version at one location.
///
/// Derived cache over `stock_transactions`: the quantity here must always
/// equal the signed sum of all ledger entries for the pair. Rows are written
/// only inside the same transaction as a ledger append, never independently.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_stock")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub location_id: Uuid,
    pub label_version_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse_location::Entity",
        from = "Column::LocationId",
        to = "super::warehouse_location::Column::Id"
    )]
    WarehouseLocation,
    #[sea_orm(
        belongs_to = "super::label_version::Entity",
        from = "Column::LabelVersionId",
        to = "super::label_version::Column::Id"
    )]
    LabelVersion,
}

impl Related<super::warehouse_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarehouseLocation.def()
    }
}

impl Related<super::label_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
