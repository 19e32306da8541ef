use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable product identity. Immutable once created except `product_name`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sku_code: String,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::label_version::Entity")]
    LabelVersion,
}

impl Related<super::label_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
