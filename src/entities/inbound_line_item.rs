use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One expected label/location/quantity on a receiving document.
///
/// `scanned_checksum`/`scan_matched` are populated when a scan supplies the
/// label identifiers; the posting step refuses lines whose cross-check
/// failed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inbound_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub receipt_id: Uuid,
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub expected_quantity: i32,
    pub scanned_quantity: Option<i32>,
    pub scanned_checksum: Option<String>,
    pub scan_matched: Option<bool>,
    pub scanned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inbound_receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::inbound_receipt::Column::Id"
    )]
    InboundReceipt,
    #[sea_orm(
        belongs_to = "super::label_version::Entity",
        from = "Column::LabelVersionId",
        to = "super::label_version::Column::Id"
    )]
    LabelVersion,
}

impl Related<super::inbound_receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InboundReceipt.def()
    }
}

impl Related<super::label_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
