use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review state of a shipment batch.
///
/// `Approved` and `Rejected` are terminal. The stored `status` column is
/// always the value derived from the two reviewer slots; nothing else in the
/// crate writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "pending",
            BatchStatus::Reviewing => "reviewing",
            BatchStatus::Approved => "approved",
            BatchStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BatchStatus::Pending),
            "reviewing" => Some(BatchStatus::Reviewing),
            "approved" => Some(BatchStatus::Approved),
            "rejected" => Some(BatchStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Approved | BatchStatus::Rejected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipment_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_code: String,
    pub label_version_id: Uuid,
    pub quantity: i32,
    pub status: String,
    pub created_by: Uuid,

    pub reviewer1_id: Option<Uuid>,
    pub reviewer1_approved: bool,
    pub reviewer1_comment: String,
    pub reviewer1_at: Option<DateTime<Utc>>,

    pub reviewer2_id: Option<Uuid>,
    pub reviewer2_approved: bool,
    pub reviewer2_comment: String,
    pub reviewer2_at: Option<DateTime<Utc>>,

    // Bumped on every review write; stale writers lose.
    pub version: i32,
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
        belongs_to = "super::operator::Entity",
        from = "Column::CreatedBy",
        to = "super::operator::Column::Id"
    )]
    Creator,
}

impl Related<super::label_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
