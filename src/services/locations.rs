use crate::{
    db::DbPool,
    entities::warehouse_location::{self, Entity as WarehouseLocation, LocationKind},
    errors::{is_unique_violation, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateLocation {
    pub code: String,
    pub name: String,
    pub kind: LocationKind,
}

/// Service for managing warehouse storage slots
#[derive(Clone)]
pub struct LocationService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl LocationService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_location(
        &self,
        command: CreateLocation,
    ) -> Result<warehouse_location::Model, ServiceError> {
        if command.code.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "location code cannot be empty".to_string(),
            ));
        }

        let model = warehouse_location::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(command.code.clone()),
            name: Set(command.name),
            kind: Set(command.kind.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(self.db_pool.as_ref()).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict(format!("location '{}' already exists", command.code))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        info!(location_id = %created.id, code = %created.code, kind = %created.kind, "Location created");
        self.event_sender
            .send_or_log(Event::LocationCreated(created.id))
            .await;

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_location(
        &self,
        location_id: Uuid,
    ) -> Result<warehouse_location::Model, ServiceError> {
        WarehouseLocation::find_by_id(location_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("location {} not found", location_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_locations(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<warehouse_location::Model>, u64), ServiceError> {
        let paginator = WarehouseLocation::find()
            .order_by_asc(warehouse_location::Column::Code)
            .paginate(self.db_pool.as_ref(), limit);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    pub async fn deactivate_location(
        &self,
        location_id: Uuid,
    ) -> Result<warehouse_location::Model, ServiceError> {
        let existing = self.get_location(location_id).await?;

        let mut active: warehouse_location::ActiveModel = existing.into();
        active.is_active = Set(false);
        let updated = active.update(self.db_pool.as_ref()).await?;

        info!(location_id = %updated.id, "Location deactivated");
        Ok(updated)
    }
}

/// Resolves a location that must exist and be active.
pub(crate) async fn load_active_location<C: ConnectionTrait>(
    db: &C,
    location_id: Uuid,
) -> Result<warehouse_location::Model, ServiceError> {
    let location = WarehouseLocation::find()
        .filter(warehouse_location::Column::Id.eq(location_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("location {} not found", location_id)))?;

    if !location.is_active {
        return Err(ServiceError::ValidationError(format!(
            "location '{}' is inactive",
            location.code
        )));
    }

    Ok(location)
}
