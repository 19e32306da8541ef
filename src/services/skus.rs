use crate::{
    db::DbPool,
    entities::sku::{self, Entity as Sku},
    errors::{is_unique_violation, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateSku {
    pub sku_code: String,
    pub product_name: String,
}

/// Service for managing product identities
#[derive(Clone)]
pub struct SkuService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SkuService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_sku(&self, command: CreateSku) -> Result<sku::Model, ServiceError> {
        if command.sku_code.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "sku_code cannot be empty".to_string(),
            ));
        }

        let model = sku::ActiveModel {
            id: Set(Uuid::new_v4()),
            sku_code: Set(command.sku_code.clone()),
            product_name: Set(command.product_name),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(self.db_pool.as_ref()).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict(format!("SKU '{}' already exists", command.sku_code))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        info!(sku_id = %created.id, sku_code = %created.sku_code, "SKU created");
        self.event_sender
            .send_or_log(Event::SkuCreated(created.id))
            .await;

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_sku(&self, sku_id: Uuid) -> Result<sku::Model, ServiceError> {
        Sku::find_by_id(sku_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("SKU {} not found", sku_id)))
    }

    /// Renames the product. The display name is the only mutable SKU field;
    /// the code is fixed at creation.
    #[instrument(skip(self))]
    pub async fn rename_product(
        &self,
        sku_id: Uuid,
        product_name: String,
    ) -> Result<sku::Model, ServiceError> {
        let existing = self.get_sku(sku_id).await?;

        let mut active: sku::ActiveModel = existing.into();
        active.product_name = Set(product_name);
        let updated = active.update(self.db_pool.as_ref()).await?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn list_skus(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<sku::Model>, u64), ServiceError> {
        let paginator = Sku::find()
            .order_by_asc(sku::Column::SkuCode)
            .paginate(self.db_pool.as_ref(), limit);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }
}
