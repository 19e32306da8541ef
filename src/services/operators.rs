use crate::{
    db::DbPool,
    entities::operator::{self, Entity as Operator},
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
pub struct CreateOperator {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// Service for managing warehouse operators
#[derive(Clone)]
pub struct OperatorService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl OperatorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_operator(
        &self,
        command: CreateOperator,
    ) -> Result<operator::Model, ServiceError> {
        if command.username.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "username cannot be empty".to_string(),
            ));
        }

        let model = operator::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(command.username.clone()),
            full_name: Set(command.full_name),
            email: Set(command.email),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(self.db_pool.as_ref()).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict(format!("operator '{}' already exists", command.username))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        info!(operator_id = %created.id, username = %created.username, "Operator created");
        self.event_sender
            .send_or_log(Event::OperatorCreated(created.id))
            .await;

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_operator(&self, operator_id: Uuid) -> Result<operator::Model, ServiceError> {
        Operator::find_by_id(operator_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("operator {} not found", operator_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_operators(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<operator::Model>, u64), ServiceError> {
        let paginator = Operator::find()
            .order_by_asc(operator::Column::Username)
            .paginate(self.db_pool.as_ref(), limit);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    pub async fn deactivate_operator(
        &self,
        operator_id: Uuid,
    ) -> Result<operator::Model, ServiceError> {
        let existing = self.get_operator(operator_id).await?;

        let mut active: operator::ActiveModel = existing.into();
        active.is_active = Set(false);
        let updated = active.update(self.db_pool.as_ref()).await?;

        info!(operator_id = %updated.id, "Operator deactivated");
        Ok(updated)
    }
}

/// Resolves an operator that must exist and be active.
///
/// Every mutating operation that takes an operator identity funnels through
/// this lookup; inactive operators are refused even when the id resolves.
pub(crate) async fn load_active_operator<C: ConnectionTrait>(
    db: &C,
    operator_id: Uuid,
) -> Result<operator::Model, ServiceError> {
    let op = Operator::find()
        .filter(operator::Column::Id.eq(operator_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("operator {} not found", operator_id)))?;

    if !op.is_active {
        return Err(ServiceError::ValidationError(format!(
            "operator '{}' is inactive",
            op.username
        )));
    }

    Ok(op)
}
