use crate::entities::shipment_batch::BatchStatus;
use crate::errors::ServiceError;
use crate::services::batches::{CreateShipmentBatch, ReviewBatch};
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBatchRequest {
    pub batch_code: String,
    pub label_version_id: Uuid,
    pub quantity: i32,
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewBatchRequest {
    /// Reviewer seat: 1 or 2
    pub role: u8,
    pub reviewer_id: Uuid,
    pub approved: bool,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchFilters {
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batches).post(create_batch))
        .route("/:id", get(get_batch))
        .route("/:id/review", post(review_batch))
}

pub async fn create_batch(
    State(state): State<AppState>,
    Json(req): Json<CreateBatchRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let batch = state
        .services
        .batches
        .create_batch(CreateShipmentBatch {
            batch_code: req.batch_code,
            label_version_id: req.label_version_id,
            quantity: req.quantity,
            created_by: req.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(batch))))
}

pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let batch = state.services.batches.get_batch(id).await?;
    Ok(Json(ApiResponse::success(batch)))
}

pub async fn list_batches(
    State(state): State<AppState>,
    Query(filters): Query<BatchFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = match filters.status.as_deref() {
        Some(raw) => Some(BatchStatus::from_str(raw).ok_or_else(|| {
            ServiceError::ValidationError(format!("unknown batch status '{}'", raw))
        })?),
        None => None,
    };
    let list = ListQuery {
        page: filters.page.unwrap_or(1),
        limit: filters.limit.unwrap_or(20),
    };

    let (items, total) = state
        .services
        .batches
        .list_batches(list.page, list.limit, status)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, &list,
    ))))
}

/// Records one reviewer's decision on the batch.
#[utoipa::path(
    post,
    path = "/api/v1/batches/{id}/review",
    request_body = ReviewBatchRequest,
    responses(
        (status = 200, description = "Review recorded; derived status returned"),
        (status = 400, description = "Invalid reviewer role", body = crate::errors::ErrorResponse),
        (status = 403, description = "Self-review or role collision", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Concurrent review; retry", body = crate::errors::ErrorResponse)
    ),
    tag = "batches"
)]
pub async fn review_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewBatchRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let batch = state
        .services
        .batches
        .review(
            id,
            ReviewBatch {
                role: req.role,
                reviewer_id: req.reviewer_id,
                approved: req.approved,
                comment: req.comment,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(batch)))
}
