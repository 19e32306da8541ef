use crate::entities::outbound_execution::ExecutionStatus;
use crate::errors::ServiceError;
use crate::services::outbound::{AdvanceOutbound, CreateOutboundExecution};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExecutionRequest {
    pub batch_id: Uuid,
    pub location_id: Uuid,
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdvanceExecutionRequest {
    /// One of "picking", "packing", "shipped"
    pub status: String,
    pub operator_id: Uuid,
    pub tracking_number: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_execution))
        .route("/:id", get(get_execution))
        .route("/:id/advance", post(advance_execution))
}

pub async fn create_execution(
    State(state): State<AppState>,
    Json(req): Json<CreateExecutionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let execution = state
        .services
        .outbound
        .create_execution(CreateOutboundExecution {
            batch_id: req.batch_id,
            location_id: req.location_id,
            created_by: req.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(execution))))
}

pub async fn get_execution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let execution = state.services.outbound.get_execution(id).await?;
    Ok(Json(ApiResponse::success(execution)))
}

/// Advances fulfillment one step; shipping writes the outbound ledger entry.
#[utoipa::path(
    post,
    path = "/api/v1/outbound/{id}/advance",
    request_body = AdvanceExecutionRequest,
    responses(
        (status = 200, description = "Execution advanced"),
        (status = 400, description = "Transition not allowed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Execution not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock to ship", body = crate::errors::ErrorResponse)
    ),
    tag = "outbound"
)]
pub async fn advance_execution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdvanceExecutionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let next_status = ExecutionStatus::from_str(&req.status).ok_or_else(|| {
        ServiceError::ValidationError(format!("unknown execution status '{}'", req.status))
    })?;

    let execution = state
        .services
        .outbound
        .advance(
            id,
            AdvanceOutbound {
                next_status,
                operator_id: req.operator_id,
                tracking_number: req.tracking_number,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(execution)))
}
