use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyLabelRequest {
    #[serde(default)]
    pub scanned_fnsku: String,
    #[serde(default)]
    pub scanned_upc: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyLabelResponse {
    pub matched: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_label))
        .route("/:id/verify", post(verify_label))
}

pub async fn get_label(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let label = state.services.labels.get_label(id).await?;
    Ok(Json(ApiResponse::success(label)))
}

/// Checks scanned identifiers against the stored label checksum.
#[utoipa::path(
    post,
    path = "/api/v1/labels/{id}/verify",
    request_body = VerifyLabelRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyLabelResponse),
        (status = 404, description = "Label version not found", body = crate::errors::ErrorResponse)
    ),
    tag = "labels"
)]
pub async fn verify_label(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VerifyLabelRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let matched = state
        .services
        .labels
        .verify_label(id, &req.scanned_fnsku, &req.scanned_upc)
        .await?;

    Ok(Json(ApiResponse::success(VerifyLabelResponse { matched })))
}
