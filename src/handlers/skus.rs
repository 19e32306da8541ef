use crate::errors::ServiceError;
use crate::services::skus::CreateSku;
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkuRequest {
    pub sku_code: String,
    #[serde(default)]
    pub product_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameProductRequest {
    pub product_name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_skus).post(create_sku))
        .route("/:id", get(get_sku))
        .route("/:id/name", put(rename_product))
        .route("/:id/labels", get(list_labels).post(create_label_version))
}

pub async fn create_sku(
    State(state): State<AppState>,
    Json(req): Json<CreateSkuRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sku = state
        .services
        .skus
        .create_sku(CreateSku {
            sku_code: req.sku_code,
            product_name: req.product_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(sku))))
}

pub async fn get_sku(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let sku = state.services.skus.get_sku(id).await?;
    Ok(Json(ApiResponse::success(sku)))
}

pub async fn rename_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sku = state
        .services
        .skus
        .rename_product(id, req.product_name)
        .await?;
    Ok(Json(ApiResponse::success(sku)))
}

pub async fn list_skus(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .services
        .skus
        .list_skus(query.page, query.limit)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, &query,
    ))))
}

/// Version history for one SKU, oldest first.
pub async fn list_labels(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    // Surface a 404 for an unknown SKU rather than an empty history.
    state.services.skus.get_sku(id).await?;
    let versions = state.services.labels.list_versions(id).await?;
    Ok(Json(ApiResponse::success(versions)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLabelVersionRequest {
    #[serde(default)]
    pub fnsku: String,
    #[serde(default)]
    pub upc: String,
    pub created_by: String,
}

/// Creates the next immutable label version for the SKU.
#[utoipa::path(
    post,
    path = "/api/v1/skus/{id}/labels",
    request_body = CreateLabelVersionRequest,
    responses(
        (status = 201, description = "Label version created"),
        (status = 404, description = "SKU not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Version number conflict", body = crate::errors::ErrorResponse)
    ),
    tag = "labels"
)]
pub async fn create_label_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateLabelVersionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let label = state
        .services
        .labels
        .create_version(crate::services::labels::CreateLabelVersion {
            sku_id: id,
            fnsku: req.fnsku,
            upc: req.upc,
            created_by: req.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(label))))
}
