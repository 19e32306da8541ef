use crate::entities::warehouse_location::LocationKind;
use crate::errors::ServiceError;
use crate::services::locations::CreateLocation;
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
pub struct CreateLocationRequest {
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// One of "receiving", "storage", "picking", "shipping"
    pub kind: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route("/:id", get(get_location))
        .route("/:id/deactivate", post(deactivate_location))
}

pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = LocationKind::from_str(&req.kind).ok_or_else(|| {
        ServiceError::ValidationError(format!("unknown location kind '{}'", req.kind))
    })?;

    let location = state
        .services
        .locations
        .create_location(CreateLocation {
            code: req.code,
            name: req.name,
            kind,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(location))))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.locations.get_location(id).await?;
    Ok(Json(ApiResponse::success(location)))
}

pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .services
        .locations
        .list_locations(query.page, query.limit)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, &query,
    ))))
}

pub async fn deactivate_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.locations.deactivate_location(id).await?;
    Ok(Json(ApiResponse::success(location)))
}
