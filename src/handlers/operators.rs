use crate::errors::ServiceError;
use crate::services::operators::CreateOperator;
use crate::{AppState, ApiResponse, ListQuery, PaginatedResponse};
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
pub struct CreateOperatorRequest {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_operators).post(create_operator))
        .route("/:id", get(get_operator))
        .route("/:id/deactivate", post(deactivate_operator))
}

pub async fn create_operator(
    State(state): State<AppState>,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = state
        .services
        .operators
        .create_operator(CreateOperator {
            username: req.username,
            full_name: req.full_name,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(operator))))
}

pub async fn get_operator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = state.services.operators.get_operator(id).await?;
    Ok(Json(ApiResponse::success(operator)))
}

pub async fn list_operators(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .services
        .operators
        .list_operators(query.page, query.limit)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, &query,
    ))))
}

pub async fn deactivate_operator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = state.services.operators.deactivate_operator(id).await?;
    Ok(Json(ApiResponse::success(operator)))
}
