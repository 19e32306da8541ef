use crate::entities::{inbound_line_item, inbound_receipt};
use crate::errors::ServiceError;
use crate::services::receiving::{CreateInboundReceipt, NewReceiptLine, RecordScan};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReceiptLineRequest {
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub expected_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReceiptRequest {
    pub receipt_number: String,
    pub created_by: Uuid,
    pub lines: Vec<ReceiptLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanLineRequest {
    pub scanned_quantity: i32,
    pub scanned_fnsku: Option<String>,
    pub scanned_upc: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostReceiptRequest {
    pub operator_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    #[serde(flatten)]
    pub receipt: inbound_receipt::Model,
    pub lines: Vec<inbound_line_item::Model>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_receipt))
        .route("/:id", get(get_receipt))
        .route("/:id/post", post(post_receipt))
        .route("/lines/:line_id/scan", post(scan_line))
}

pub async fn create_receipt(
    State(state): State<AppState>,
    Json(req): Json<CreateReceiptRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let (receipt, lines) = state
        .services
        .receiving
        .create_receipt(CreateInboundReceipt {
            receipt_number: req.receipt_number,
            created_by: req.created_by,
            lines: req
                .lines
                .into_iter()
                .map(|line| NewReceiptLine {
                    label_version_id: line.label_version_id,
                    location_id: line.location_id,
                    expected_quantity: line.expected_quantity,
                })
                .collect(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReceiptResponse { receipt, lines })),
    ))
}

pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let (receipt, lines) = state.services.receiving.get_receipt(id).await?;
    Ok(Json(ApiResponse::success(ReceiptResponse { receipt, lines })))
}

pub async fn scan_line(
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
    Json(req): Json<ScanLineRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let line = state
        .services
        .receiving
        .record_scan(
            line_id,
            RecordScan {
                scanned_quantity: req.scanned_quantity,
                scanned_fnsku: req.scanned_fnsku,
                scanned_upc: req.scanned_upc,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(line)))
}

/// Posts the receipt: one inbound ledger entry per scanned line.
#[utoipa::path(
    post,
    path = "/api/v1/receipts/{id}/post",
    request_body = PostReceiptRequest,
    responses(
        (status = 200, description = "Receipt posted to the ledger"),
        (status = 400, description = "Unscanned or mismatched lines", body = crate::errors::ErrorResponse),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "receiving"
)]
pub async fn post_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PostReceiptRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state
        .services
        .receiving
        .post_receipt(id, req.operator_id)
        .await?;

    Ok(Json(ApiResponse::success(receipt)))
}
