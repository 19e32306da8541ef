use crate::entities::stock_transaction::TransactionType;
use crate::errors::ServiceError;
use crate::services::ledger::{AppendStockTransaction, TransferStock};
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppendTransactionRequest {
    /// One of "inbound", "outbound", "adjust"
    pub txn_type: String,
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub location_id: Uuid,
    pub quantity_change: i32,
    pub operator_id: Uuid,
    #[serde(default)]
    pub reference_doc: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub sku_id: Uuid,
    pub label_version_id: Uuid,
    pub from_location_id: Uuid,
    pub to_location_id: Uuid,
    pub quantity: i32,
    pub operator_id: Uuid,
    #[serde(default)]
    pub reference_doc: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockPairQuery {
    pub location_id: Uuid,
    pub label_version_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockLevelResponse {
    pub location_id: Uuid,
    pub label_version_id: Uuid,
    pub quantity: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stock))
        .route(
            "/transactions",
            get(list_transactions).post(append_transaction),
        )
        .route("/transfer", post(transfer))
        .route("/reconcile", get(reconcile))
}

/// Appends one ledger entry and updates the projection atomically.
#[utoipa::path(
    post,
    path = "/api/v1/stock/transactions",
    request_body = AppendTransactionRequest,
    responses(
        (status = 201, description = "Ledger entry appended"),
        (status = 404, description = "Referenced entity not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Balance would go negative", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn append_transaction(
    State(state): State<AppState>,
    Json(req): Json<AppendTransactionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let txn_type = TransactionType::from_str(&req.txn_type).ok_or_else(|| {
        ServiceError::ValidationError(format!("unknown transaction type '{}'", req.txn_type))
    })?;

    let entry = state
        .services
        .ledger
        .append(AppendStockTransaction {
            txn_type,
            sku_id: req.sku_id,
            label_version_id: req.label_version_id,
            location_id: req.location_id,
            quantity_change: req.quantity_change,
            operator_id: req.operator_id,
            reference_doc: req.reference_doc,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

/// Moves quantity between locations as a linked pair of `move` entries.
#[utoipa::path(
    post,
    path = "/api/v1/stock/transfer",
    request_body = TransferRequest,
    responses(
        (status = 201, description = "Both movement entries appended"),
        (status = 422, description = "Source balance insufficient", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn transfer(
    State(state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let (out_entry, in_entry) = state
        .services
        .ledger
        .transfer(TransferStock {
            sku_id: req.sku_id,
            label_version_id: req.label_version_id,
            from_location_id: req.from_location_id,
            to_location_id: req.to_location_id,
            quantity: req.quantity,
            operator_id: req.operator_id,
            reference_doc: req.reference_doc,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vec![out_entry, in_entry])),
    ))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Query(query): Query<StockPairQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let quantity = state
        .services
        .ledger
        .projected_stock(query.location_id, query.label_version_id)
        .await?;

    Ok(Json(ApiResponse::success(StockLevelResponse {
        location_id: query.location_id,
        label_version_id: query.label_version_id,
        quantity,
    })))
}

/// Replays the ledger for the pair and compares it to the projection.
#[utoipa::path(
    get,
    path = "/api/v1/stock/reconcile",
    responses(
        (status = 200, description = "Reconciliation report", body = crate::services::ledger::ReconcileReport)
    ),
    tag = "stock"
)]
pub async fn reconcile(
    State(state): State<AppState>,
    Query(query): Query<StockPairQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .ledger
        .reconcile(query.location_id, query.label_version_id)
        .await?;

    Ok(Json(ApiResponse::success(report)))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<StockPairQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state
        .services
        .ledger
        .transactions_for_pair(query.location_id, query.label_version_id)
        .await?;

    Ok(Json(ApiResponse::success(entries)))
}
