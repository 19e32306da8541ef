use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::handlers;
use crate::services::ledger::ReconcileReport;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockLedger API",
        version = "0.1.0",
        description = r#"
# StockLedger Warehouse API

Warehouse inventory tracking built around three guarantees:

- **Immutable label versioning**: every change to a product's external
  identifiers (FNSKU/UPC) creates a new content-hashed label version;
  history is never rewritten.
- **Dual-review release gating**: a shipment batch leaves the warehouse only
  after two independent reviewers approve it. Creators cannot review their
  own batches and one person cannot hold both seats.
- **Append-only stock ledger**: every unit of movement is journaled with its
  resulting balance; the per-location projection is derived from the ledger
  and can be reconciled against it at any time.

## Error Handling

Errors use a consistent JSON body with appropriate HTTP status codes:
404 for missing references, 409 for uniqueness/concurrency conflicts,
403 for review-policy violations, 422 when a movement would drive a
balance negative.
"#
    ),
    paths(
        handlers::skus::create_label_version,
        handlers::labels::verify_label,
        handlers::batches::review_batch,
        handlers::stock::append_transaction,
        handlers::stock::transfer,
        handlers::stock::reconcile,
        handlers::receiving::post_receipt,
        handlers::outbound::advance_execution,
    ),
    components(schemas(
        ErrorResponse,
        ReconcileReport,
        handlers::skus::CreateSkuRequest,
        handlers::skus::CreateLabelVersionRequest,
        handlers::labels::VerifyLabelRequest,
        handlers::labels::VerifyLabelResponse,
        handlers::batches::CreateBatchRequest,
        handlers::batches::ReviewBatchRequest,
        handlers::stock::AppendTransactionRequest,
        handlers::stock::TransferRequest,
        handlers::stock::StockLevelResponse,
        handlers::receiving::CreateReceiptRequest,
        handlers::receiving::ReceiptLineRequest,
        handlers::receiving::ScanLineRequest,
        handlers::receiving::PostReceiptRequest,
        handlers::outbound::CreateExecutionRequest,
        handlers::outbound::AdvanceExecutionRequest,
    )),
    tags(
        (name = "labels", description = "Immutable label versioning"),
        (name = "batches", description = "Dual-review release gating"),
        (name = "stock", description = "Append-only ledger and projection"),
        (name = "receiving", description = "Inbound receipts"),
        (name = "outbound", description = "Outbound executions")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at /docs, serving the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
