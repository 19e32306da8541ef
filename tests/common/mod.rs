use sea_orm::DatabaseConnection;
use std::sync::Arc;
use stockledger_api::{
    db::{self, DbConfig},
    entities::{
        label_version, operator, sku,
        warehouse_location::{self, LocationKind},
    },
    events::{process_events, EventSender},
    handlers::AppServices,
    services::{labels::CreateLabelVersion, locations::CreateLocation, operators::CreateOperator},
};
use tokio::sync::mpsc;
use uuid::Uuid;

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
}

/// Fresh in-memory database with migrations applied and the full service
/// stack wired over it.
///
/// A single pooled connection keeps every test against its own private
/// sqlite instance.
pub async fn setup() -> TestContext {
    let cfg = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = db::establish_connection_with_config(&cfg)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let db = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(process_events(rx));

    let services = AppServices::new(db.clone(), Arc::new(EventSender::new(tx)));

    TestContext { db, services }
}

pub async fn create_test_operator(ctx: &TestContext, username: &str) -> operator::Model {
    ctx.services
        .operators
        .create_operator(CreateOperator {
            username: username.to_string(),
            full_name: format!("{} (test)", username),
            email: format!("{}@example.com", username),
        })
        .await
        .expect("Failed to create operator")
}

pub async fn create_test_sku(ctx: &TestContext, sku_code: &str) -> sku::Model {
    ctx.services
        .skus
        .create_sku(stockledger_api::services::skus::CreateSku {
            sku_code: sku_code.to_string(),
            product_name: format!("Product {}", sku_code),
        })
        .await
        .expect("Failed to create SKU")
}

pub async fn create_test_location(
    ctx: &TestContext,
    code: &str,
    kind: LocationKind,
) -> warehouse_location::Model {
    ctx.services
        .locations
        .create_location(CreateLocation {
            code: code.to_string(),
            name: format!("Location {}", code),
            kind,
        })
        .await
        .expect("Failed to create location")
}

pub async fn create_test_label(
    ctx: &TestContext,
    sku_id: Uuid,
    fnsku: &str,
    upc: &str,
) -> label_version::Model {
    ctx.services
        .labels
        .create_version(CreateLabelVersion {
            sku_id,
            fnsku: fnsku.to_string(),
            upc: upc.to_string(),
            created_by: "test-suite".to_string(),
        })
        .await
        .expect("Failed to create label version")
}
