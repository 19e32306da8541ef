pub mod batches;
pub mod health;
pub mod labels;
pub mod locations;
pub mod operators;
pub mod outbound;
pub mod receiving;
pub mod skus;
pub mod stock;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub operators: Arc<crate::services::operators::OperatorService>,
    pub skus: Arc<crate::services::skus::SkuService>,
    pub locations: Arc<crate::services::locations::LocationService>,
    pub labels: Arc<crate::services::labels::LabelService>,
    pub batches: Arc<crate::services::batches::BatchService>,
    pub ledger: Arc<crate::services::ledger::StockLedgerService>,
    pub receiving: Arc<crate::services::receiving::ReceivingService>,
    pub outbound: Arc<crate::services::outbound::OutboundService>,
}

impl AppServices {
    /// Build the full services container over one pool and event channel.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let operators = Arc::new(crate::services::operators::OperatorService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let skus = Arc::new(crate::services::skus::SkuService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let locations = Arc::new(crate::services::locations::LocationService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let labels = Arc::new(crate::services::labels::LabelService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let batches = Arc::new(crate::services::batches::BatchService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let ledger = Arc::new(crate::services::ledger::StockLedgerService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let receiving = Arc::new(crate::services::receiving::ReceivingService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let outbound = Arc::new(crate::services::outbound::OutboundService::new(
            db_pool,
            event_sender,
        ));

        Self {
            operators,
            skus,
            locations,
            labels,
            batches,
            ledger,
            receiving,
            outbound,
        }
    }
}
