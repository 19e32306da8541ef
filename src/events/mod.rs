use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Domain events emitted after successful state changes.
///
/// Events are best-effort notifications: a send failure is logged and never
/// rolls back the committed work that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    SkuCreated(Uuid),
    LabelVersionCreated {
        sku_id: Uuid,
        label_version_id: Uuid,
        version_number: i32,
    },
    BatchCreated(Uuid),
    BatchReviewed {
        batch_id: Uuid,
        role: u8,
        approved: bool,
        status: String,
    },
    StockAppended {
        transaction_id: Uuid,
        location_id: Uuid,
        label_version_id: Uuid,
        quantity_change: i32,
        balance_after: i32,
    },
    StockTransferred {
        label_version_id: Uuid,
        from_location_id: Uuid,
        to_location_id: Uuid,
        quantity: i32,
        reference_doc: String,
    },
    ReceiptPosted {
        receipt_id: Uuid,
        receipt_number: String,
    },
    OutboundShipped {
        execution_id: Uuid,
        batch_id: Uuid,
        tracking_number: String,
    },
    LocationCreated(Uuid),
    OperatorCreated(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of propagating failure.
    ///
    /// Used after a transaction has committed: the state change is already
    /// durable, so a lost notification must not surface as an error.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Event dropped: {}", e);
        }
    }
}

/// Consumes events from the channel and logs them.
///
/// The single subscriber in this service; external delivery (webhooks,
/// queues) would hang off this loop.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "Processing event");
    }
    info!("Event channel closed; event processor shutting down");
}
