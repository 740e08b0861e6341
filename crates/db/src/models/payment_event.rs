//! Audit records for inbound payment-processor notifications.

use alvuelo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payment_events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PaymentEvent {
    pub id: DbId,
    pub event_type: String,
    pub processor_payment_id: Option<String>,
    pub license_id: Option<DbId>,
    pub status: Option<String>,
    pub payload: serde_json::Value,
    pub received_at: Timestamp,
}
