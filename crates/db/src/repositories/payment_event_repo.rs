//! Repository for the `payment_events` audit table.

use alvuelo_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment_event::PaymentEvent;

const COLUMNS: &str = "id, event_type, processor_payment_id, license_id, status, \
                       payload, received_at";

/// Records every accepted webhook notification for audit.
pub struct PaymentEventRepo;

impl PaymentEventRepo {
    /// Insert the raw notification as received.
    pub async fn record(
        pool: &PgPool,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<PaymentEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_events (event_type, payload)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentEvent>(&query)
            .bind(event_type)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Attach reconciliation results (processor payment id, resolved
    /// license, verified status) to an audit row.
    pub async fn attach_reconciliation(
        pool: &PgPool,
        event_id: DbId,
        processor_payment_id: &str,
        license_id: Option<DbId>,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE payment_events
             SET processor_payment_id = $2,
                 license_id = $3,
                 status = $4
             WHERE id = $1",
        )
        .bind(event_id)
        .bind(processor_payment_id)
        .bind(license_id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
