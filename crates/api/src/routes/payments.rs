//! Route definitions for the webhook receiver.
//!
//! Mounted at root level (`/api/payments`) rather than under `/api/v1`:
//! the path is baked into every preference's `notification_url` and must
//! stay stable independently of API versioning.

use axum::routing::get;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/api/payments`.
///
/// ```text
/// GET  /webhook -> liveness probe
/// POST /webhook -> receive a Mercado Pago notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/webhook",
        get(payments::webhook_probe).post(payments::receive_webhook),
    )
}
