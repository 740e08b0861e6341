//! Route definitions for the `/mercadopago` linking flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mercadopago;
use crate::state::AppState;

/// Routes mounted at `/mercadopago`.
///
/// ```text
/// GET  /connect    -> start linking (producer only)
/// GET  /callback   -> OAuth callback (hit by Mercado Pago's redirect)
/// POST /disconnect -> unlink (producer only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", get(mercadopago::connect))
        .route("/callback", get(mercadopago::callback))
        .route("/disconnect", post(mercadopago::disconnect))
}
