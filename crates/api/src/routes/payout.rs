//! Route definitions for payout settings.

use axum::routing::post;
use axum::Router;

use crate::handlers::payout;
use crate::state::AppState;

/// Routes merged into `/api/v1`.
///
/// ```text
/// POST /payout-settings -> update settlement details (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/payout-settings", post(payout::update_payout_settings))
}
