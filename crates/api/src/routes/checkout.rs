//! Route definitions for the `/checkout` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// Routes mounted at `/checkout`.
///
/// ```text
/// POST / -> create a hosted-checkout preference (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkout::create_checkout))
}
