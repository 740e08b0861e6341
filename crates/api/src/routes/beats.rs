//! Route definitions for the `/beats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::beats;
use crate::state::AppState;

/// Routes mounted at `/beats`.
///
/// ```text
/// GET  /        -> list published beats (public)
/// POST /        -> publish a beat (producer only)
/// GET  /{slug}  -> one published beat (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(beats::list_beats).post(beats::create_beat))
        .route("/{slug}", get(beats::get_beat))
}
