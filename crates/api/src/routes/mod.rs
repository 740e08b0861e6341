pub mod auth;
pub mod beats;
pub mod checkout;
pub mod health;
pub mod mercadopago;
pub mod payments;
pub mod payout;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /beats                             list (public), create (producer only)
/// /beats/{slug}                      get (public)
///
/// /checkout                          create preference (public)
///
/// /mercadopago/connect               start linking (producer only)
/// /mercadopago/callback              OAuth callback (hit by Mercado Pago)
/// /mercadopago/disconnect            unlink (producer only)
///
/// POST /payout-settings              update settlement details (requires auth)
/// ```
///
/// The webhook receiver and the health check live outside `/api/v1`; see
/// [`payments::router`] and [`health::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/beats", beats::router())
        .nest("/checkout", checkout::router())
        .nest("/mercadopago", mercadopago::router())
        .merge(payout::router())
}
