//! Mercado Pago account linking for producers.
//!
//! `connect` redirects the producer to the authorization endpoint with
//! their own id as the OAuth `state`; `callback` exchanges the returned
//! code server-to-server and persists the linkage; `disconnect` clears it.
//! The callback is hit by a browser redirect from Mercado Pago, so its
//! failures answer with a redirect back to the dashboard rather than JSON.

use alvuelo_core::error::CoreError;
use alvuelo_core::types::DbId;
use alvuelo_db::models::user::MpLinkage;
use alvuelo_db::repositories::UserRepo;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireProducer;
use crate::state::AppState;

/// Path the OAuth redirect URI points at; must match the route mount.
const CALLBACK_PATH: &str = "/api/v1/mercadopago/callback";
/// Where the callback sends the browser afterwards.
const DASHBOARD_PATH: &str = "/dashboard";

/// Query parameters on the OAuth callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /api/v1/mercadopago/connect
///
/// Start the linking flow (producer only).
pub async fn connect(
    RequireProducer(producer): RequireProducer,
    State(state): State<AppState>,
) -> AppResult<Redirect> {
    let client_id = state
        .mp_config
        .client_id
        .as_deref()
        .ok_or_else(|| AppError::Configuration("Mercado Pago client id is not configured".into()))?;
    let base_url = public_base_url(&state)?;

    let redirect_uri = format!("{base_url}{CALLBACK_PATH}");
    let url = state.mp_oauth.authorization_url(
        client_id,
        &redirect_uri,
        &producer.user_id.to_string(),
    );

    Ok(Redirect::temporary(&url))
}

/// GET /api/v1/mercadopago/callback
///
/// Finish the linking flow. Always answers with a dashboard redirect.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let dashboard = state
        .config
        .public_base_url
        .as_deref()
        .unwrap_or("")
        .to_string()
        + DASHBOARD_PATH;

    match complete_linking(&state, &params).await {
        Ok(producer_id) => {
            tracing::info!(producer_id, "Mercado Pago account linked");
            Redirect::temporary(&format!("{dashboard}?mp_connected=true"))
        }
        Err(err) => {
            tracing::error!(error = %err, "Mercado Pago linking failed");
            Redirect::temporary(&format!("{dashboard}?error=mp_auth_failed"))
        }
    }
}

/// POST /api/v1/mercadopago/disconnect
///
/// Remove the linkage (producer only). Idempotent.
pub async fn disconnect(
    RequireProducer(producer): RequireProducer,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    UserRepo::clear_mp_linkage(&state.pool, producer.user_id).await?;
    tracing::info!(producer_id = producer.user_id, "Mercado Pago account unlinked");
    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the code exchange and persist the linkage, returning the producer id.
async fn complete_linking(state: &AppState, params: &CallbackParams) -> Result<DbId, AppError> {
    if let Some(error) = &params.error {
        return Err(AppError::BadRequest(format!(
            "Authorization was denied: {error}"
        )));
    }
    let code = params
        .code
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;
    let producer_id: DbId = params
        .state
        .as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::BadRequest("Missing or malformed state".into()))?;

    // The grant is only usable for an account that actually exists.
    UserRepo::find_by_id(&state.pool, producer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id: producer_id,
        }))?;

    let client_id = state
        .mp_config
        .client_id
        .as_deref()
        .ok_or_else(|| AppError::Configuration("Mercado Pago client id is not configured".into()))?;
    let client_secret = state.mp_config.client_secret.as_deref().ok_or_else(|| {
        AppError::Configuration("Mercado Pago client secret is not configured".into())
    })?;
    let base_url = public_base_url(state)?;
    let redirect_uri = format!("{base_url}{CALLBACK_PATH}");

    let token = state
        .mp_oauth
        .exchange_code(client_id, client_secret, code, &redirect_uri)
        .await?;
    let account = state
        .mp_oauth
        .fetch_account(&token.access_token, token.user_id)
        .await?;

    UserRepo::set_mp_linkage(
        &state.pool,
        producer_id,
        &MpLinkage {
            access_token: token.access_token,
            account_id: account.id.to_string(),
            email: account.email,
        },
    )
    .await?;

    Ok(producer_id)
}

fn public_base_url(state: &AppState) -> Result<String, AppError> {
    state
        .config
        .public_base_url
        .clone()
        .ok_or_else(|| AppError::Configuration("Public base URL is not configured".into()))
}
