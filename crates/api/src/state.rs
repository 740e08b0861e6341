use std::sync::Arc;

use alvuelo_payments::client::MercadoPagoClient;
use alvuelo_payments::oauth::OAuthClient;
use alvuelo_payments::webhook::SignaturePolicy;
use alvuelo_payments::MercadoPagoConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: alvuelo_db::DbPool,
    /// Server configuration (JWT, base URL, timeouts).
    pub config: Arc<ServerConfig>,
    /// Mercado Pago credentials and endpoint configuration.
    pub mp_config: Arc<MercadoPagoConfig>,
    /// REST client for preferences and payment lookups.
    pub mp_client: Arc<MercadoPagoClient>,
    /// Client for the account-linking OAuth flow.
    pub mp_oauth: Arc<OAuthClient>,
    /// Webhook signature policy.
    pub webhook_policy: Arc<SignaturePolicy>,
}

impl AppState {
    /// Assemble state from loaded configuration and an existing pool.
    pub fn new(
        pool: alvuelo_db::DbPool,
        config: ServerConfig,
        mp_config: MercadoPagoConfig,
    ) -> Self {
        let mp_client = MercadoPagoClient::new(mp_config.api_base_url.clone());
        let mp_oauth = OAuthClient::new(
            mp_config.auth_base_url.clone(),
            mp_config.api_base_url.clone(),
        );
        let webhook_policy = SignaturePolicy::new(
            mp_config.webhook_secret.clone(),
            mp_config.webhook_allow_insecure,
        );

        Self {
            pool,
            config: Arc::new(config),
            mp_config: Arc::new(mp_config),
            mp_client: Arc::new(mp_client),
            mp_oauth: Arc::new(mp_oauth),
            webhook_policy: Arc::new(webhook_policy),
        }
    }
}
