//! Environment configuration for the Mercado Pago integration.

/// Mercado Pago credentials and endpoint configuration.
///
/// Endpoint URLs are overridable so tests and sandboxes can point the
/// client elsewhere; production deployments leave the defaults alone.
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// OAuth application client id (`MP_CLIENT_ID`). Required for linking.
    pub client_id: Option<String>,
    /// OAuth application client secret (`MP_CLIENT_SECRET`).
    pub client_secret: Option<String>,
    /// Shared secret expected in webhook signature headers
    /// (`MP_WEBHOOK_SECRET`).
    pub webhook_secret: Option<String>,
    /// Explicit opt-in to accept unsigned webhooks when no secret is
    /// configured (`MP_WEBHOOK_ALLOW_INSECURE=true`). Local development only.
    pub webhook_allow_insecure: bool,
    /// Override for the notification URL (`MP_WEBHOOK_URL`); when unset the
    /// URL is derived from the public base URL.
    pub webhook_url_override: Option<String>,
    /// REST API base (`MP_API_BASE_URL`, default `https://api.mercadopago.com`).
    pub api_base_url: String,
    /// Authorization endpoint base (`MP_AUTH_BASE_URL`, default
    /// `https://auth.mercadopago.com`).
    pub auth_base_url: String,
}

/// Default REST API base URL.
const DEFAULT_API_BASE: &str = "https://api.mercadopago.com";
/// Default authorization base URL.
const DEFAULT_AUTH_BASE: &str = "https://auth.mercadopago.com";

impl MercadoPagoConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default                         |
    /// |-----------------------------|----------|---------------------------------|
    /// | `MP_CLIENT_ID`              | no*      | --                              |
    /// | `MP_CLIENT_SECRET`          | no*      | --                              |
    /// | `MP_WEBHOOK_SECRET`         | no       | --                              |
    /// | `MP_WEBHOOK_ALLOW_INSECURE` | no       | `false`                         |
    /// | `MP_WEBHOOK_URL`            | no       | derived from the base URL       |
    /// | `MP_API_BASE_URL`           | no       | `https://api.mercadopago.com`   |
    /// | `MP_AUTH_BASE_URL`          | no       | `https://auth.mercadopago.com`  |
    ///
    /// *Account linking answers 500 when the client id is missing; checkout
    /// itself only needs producer tokens.
    pub fn from_env() -> Self {
        Self {
            client_id: read_non_empty("MP_CLIENT_ID"),
            client_secret: read_non_empty("MP_CLIENT_SECRET"),
            webhook_secret: read_non_empty("MP_WEBHOOK_SECRET"),
            webhook_allow_insecure: std::env::var("MP_WEBHOOK_ALLOW_INSECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            webhook_url_override: read_non_empty("MP_WEBHOOK_URL"),
            api_base_url: read_non_empty("MP_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            auth_base_url: read_non_empty("MP_AUTH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AUTH_BASE.to_string()),
        }
    }
}

/// Read an env var, treating unset and empty the same.
fn read_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
