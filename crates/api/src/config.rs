//! Server configuration loaded from environment variables.

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// The deployment's public base URL, used to build checkout redirect
    /// and webhook URLs. `None` when no candidate source resolved.
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let public_base_url = resolve_public_base_url(
            std::env::var("APP_BASE_URL").ok().as_deref(),
            std::env::var("PUBLIC_APP_URL").ok().as_deref(),
            std::env::var("DEPLOY_URL").ok().as_deref(),
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            public_base_url,
        }
    }
}

/// Resolve the public base URL from its candidate sources, in order:
/// explicit app base URL, public app URL, platform deployment URL, then a
/// local-development fallback.
///
/// The fallback applies only when no deployment URL was provided at all; a
/// deployment URL that normalizes to nothing (e.g. whitespace) yields
/// `None`, which the checkout flow reports as a configuration error.
pub fn resolve_public_base_url(
    app_base_url: Option<&str>,
    public_app_url: Option<&str>,
    deploy_url: Option<&str>,
) -> Option<String> {
    normalize_base_url(app_base_url)
        .or_else(|| normalize_base_url(public_app_url))
        .or_else(|| match deploy_url {
            Some(url) => normalize_base_url(Some(url)),
            None => Some("http://localhost:3000".to_string()),
        })
}

/// Normalize a base-URL candidate: trim, then prefix a scheme when one is
/// missing (`http://` for localhost, `https://` otherwise). Blank
/// candidates yield `None`.
fn normalize_base_url(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return Some(format!("http://{trimmed}"));
    }
    Some(format!("https://{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_app_base_url_wins() {
        let url = resolve_public_base_url(
            Some("https://alvuelo.app"),
            Some("https://public.example"),
            Some("deploy.example"),
        );
        assert_eq!(url.as_deref(), Some("https://alvuelo.app"));
    }

    #[test]
    fn falls_through_candidates_in_order() {
        let url = resolve_public_base_url(None, Some("public.example"), Some("deploy.example"));
        assert_eq!(url.as_deref(), Some("https://public.example"));

        let url = resolve_public_base_url(None, None, Some("deploy.example"));
        assert_eq!(url.as_deref(), Some("https://deploy.example"));
    }

    #[test]
    fn local_development_fallback() {
        let url = resolve_public_base_url(None, None, None);
        assert_eq!(url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn blank_candidates_are_skipped() {
        let url = resolve_public_base_url(Some("   "), Some(""), None);
        assert_eq!(url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn unusable_deploy_url_yields_none() {
        let url = resolve_public_base_url(None, None, Some("   "));
        assert_eq!(url, None);
    }

    #[test]
    fn localhost_gets_http_scheme() {
        let url = resolve_public_base_url(Some("localhost:4000"), None, None);
        assert_eq!(url.as_deref(), Some("http://localhost:4000"));

        let url = resolve_public_base_url(Some("127.0.0.1:4000"), None, None);
        assert_eq!(url.as_deref(), Some("http://127.0.0.1:4000"));
    }

    #[test]
    fn existing_scheme_is_preserved() {
        let url = resolve_public_base_url(Some("http://staging.alvuelo.app"), None, None);
        assert_eq!(url.as_deref(), Some("http://staging.alvuelo.app"));
    }
}
