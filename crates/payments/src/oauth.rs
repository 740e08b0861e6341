//! Mercado Pago account linking (OAuth authorization-code flow).
//!
//! A producer is redirected to the authorization endpoint with their own id
//! as the `state` parameter; the callback exchanges the returned code for
//! an access token server-to-server and looks up the linked account's
//! public identity before persisting the linkage.

use std::time::Duration;

use serde::Deserialize;

use crate::error::PaymentError;

/// HTTP request timeout for a single OAuth call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from `POST /oauth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Mercado Pago's numeric id for the linked account.
    pub user_id: i64,
}

/// Public identity of a linked account from `GET /users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub id: i64,
    pub email: Option<String>,
    pub nickname: Option<String>,
}

/// Client for the account-linking endpoints.
pub struct OAuthClient {
    client: reqwest::Client,
    auth_url: String,
    api_url: String,
}

impl OAuthClient {
    /// Create a client against the authorization and API base URLs.
    pub fn new(auth_url: String, api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            auth_url,
            api_url,
        }
    }

    /// The authorization URL a producer is redirected to when linking.
    ///
    /// `state` carries the producer's own id so the callback can correlate
    /// the grant back to an account.
    pub fn authorization_url(&self, client_id: &str, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/authorization?client_id={}&response_type=code&platform_id=mp&redirect_uri={}&state={}",
            self.auth_url,
            urlencode(client_id),
            urlencode(redirect_uri),
            urlencode(state),
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, PaymentError> {
        let body = serde_json::json!({
            "client_id": client_id,
            "client_secret": client_secret,
            "code": code,
            "grant_type": "authorization_code",
            "redirect_uri": redirect_uri,
        });

        let response = self
            .client
            .post(format!("{}/oauth/token", self.api_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the public identity of the linked account.
    pub async fn fetch_account(
        &self,
        access_token: &str,
        account_id: i64,
    ) -> Result<AccountInfo, PaymentError> {
        let response = self
            .client
            .get(format!("{}/users/{}", self.api_url, account_id))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Percent-encode a query-string value.
///
/// Covers the characters that actually occur in client ids, https redirect
/// URIs, and numeric state values.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => {
                out.push_str(&format!("%{other:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_carries_all_parameters() {
        let client = OAuthClient::new(
            "https://auth.mercadopago.com".to_string(),
            "https://api.mercadopago.com".to_string(),
        );
        let url = client.authorization_url(
            "APP-123",
            "https://alvuelo.app/api/v1/mercadopago/callback",
            "42",
        );

        assert!(url.starts_with("https://auth.mercadopago.com/authorization?"));
        assert!(url.contains("client_id=APP-123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("platform_id=mp"));
        assert!(url.contains("state=42"));
        assert!(url.contains(
            "redirect_uri=https%3A%2F%2Falvuelo.app%2Fapi%2Fv1%2Fmercadopago%2Fcallback"
        ));
    }

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("abc-123_XY.Z~"), "abc-123_XY.Z~");
        assert_eq!(urlencode("a b&c"), "a%20b%26c");
        assert_eq!(urlencode("https://x/y"), "https%3A%2F%2Fx%2Fy");
    }
}
