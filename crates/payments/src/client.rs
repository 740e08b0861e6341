//! REST client for the Mercado Pago API.
//!
//! Every call is authenticated with a bearer token passed in by the caller:
//! preference creation and payment lookups run under the **selling
//! producer's** token (marketplace split), the OAuth account lookup under a
//! freshly exchanged token. The client itself holds no credential.

use std::time::Duration;

use serde::Deserialize;

use crate::error::PaymentError;
use crate::preference::{PreferenceRequest, PreferenceResponse};

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A payment looked up from `GET /v1/payments/{id}`.
///
/// Only the fields reconciliation needs; the full payload is much larger.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInfo {
    pub id: serde_json::Value,
    pub status: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl PaymentInfo {
    /// Whether the processor reports this payment as approved.
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }

    /// The `licenseId` carried in the preference metadata, if present.
    ///
    /// Mercado Pago echoes metadata keys back snake_cased, so both spellings
    /// are accepted.
    pub fn license_id(&self) -> Option<i64> {
        let value = self
            .metadata
            .get("licenseId")
            .or_else(|| self.metadata.get("license_id"))?;
        match value {
            serde_json::Value::String(s) => s.parse().ok(),
            serde_json::Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

/// HTTP client for the Mercado Pago REST API.
pub struct MercadoPagoClient {
    client: reqwest::Client,
    api_url: String,
}

impl MercadoPagoClient {
    /// Create a client against an API base URL, e.g.
    /// `https://api.mercadopago.com`.
    pub fn new(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, api_url }
    }

    /// Create a hosted-checkout preference under the given access token.
    ///
    /// Sends `POST /checkout/preferences`. Not retried: a failed attempt
    /// surfaces to the caller, who asks the buyer to resubmit.
    pub async fn create_preference(
        &self,
        access_token: &str,
        request: &PreferenceRequest,
    ) -> Result<PreferenceResponse, PaymentError> {
        let response = self
            .client
            .post(format!("{}/checkout/preferences", self.api_url))
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Look up a payment by its processor-assigned id.
    ///
    /// Sends `GET /v1/payments/{id}`. Used by webhook reconciliation to
    /// verify status directly instead of trusting the notification body.
    pub async fn get_payment(
        &self,
        access_token: &str,
        payment_id: &str,
    ) -> Result<PaymentInfo, PaymentError> {
        let response = self
            .client
            .get(format!("{}/v1/payments/{}", self.api_url, payment_id))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`PaymentError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
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
        Ok(response)
    }

    /// Check the status and deserialize the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_status_is_detected() {
        let info = PaymentInfo {
            id: serde_json::json!(123),
            status: "approved".to_string(),
            metadata: serde_json::json!({}),
        };
        assert!(info.is_approved());

        let pending = PaymentInfo {
            status: "in_process".to_string(),
            ..info
        };
        assert!(!pending.is_approved());
    }

    #[test]
    fn license_id_reads_both_metadata_spellings() {
        let camel = PaymentInfo {
            id: serde_json::json!(1),
            status: "approved".to_string(),
            metadata: serde_json::json!({ "licenseId": "42" }),
        };
        assert_eq!(camel.license_id(), Some(42));

        let snake = PaymentInfo {
            id: serde_json::json!(1),
            status: "approved".to_string(),
            metadata: serde_json::json!({ "license_id": 42 }),
        };
        assert_eq!(snake.license_id(), Some(42));

        let missing = PaymentInfo {
            id: serde_json::json!(1),
            status: "approved".to_string(),
            metadata: serde_json::json!({}),
        };
        assert_eq!(missing.license_id(), None);
    }
}
