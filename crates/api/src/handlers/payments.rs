//! Inbound Mercado Pago webhook handling.
//!
//! Every accepted notification is recorded verbatim for audit and answered
//! with `{"received": true}` so the processor stops redelivering. The
//! notification body is never trusted for settlement: payment-type events
//! are reconciled by querying the processor directly under the selling
//! producer's token, and only a verified `approved` status closes an
//! exclusive sale. Reconciliation failures are logged, never surfaced.

use alvuelo_core::error::CoreError;
use alvuelo_db::repositories::{LicenseRepo, PaymentEventRepo, UserRepo};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use alvuelo_payments::webhook::SIGNATURE_HEADERS;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters Mercado Pago attaches to notification deliveries.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub topic: Option<String>,
    #[serde(rename = "data.id")]
    pub data_id: Option<String>,
    pub id: Option<String>,
    /// Mercado Pago id of the collector account the event belongs to.
    pub user_id: Option<String>,
}

/// GET /api/payments/webhook
///
/// Liveness probe; Mercado Pago pings the URL when it is registered. Gated
/// by the same signature policy as deliveries.
pub async fn webhook_probe(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Value>> {
    require_valid_signature(&state, &headers)?;
    Ok(Json(json!({ "status": "ok" })))
}

/// POST /api/payments/webhook
pub async fn receive_webhook(
    State(state): State<AppState>,
    Query(params): Query<WebhookParams>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    require_valid_signature(&state, &headers)?;

    // Deliveries are not always JSON; keep whatever arrived.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let event_type = extract_event_type(&payload, &params);
    let event = PaymentEventRepo::record(&state.pool, &event_type, &payload).await?;

    if event_type == "payment" {
        if let Err(err) = reconcile_payment(&state, event.id, &payload, &params).await {
            tracing::warn!(
                event_id = event.id,
                error = %err,
                "Payment reconciliation failed; audit row kept",
            );
        }
    }

    Ok(Json(json!({ "received": true })))
}

/// Verify a payment notification against the processor and settle it.
async fn reconcile_payment(
    state: &AppState,
    event_id: i64,
    payload: &Value,
    params: &WebhookParams,
) -> Result<(), AppError> {
    let Some(payment_id) = extract_payment_id(payload, params) else {
        tracing::warn!(event_id, "Payment notification without a payment id");
        return Ok(());
    };

    // The payment lives in the selling producer's account, so the lookup
    // must run under their token. The collector id on the delivery tells
    // us whose.
    let Some(account_id) = params.user_id.as_deref() else {
        tracing::warn!(event_id, %payment_id, "Payment notification without a collector id");
        return Ok(());
    };
    let Some(producer) = UserRepo::find_by_mp_account_id(&state.pool, account_id).await? else {
        tracing::warn!(event_id, account_id, "No producer linked to collector account");
        return Ok(());
    };
    let Some(token) = producer.mp_access_token.as_deref() else {
        tracing::warn!(event_id, producer_id = producer.id, "Linked producer has no token");
        return Ok(());
    };

    let payment = state.mp_client.get_payment(token, &payment_id).await?;
    let license_id = payment.license_id();

    PaymentEventRepo::attach_reconciliation(
        &state.pool,
        event_id,
        &payment_id,
        license_id,
        &payment.status,
    )
    .await?;

    if payment.is_approved() {
        if let Some(license_id) = license_id {
            close_sale_if_exclusive(state, license_id).await?;
        }
        tracing::info!(event_id, %payment_id, ?license_id, "Payment verified approved");
    }

    Ok(())
}

/// Mark an exclusive tier sold after a verified payment. Other tiers sell
/// any number of times and carry no sale state worth flipping.
async fn close_sale_if_exclusive(state: &AppState, license_id: i64) -> Result<(), AppError> {
    let Some(license) = LicenseRepo::find_by_id(&state.pool, license_id).await? else {
        tracing::warn!(license_id, "Verified payment references an unknown license");
        return Ok(());
    };

    if license.license_type == "exclusive" {
        let flipped = LicenseRepo::mark_sold(&state.pool, license_id).await?;
        if flipped {
            tracing::info!(license_id, "Exclusive license marked sold");
        }
    }
    Ok(())
}

/// Check the request's signature headers against the policy.
fn require_valid_signature(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let provided = signature_header(headers);
    if !state.webhook_policy.verify(provided.as_deref()) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }
    Ok(())
}

/// First signature header present on the request, if any.
fn signature_header(headers: &HeaderMap) -> Option<String> {
    SIGNATURE_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    })
}

/// The notification's event type, from the body when present, the query
/// otherwise.
fn extract_event_type(payload: &Value, params: &WebhookParams) -> String {
    payload
        .get("type")
        .or_else(|| payload.get("topic"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| params.kind.clone())
        .or_else(|| params.topic.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// The processor payment id, from `data.id` in the body or the query.
fn extract_payment_id(payload: &Value, params: &WebhookParams) -> Option<String> {
    let from_body = payload.get("data").and_then(|d| d.get("id"));
    match from_body {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Number(n)) => return Some(n.to_string()),
        _ => {}
    }
    params
        .data_id
        .clone()
        .or_else(|| params.id.clone())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_prefers_the_body() {
        let payload = json!({ "type": "payment" });
        let params = WebhookParams {
            topic: Some("merchant_order".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_event_type(&payload, &params), "payment");
    }

    #[test]
    fn event_type_falls_back_to_the_query() {
        let params = WebhookParams {
            topic: Some("merchant_order".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_event_type(&Value::Null, &params), "merchant_order");
        assert_eq!(
            extract_event_type(&Value::Null, &WebhookParams::default()),
            "unknown"
        );
    }

    #[test]
    fn payment_id_reads_string_and_number_bodies() {
        let params = WebhookParams::default();
        assert_eq!(
            extract_payment_id(&json!({ "data": { "id": "123" } }), &params),
            Some("123".to_string())
        );
        assert_eq!(
            extract_payment_id(&json!({ "data": { "id": 123 } }), &params),
            Some("123".to_string())
        );
    }

    #[test]
    fn payment_id_falls_back_to_query_parameters() {
        let params = WebhookParams {
            data_id: Some("456".to_string()),
            ..Default::default()
        };
        assert_eq!(
            extract_payment_id(&Value::Null, &params),
            Some("456".to_string())
        );

        let params = WebhookParams {
            id: Some("789".to_string()),
            ..Default::default()
        };
        assert_eq!(
            extract_payment_id(&Value::Null, &params),
            Some("789".to_string())
        );
        assert_eq!(extract_payment_id(&Value::Null, &WebhookParams::default()), None);
    }

    #[test]
    fn signature_header_accepts_both_names() {
        let mut headers = HeaderMap::new();
        headers.insert("x-signature", "abc".parse().unwrap());
        assert_eq!(signature_header(&headers), Some("abc".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert("x-mp-signature", "def".parse().unwrap());
        assert_eq!(signature_header(&headers), Some("def".to_string()));

        assert_eq!(signature_header(&HeaderMap::new()), None);
    }
}
