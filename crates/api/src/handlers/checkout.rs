//! Checkout orchestration: one license -> one hosted-checkout preference.
//!
//! The preference is created under the selling producer's own access token,
//! so the money lands in their account directly; the platform commission is
//! annotated in metadata and settled out of band. Nothing here is retried:
//! a failed upstream call surfaces to the buyer, who resubmits.

use alvuelo_core::error::CoreError;
use alvuelo_core::licensing::LicenseType;
use alvuelo_core::types::DbId;
use alvuelo_db::models::license::LicenseCheckoutContext;
use alvuelo_db::repositories::LicenseRepo;
use alvuelo_payments::preference::{build_preference, Buyer, LicenseContext};
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::state::AppState;

/// Request body for `POST /checkout`. Field names match what the
/// storefront sends.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub license_id: i64,
    #[validate(email(message = "buyerEmail must be a valid address"))]
    pub buyer_email: String,
    #[validate(length(min = 2, message = "buyerName must be at least 2 characters"))]
    pub buyer_name: String,
}

/// POST /api/v1/checkout
///
/// Validate the purchase, reserve an exclusive tier if needed, and create
/// the hosted-checkout preference. Answers 201 with the redirect URLs.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // Without a resolvable public base URL the redirect and webhook URLs
    // cannot be built; that is a deployment problem, not a buyer problem.
    let base_url = state
        .config
        .public_base_url
        .clone()
        .ok_or_else(|| AppError::Configuration("Public base URL is not configured".into()))?;

    let row = LicenseRepo::find_checkout_context(&state.pool, input.license_id).await?;
    let (context, license_type, producer_token) = authorize_sale(row, input.license_id)?;

    // An exclusive tier is sold at most once. Take the reservation before
    // talking to the processor; losing the compare-and-swap means another
    // buyer got there first (or it is already sold).
    let reserved = if license_type.is_single_sale() {
        if !LicenseRepo::reserve_exclusive(&state.pool, context.license_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "This exclusive license is reserved or already sold".into(),
            )));
        }
        true
    } else {
        false
    };

    let request = build_preference(
        &license_context(&context, license_type),
        &Buyer {
            name: input.buyer_name,
            email: input.buyer_email,
        },
        &base_url,
        state.mp_config.webhook_url_override.as_deref(),
    );

    let preference = match state
        .mp_client
        .create_preference(&producer_token, &request)
        .await
    {
        Ok(preference) => preference,
        Err(err) => {
            // Free the tier again so the failed attempt does not block the
            // next buyer for the whole reservation window.
            if reserved {
                if let Err(release_err) =
                    LicenseRepo::release_reservation(&state.pool, context.license_id).await
                {
                    tracing::error!(
                        license_id = context.license_id,
                        error = %release_err,
                        "Failed to release reservation after upstream failure",
                    );
                }
            }
            return Err(AppError::Upstream(err));
        }
    };

    tracing::info!(
        license_id = context.license_id,
        beat_slug = %context.beat_slug,
        producer_id = context.producer_id,
        preference_id = %preference.id,
        "Checkout preference created",
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": preference.id,
            "initPoint": preference.init_point,
            "sandboxInitPoint": preference.sandbox_init_point,
        })),
    ))
}

/// The precondition chain over the checkout-context row: the beat must be
/// published (404 otherwise), the producer linked (400), and an exclusive
/// tier not already sold (409). Races on live reservations are decided
/// later by the database compare-and-swap. Returns the parsed tier and the
/// producer's access token.
fn authorize_sale(
    row: Option<LicenseCheckoutContext>,
    license_id: DbId,
) -> Result<(LicenseCheckoutContext, LicenseType, String), AppError> {
    let context = row
        .filter(|ctx| ctx.is_published)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "License",
            id: license_id,
        }))?;

    let license_type = LicenseType::parse(&context.license_type).ok_or_else(|| {
        AppError::InternalError(format!("Unknown license type: {}", context.license_type))
    })?;

    if !context.mp_connected {
        return Err(AppError::Core(CoreError::Precondition(
            "This producer has not connected Mercado Pago yet".into(),
        )));
    }
    let producer_token = context.mp_access_token.clone().ok_or_else(|| {
        AppError::Core(CoreError::Precondition(
            "This producer has not connected Mercado Pago yet".into(),
        ))
    })?;

    if license_type.is_single_sale() && context.sale_state == "sold" {
        return Err(AppError::Core(CoreError::Conflict(
            "This exclusive license is reserved or already sold".into(),
        )));
    }

    Ok((context, license_type, producer_token))
}

/// Project the persistence-layer join row into the builder's input type.
fn license_context(context: &LicenseCheckoutContext, license_type: LicenseType) -> LicenseContext {
    LicenseContext {
        license_id: context.license_id,
        license_type,
        price_minor_units: context.price_minor_units,
        currency: context.currency.clone(),
        terms: context.terms.clone(),
        beat_id: context.beat_id,
        beat_slug: context.beat_slug.clone(),
        beat_title: context.beat_title.clone(),
        producer_id: context.producer_id,
        producer_slug: context.producer_slug.clone(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn context() -> LicenseCheckoutContext {
        LicenseCheckoutContext {
            license_id: 7,
            license_type: "premium".to_string(),
            price_minor_units: 20_000,
            currency: "ARS".to_string(),
            terms: None,
            sale_state: "available".to_string(),
            beat_id: 3,
            beat_slug: "trap-oscuro".to_string(),
            beat_title: "Trap Oscuro".to_string(),
            is_published: true,
            producer_id: 11,
            producer_name: "Ana Beats".to_string(),
            producer_slug: "ana-beats".to_string(),
            mp_connected: true,
            mp_access_token: Some("APP_USR-token".to_string()),
        }
    }

    #[test]
    fn missing_or_unpublished_license_is_not_found() {
        assert_matches!(
            authorize_sale(None, 7),
            Err(AppError::Core(CoreError::NotFound { id: 7, .. }))
        );

        let mut unpublished = context();
        unpublished.is_published = false;
        assert_matches!(
            authorize_sale(Some(unpublished), 7),
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[test]
    fn unlinked_producer_fails_the_precondition() {
        let mut disconnected = context();
        disconnected.mp_connected = false;
        disconnected.mp_access_token = None;
        assert_matches!(
            authorize_sale(Some(disconnected), 7),
            Err(AppError::Core(CoreError::Precondition(_)))
        );

        // Connected flag without a stored token is equally unusable.
        let mut tokenless = context();
        tokenless.mp_access_token = None;
        assert_matches!(
            authorize_sale(Some(tokenless), 7),
            Err(AppError::Core(CoreError::Precondition(_)))
        );
    }

    #[test]
    fn sold_exclusive_tier_conflicts() {
        let mut sold = context();
        sold.license_type = "exclusive".to_string();
        sold.sale_state = "sold".to_string();
        assert_matches!(
            authorize_sale(Some(sold), 7),
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[test]
    fn published_linked_license_is_authorized() {
        let (ctx, tier, token) =
            authorize_sale(Some(context()), 7).expect("preconditions should pass");
        assert_eq!(ctx.license_id, 7);
        assert_eq!(tier, LicenseType::Premium);
        assert_eq!(token, "APP_USR-token");
    }

    #[test]
    fn projection_keeps_checkout_fields() {
        let projected = license_context(&context(), LicenseType::Premium);
        assert_eq!(projected.license_id, 7);
        assert_eq!(projected.beat_slug, "trap-oscuro");
        assert_eq!(projected.producer_slug, "ana-beats");
        assert_eq!(projected.price_minor_units, 20_000);
    }

    #[test]
    fn checkout_request_accepts_camel_case() {
        let input: CheckoutRequest = serde_json::from_value(json!({
            "licenseId": 7,
            "buyerEmail": "ana@x.com",
            "buyerName": "Ana",
        }))
        .unwrap();
        assert_eq!(input.license_id, 7);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_buyer_name_fails_validation() {
        let input: CheckoutRequest = serde_json::from_value(json!({
            "licenseId": 7,
            "buyerEmail": "not-an-email",
            "buyerName": "",
        }))
        .unwrap();
        assert_matches!(input.validate(), Err(_));
    }
}
