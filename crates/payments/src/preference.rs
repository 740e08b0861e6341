//! Pure construction of Mercado Pago checkout preferences.
//!
//! [`build_preference`] turns a license (with its beat and producer
//! context), the buyer's contact info, and the deployment's public base URL
//! into the request body for `POST /checkout/preferences`. No I/O happens
//! here; the orchestrator submits the result with the producer's token.

use alvuelo_core::licensing::LicenseType;
use alvuelo_core::money::{marketplace_fee, to_major_units};
use alvuelo_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Statement descriptor shown on the buyer's card statement.
const STATEMENT_DESCRIPTOR: &str = "BEATS AL VUELO";

/// Redirect suffix for approved payments.
const SUCCESS_PATH: &str = "/checkout/success";
/// Redirect suffix for pending payments.
const PENDING_PATH: &str = "/checkout/pending";
/// Redirect suffix for failed payments.
const FAILURE_PATH: &str = "/checkout/error";
/// Webhook suffix for asynchronous notifications.
const WEBHOOK_PATH: &str = "/api/payments/webhook";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything the builder needs to know about what is being sold.
///
/// Mirrors the checkout-context join the persistence layer produces; kept
/// as its own type so this crate stays free of database concerns.
#[derive(Debug, Clone)]
pub struct LicenseContext {
    pub license_id: DbId,
    pub license_type: LicenseType,
    pub price_minor_units: i64,
    pub currency: String,
    pub terms: Option<String>,
    pub beat_id: DbId,
    pub beat_slug: String,
    pub beat_title: String,
    pub producer_id: DbId,
    pub producer_slug: String,
}

/// Buyer-supplied contact info for one checkout attempt. Never persisted.
#[derive(Debug, Clone)]
pub struct Buyer {
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /checkout/preferences`.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub payer: PreferencePayer,
    pub metadata: PreferenceMetadata,
    pub back_urls: BackUrls,
    pub auto_return: String,
    pub notification_url: String,
    pub statement_descriptor: String,
}

/// A single line item; this flow always sends exactly one.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferencePayer {
    pub name: String,
    pub email: String,
}

/// Marketplace metadata carried on the preference for reconciliation.
///
/// Field names stay camelCase on the wire; downstream settlement reads
/// them back from payment lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceMetadata {
    pub license_id: String,
    pub beat_id: String,
    pub beat_slug: String,
    pub producer_slug: String,
    pub producer_id: String,
    pub license_type: String,
    /// The 10% platform commission in minor units, stringified. Annotation
    /// only: this flow never moves the fee itself.
    pub marketplace_fee: String,
}

/// Redirect targets for the three checkout outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub pending: String,
    pub failure: String,
}

/// Response from `POST /checkout/preferences`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    pub id: String,
    pub init_point: Option<String>,
    pub sandbox_init_point: Option<String>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the preference-creation request for one checkout attempt.
///
/// `base_url` must be an absolute URL without a trailing slash concern --
/// path suffixes are joined defensively either way. `webhook_override`
/// replaces the derived notification URL when set.
pub fn build_preference(
    license: &LicenseContext,
    buyer: &Buyer,
    base_url: &str,
    webhook_override: Option<&str>,
) -> PreferenceRequest {
    let fee = marketplace_fee(license.price_minor_units);

    let description = license
        .terms
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| license.license_type.default_description());

    let notification_url = match webhook_override {
        Some(url) => url.to_string(),
        None => join_url(base_url, WEBHOOK_PATH),
    };

    PreferenceRequest {
        items: vec![PreferenceItem {
            id: license.license_id.to_string(),
            title: format!(
                "{} · {}",
                license.beat_title,
                license.license_type.display_name()
            ),
            description,
            quantity: 1,
            unit_price: to_major_units(license.price_minor_units, &license.currency),
            currency_id: license.currency.clone(),
        }],
        payer: PreferencePayer {
            name: buyer.name.clone(),
            email: buyer.email.clone(),
        },
        metadata: PreferenceMetadata {
            license_id: license.license_id.to_string(),
            beat_id: license.beat_id.to_string(),
            beat_slug: license.beat_slug.clone(),
            producer_slug: license.producer_slug.clone(),
            producer_id: license.producer_id.to_string(),
            license_type: license.license_type.as_str().to_string(),
            marketplace_fee: fee.to_string(),
        },
        back_urls: BackUrls {
            success: join_url(base_url, SUCCESS_PATH),
            pending: join_url(base_url, PENDING_PATH),
            failure: join_url(base_url, FAILURE_PATH),
        },
        auto_return: "approved".to_string(),
        notification_url,
        statement_descriptor: STATEMENT_DESCRIPTOR.to_string(),
    }
}

/// Join a path suffix onto a base URL without doubling slashes.
fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium_license() -> LicenseContext {
        LicenseContext {
            license_id: 7,
            license_type: LicenseType::Premium,
            price_minor_units: 20_000,
            currency: "ARS".to_string(),
            terms: None,
            beat_id: 3,
            beat_slug: "trap-oscuro".to_string(),
            beat_title: "Trap Oscuro".to_string(),
            producer_id: 11,
            producer_slug: "ana-beats".to_string(),
        }
    }

    fn buyer() -> Buyer {
        Buyer {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
        }
    }

    #[test]
    fn end_to_end_premium_ars_preference() {
        let request = build_preference(&premium_license(), &buyer(), "https://alvuelo.app", None);

        assert_eq!(request.items.len(), 1);
        let item = &request.items[0];
        assert_eq!(item.id, "7");
        assert_eq!(item.title, "Trap Oscuro · Premium");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, 200.0);
        assert_eq!(item.currency_id, "ARS");

        assert_eq!(request.metadata.license_type, "premium");
        assert_eq!(request.metadata.marketplace_fee, "2000");
        assert_eq!(request.metadata.license_id, "7");
        assert_eq!(request.metadata.producer_slug, "ana-beats");

        assert_eq!(request.payer.name, "Ana");
        assert_eq!(request.payer.email, "ana@x.com");
        assert_eq!(request.auto_return, "approved");
        assert_eq!(request.statement_descriptor, "BEATS AL VUELO");
    }

    #[test]
    fn unit_price_converts_minor_units() {
        let mut license = premium_license();
        license.price_minor_units = 35_000;
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(request.items[0].unit_price, 350.0);
    }

    #[test]
    fn zero_decimal_currency_is_not_divided() {
        let mut license = premium_license();
        license.currency = "CLP".to_string();
        license.price_minor_units = 35_000;
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(request.items[0].unit_price, 35_000.0);
    }

    #[test]
    fn fee_rounds_to_nearest_integer() {
        let mut license = premium_license();
        license.price_minor_units = 12_345;
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(request.metadata.marketplace_fee, "1235");

        license.price_minor_units = 150_000;
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(request.metadata.marketplace_fee, "15000");
    }

    #[test]
    fn urls_join_against_the_base() {
        let request = build_preference(&premium_license(), &buyer(), "https://alvuelo.app/", None);

        assert_eq!(request.back_urls.success, "https://alvuelo.app/checkout/success");
        assert_eq!(request.back_urls.pending, "https://alvuelo.app/checkout/pending");
        assert_eq!(request.back_urls.failure, "https://alvuelo.app/checkout/error");
        assert_eq!(
            request.notification_url,
            "https://alvuelo.app/api/payments/webhook"
        );
    }

    #[test]
    fn webhook_override_wins() {
        let request = build_preference(
            &premium_license(),
            &buyer(),
            "https://alvuelo.app",
            Some("https://hooks.example.com/mp"),
        );
        assert_eq!(request.notification_url, "https://hooks.example.com/mp");
    }

    #[test]
    fn custom_terms_become_the_description() {
        let mut license = premium_license();
        license.terms = Some("Up to 100k streams, credit required".to_string());
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(
            request.items[0].description,
            "Up to 100k streams, credit required"
        );
    }

    #[test]
    fn blank_terms_fall_back_to_generated_description() {
        let mut license = premium_license();
        license.terms = Some("   ".to_string());
        let request = build_preference(&license, &buyer(), "https://alvuelo.app", None);
        assert_eq!(
            request.items[0].description,
            "Premium license for musical use"
        );
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let request = build_preference(&premium_license(), &buyer(), "https://alvuelo.app", None);
        let json = serde_json::to_value(&request.metadata).unwrap();
        assert_eq!(json["licenseId"], "7");
        assert_eq!(json["beatSlug"], "trap-oscuro");
        assert_eq!(json["marketplaceFee"], "2000");
    }
}
