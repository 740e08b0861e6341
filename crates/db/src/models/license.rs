//! License tier model and DTOs.

use alvuelo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `beat_licenses` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BeatLicense {
    pub id: DbId,
    pub beat_id: DbId,
    pub license_type: String,
    pub delivery: String,
    pub price_minor_units: i64,
    pub currency: String,
    pub terms: Option<String>,
    pub sale_state: String,
    pub reserved_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a license tier alongside its beat.
pub struct CreateLicense {
    pub license_type: String,
    pub delivery: String,
    pub price_minor_units: i64,
    pub currency: String,
    pub terms: Option<String>,
}

/// A license joined with the beat and producer context the checkout flow
/// needs: publication state, display strings, and the producer's processor
/// linkage. Loaded in one query.
#[derive(Debug, Clone, FromRow)]
pub struct LicenseCheckoutContext {
    pub license_id: DbId,
    pub license_type: String,
    pub price_minor_units: i64,
    pub currency: String,
    pub terms: Option<String>,
    pub sale_state: String,
    pub beat_id: DbId,
    pub beat_slug: String,
    pub beat_title: String,
    pub is_published: bool,
    pub producer_id: DbId,
    pub producer_name: String,
    pub producer_slug: String,
    pub mp_connected: bool,
    pub mp_access_token: Option<String>,
}
