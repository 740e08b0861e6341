//! Repository for the `beat_licenses` table.
//!
//! Besides plain reads this repo owns the sale-state transitions that make
//! an exclusive tier sellable at most once. Each transition is a single
//! conditional `UPDATE`; the row count tells the caller whether the
//! compare-and-swap won.

use alvuelo_core::types::DbId;
use sqlx::PgPool;

use crate::models::license::{BeatLicense, LicenseCheckoutContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, beat_id, license_type, delivery, price_minor_units, \
                       currency, terms, sale_state, reserved_until, \
                       created_at, updated_at";

/// How long an exclusive-tier reservation is held before it lapses.
const RESERVATION_MINUTES: i32 = 30;

/// Provides reads and sale-state transitions for license tiers.
pub struct LicenseRepo;

impl LicenseRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BeatLicense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beat_licenses WHERE id = $1");
        sqlx::query_as::<_, BeatLicense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All tiers for one beat, cheapest first.
    pub async fn list_for_beat(
        pool: &PgPool,
        beat_id: DbId,
    ) -> Result<Vec<BeatLicense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM beat_licenses
             WHERE beat_id = $1
             ORDER BY price_minor_units ASC"
        );
        sqlx::query_as::<_, BeatLicense>(&query)
            .bind(beat_id)
            .fetch_all(pool)
            .await
    }

    /// Load a license with the beat and producer context the checkout flow
    /// needs, in one round trip. Returns rows for unpublished beats too --
    /// the orchestrator decides how to answer those.
    pub async fn find_checkout_context(
        pool: &PgPool,
        license_id: DbId,
    ) -> Result<Option<LicenseCheckoutContext>, sqlx::Error> {
        let query = "SELECT l.id AS license_id,
                    l.license_type,
                    l.price_minor_units,
                    l.currency,
                    l.terms,
                    l.sale_state,
                    b.id AS beat_id,
                    b.slug AS beat_slug,
                    b.title AS beat_title,
                    b.is_published,
                    p.id AS producer_id,
                    p.name AS producer_name,
                    p.slug AS producer_slug,
                    p.mp_connected,
                    p.mp_access_token
             FROM beat_licenses l
             JOIN beats b ON b.id = l.beat_id
             JOIN users p ON p.id = b.producer_id
             WHERE l.id = $1";
        sqlx::query_as::<_, LicenseCheckoutContext>(query)
            .bind(license_id)
            .fetch_optional(pool)
            .await
    }

    /// Take the exclusive-tier reservation before creating a preference.
    ///
    /// Succeeds when the tier is `available`, or `reserved` with a lapsed
    /// window (an abandoned checkout). Returns `false` when another buyer
    /// holds a live reservation or the tier is already sold.
    pub async fn reserve_exclusive(pool: &PgPool, license_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE beat_licenses
             SET sale_state = 'reserved',
                 reserved_until = NOW() + make_interval(mins => $2),
                 updated_at = NOW()
             WHERE id = $1
               AND license_type = 'exclusive'
               AND (sale_state = 'available'
                    OR (sale_state = 'reserved' AND reserved_until < NOW()))",
        )
        .bind(license_id)
        .bind(RESERVATION_MINUTES)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Release a reservation after an upstream failure so the tier becomes
    /// sellable again immediately. Sold tiers are never released.
    pub async fn release_reservation(pool: &PgPool, license_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE beat_licenses
             SET sale_state = 'available',
                 reserved_until = NULL,
                 updated_at = NOW()
             WHERE id = $1 AND sale_state = 'reserved'",
        )
        .bind(license_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark an exclusive tier sold after a confirmed payment. Idempotent:
    /// re-running for an already-sold tier affects no rows.
    pub async fn mark_sold(pool: &PgPool, license_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE beat_licenses
             SET sale_state = 'sold',
                 reserved_until = NULL,
                 updated_at = NOW()
             WHERE id = $1 AND sale_state <> 'sold'",
        )
        .bind(license_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
