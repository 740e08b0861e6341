//! Repository for the `beats` table.

use alvuelo_core::types::DbId;
use sqlx::PgPool;

use crate::models::beat::{Beat, BeatFilter, CreateBeat};
use crate::models::license::{BeatLicense, CreateLicense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, title, description, genre, mood_tags, bpm, \
                       preview_url, cover_url, stems_url, is_published, producer_id, \
                       created_at, updated_at";

const LICENSE_COLUMNS: &str = "id, beat_id, license_type, delivery, price_minor_units, \
                               currency, terms, sale_state, reserved_until, \
                               created_at, updated_at";

/// Maximum number of beats returned by the public listing.
const LISTING_LIMIT: i64 = 24;

/// Provides CRUD operations for beats and their license tiers.
pub struct BeatRepo;

impl BeatRepo {
    /// Insert a beat and its license tiers in one transaction.
    ///
    /// Tiers are created exactly once, at beat creation time; there is no
    /// later tier edit in this service.
    pub async fn create_with_licenses(
        pool: &PgPool,
        beat: &CreateBeat,
        licenses: &[CreateLicense],
    ) -> Result<(Beat, Vec<BeatLicense>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let beat_query = format!(
            "INSERT INTO beats (slug, title, description, genre, mood_tags, bpm,
                                preview_url, cover_url, stems_url, producer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let created: Beat = sqlx::query_as::<_, Beat>(&beat_query)
            .bind(&beat.slug)
            .bind(&beat.title)
            .bind(&beat.description)
            .bind(&beat.genre)
            .bind(&beat.mood_tags)
            .bind(beat.bpm)
            .bind(&beat.preview_url)
            .bind(&beat.cover_url)
            .bind(&beat.stems_url)
            .bind(beat.producer_id)
            .fetch_one(&mut *tx)
            .await?;

        let license_query = format!(
            "INSERT INTO beat_licenses (beat_id, license_type, delivery, price_minor_units,
                                        currency, terms)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LICENSE_COLUMNS}"
        );
        let mut created_licenses = Vec::with_capacity(licenses.len());
        for license in licenses {
            let row: BeatLicense = sqlx::query_as::<_, BeatLicense>(&license_query)
                .bind(created.id)
                .bind(&license.license_type)
                .bind(&license.delivery)
                .bind(license.price_minor_units)
                .bind(&license.currency)
                .bind(&license.terms)
                .fetch_one(&mut *tx)
                .await?;
            created_licenses.push(row);
        }

        tx.commit().await?;
        Ok((created, created_licenses))
    }

    /// List published beats, newest first, optionally filtered by genre,
    /// free-text search (title/description), or producer slug.
    pub async fn list_published(
        pool: &PgPool,
        filter: &BeatFilter,
    ) -> Result<Vec<Beat>, sqlx::Error> {
        let query = "SELECT b.id, b.slug, b.title, b.description, b.genre, b.mood_tags, b.bpm,
                    b.preview_url, b.cover_url, b.stems_url, b.is_published, b.producer_id,
                    b.created_at, b.updated_at
             FROM beats b
             JOIN users p ON p.id = b.producer_id
             WHERE b.is_published = TRUE
               AND ($1::TEXT IS NULL OR b.genre = $1)
               AND ($2::TEXT IS NULL OR b.title ILIKE '%' || $2 || '%'
                                     OR b.description ILIKE '%' || $2 || '%')
               AND ($3::TEXT IS NULL OR p.slug = $3)
             ORDER BY b.created_at DESC
             LIMIT $4";
        sqlx::query_as::<_, Beat>(query)
            .bind(&filter.genre)
            .bind(&filter.search)
            .bind(&filter.producer_slug)
            .bind(LISTING_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Find a published beat by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Beat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beats WHERE slug = $1 AND is_published = TRUE");
        sqlx::query_as::<_, Beat>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether a slug is already taken (used for unique-slug generation).
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM beats WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}
