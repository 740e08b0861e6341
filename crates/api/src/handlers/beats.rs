//! Handlers for the `/beats` resource (public catalog + producer publishing).

use alvuelo_core::error::CoreError;
use alvuelo_core::licensing::LicenseType;
use alvuelo_core::slug::{slugify, with_suffix};
use alvuelo_db::models::beat::{Beat, BeatFilter, CreateBeat};
use alvuelo_db::models::license::{BeatLicense, CreateLicense};
use alvuelo_db::models::user::ProducerSummary;
use alvuelo_db::repositories::{BeatRepo, LicenseRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireProducer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /beats`.
#[derive(Debug, Deserialize)]
pub struct BeatListParams {
    pub genre: Option<String>,
    pub search: Option<String>,
    /// Filter by producer slug.
    pub producer: Option<String>,
}

/// Request body for `POST /beats`.
///
/// Tier prices are in minor currency units; a tier with price 0 is simply
/// not created. At least one tier must be priced.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBeatRequest {
    #[validate(length(min = 2, message = "title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    pub genre: Option<String>,
    pub tags: Option<String>,
    #[validate(range(min = 60, max = 200, message = "bpm must be between 60 and 200"))]
    pub bpm: i32,
    #[validate(url(message = "preview_url must be a valid URL"))]
    pub preview_url: String,
    pub cover_url: Option<String>,
    pub stems_url: Option<String>,
    #[validate(range(min = 0))]
    pub price_basic: i64,
    #[validate(range(min = 0))]
    pub price_premium: i64,
    #[validate(range(min = 0))]
    pub price_exclusive: i64,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: String,
}

/// A beat with its license tiers and producer summary.
#[derive(Debug, Serialize)]
pub struct BeatWithLicenses {
    #[serde(flatten)]
    pub beat: Beat,
    pub licenses: Vec<BeatLicense>,
    pub producer: ProducerSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/beats
///
/// List published beats, newest first, with optional genre/search/producer
/// filters.
pub async fn list_beats(
    State(state): State<AppState>,
    Query(params): Query<BeatListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = BeatFilter {
        genre: params.genre.filter(|g| !g.is_empty()),
        search: params.search.filter(|s| !s.is_empty()),
        producer_slug: params.producer.filter(|p| !p.is_empty()),
    };

    let beats = BeatRepo::list_published(&state.pool, &filter).await?;

    let mut items = Vec::with_capacity(beats.len());
    for beat in beats {
        items.push(with_context(&state, beat).await?);
    }

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/beats/{slug}
///
/// One published beat with its license tiers.
pub async fn get_beat(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let beat = BeatRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Beat not found: {slug}")))?;

    let item = with_context(&state, beat).await?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/beats
///
/// Publish a beat with up to three priced license tiers (producer only).
pub async fn create_beat(
    RequireProducer(producer): RequireProducer,
    State(state): State<AppState>,
    Json(input): Json<CreateBeatRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let licenses = license_tiers(&input);
    if licenses.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one license tier must be priced".into(),
        )));
    }

    let slug = unique_beat_slug(&state, &input.title).await?;

    let (beat, created_licenses) = BeatRepo::create_with_licenses(
        &state.pool,
        &CreateBeat {
            slug,
            title: input.title,
            description: input.description,
            genre: input.genre,
            mood_tags: input.tags,
            bpm: input.bpm,
            preview_url: input.preview_url,
            cover_url: input.cover_url.filter(|u| !u.is_empty()),
            stems_url: input.stems_url.filter(|u| !u.is_empty()),
            producer_id: producer.user_id,
        },
        &licenses,
    )
    .await?;

    tracing::info!(
        beat_id = beat.id,
        slug = %beat.slug,
        producer_id = producer.user_id,
        tiers = created_licenses.len(),
        "Beat published",
    );

    let producer_row = UserRepo::find_by_id(&state.pool, producer.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id: producer.user_id,
        }))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BeatWithLicenses {
                beat,
                licenses: created_licenses,
                producer: ProducerSummary {
                    name: producer_row.name,
                    slug: producer_row.slug,
                },
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the tier list from the request's per-tier prices. Zero-priced
/// tiers are skipped; the delivery bundle follows the tier type.
fn license_tiers(input: &CreateBeatRequest) -> Vec<CreateLicense> {
    let priced = [
        (LicenseType::Basic, input.price_basic),
        (LicenseType::Premium, input.price_premium),
        (LicenseType::Exclusive, input.price_exclusive),
    ];

    priced
        .into_iter()
        .filter(|(_, price)| *price > 0)
        .map(|(tier, price)| CreateLicense {
            license_type: tier.as_str().to_string(),
            delivery: tier.delivery().as_str().to_string(),
            price_minor_units: price,
            currency: input.currency.to_ascii_uppercase(),
            terms: None,
        })
        .collect()
}

/// Load the tiers and producer summary for one beat.
async fn with_context(state: &AppState, beat: Beat) -> AppResult<BeatWithLicenses> {
    let licenses = LicenseRepo::list_for_beat(&state.pool, beat.id).await?;
    let producer_row = UserRepo::find_by_id(&state.pool, beat.producer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id: beat.producer_id,
        }))?;

    Ok(BeatWithLicenses {
        beat,
        licenses,
        producer: ProducerSummary {
            name: producer_row.name,
            slug: producer_row.slug,
        },
    })
}

/// Generate a slug from the title, appending `-N` until it is free.
async fn unique_beat_slug(state: &AppState, title: &str) -> AppResult<String> {
    let base = slugify(title);
    if base.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must contain at least one letter or digit".into(),
        )));
    }

    if !BeatRepo::slug_exists(&state.pool, &base).await? {
        return Ok(base);
    }
    let mut counter = 1;
    loop {
        let attempt = with_suffix(&base, counter);
        if !BeatRepo::slug_exists(&state.pool, &attempt).await? {
            return Ok(attempt);
        }
        counter += 1;
    }
}
