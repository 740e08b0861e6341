//! Beat (catalog item) model and DTOs.

use alvuelo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `beats` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Beat {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub mood_tags: Option<String>,
    pub bpm: i32,
    pub preview_url: String,
    pub cover_url: Option<String>,
    pub stems_url: Option<String>,
    pub is_published: bool,
    pub producer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a beat. Media references are immutable once set except
/// by re-upload, which is outside this service.
pub struct CreateBeat {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub mood_tags: Option<String>,
    pub bpm: i32,
    pub preview_url: String,
    pub cover_url: Option<String>,
    pub stems_url: Option<String>,
    pub producer_id: DbId,
}

/// Optional filters for the public beat listing.
#[derive(Debug, Default)]
pub struct BeatFilter {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub producer_slug: Option<String>,
}
