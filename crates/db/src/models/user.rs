//! Account model and DTOs (producers and buyers share one table).

use alvuelo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub mp_connected: bool,
    pub mp_access_token: Option<String>,
    pub mp_account_id: Option<String>,
    pub mp_email: Option<String>,
    pub payout_alias: Option<String>,
    pub payout_bank_id: Option<String>,
    pub payout_holder: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new account.
pub struct CreateUser {
    pub slug: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub country: Option<String>,
    pub bio: Option<String>,
}

/// Mercado Pago linkage fields written by the OAuth callback.
pub struct MpLinkage {
    pub access_token: String,
    pub account_id: String,
    pub email: Option<String>,
}

/// Public producer summary embedded in beat listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProducerSummary {
    pub name: String,
    pub slug: String,
}
