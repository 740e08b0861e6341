//! Repository for the `users` table.

use alvuelo_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, MpLinkage, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, name, email, password_hash, role, country, bio, \
                       mp_connected, mp_access_token, mp_account_id, mp_email, \
                       payout_alias, payout_bank_id, payout_holder, \
                       created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (slug, name, email, password_hash, role, country, bio)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.country)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the producer whose linked Mercado Pago account matches.
    /// Webhook reconciliation uses this to pick the token for payment
    /// lookups.
    pub async fn find_by_mp_account_id(
        pool: &PgPool,
        account_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE mp_account_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a slug is already taken (used for unique-slug generation).
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM users WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Store a producer's Mercado Pago linkage and mark the account
    /// connected. Last write wins; a producer has at most one linkage.
    pub async fn set_mp_linkage(
        pool: &PgPool,
        user_id: DbId,
        linkage: &MpLinkage,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET mp_connected = TRUE,
                 mp_access_token = $2,
                 mp_account_id = $3,
                 mp_email = $4,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(&linkage.access_token)
        .bind(&linkage.account_id)
        .bind(&linkage.email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear all four linkage fields. Idempotent.
    pub async fn clear_mp_linkage(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET mp_connected = FALSE,
                 mp_access_token = NULL,
                 mp_account_id = NULL,
                 mp_email = NULL,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update payout banking details.
    pub async fn set_payout_details(
        pool: &PgPool,
        user_id: DbId,
        alias: Option<&str>,
        bank_id: &str,
        holder: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET payout_alias = $2,
                 payout_bank_id = $3,
                 payout_holder = $4,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(alias)
        .bind(bank_id)
        .bind(holder)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
