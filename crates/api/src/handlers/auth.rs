//! Handlers for the `/auth` resource (register, login, refresh, logout).

use alvuelo_core::error::CoreError;
use alvuelo_core::roles::{is_valid_role, ROLE_BUYER};
use alvuelo_core::slug::{slugify, with_suffix};
use alvuelo_core::types::DbId;
use alvuelo_db::models::user::CreateUser;
use alvuelo_db::repositories::{SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    /// `producer` or `buyer`; defaults to `buyer`.
    pub role: Option<String>,
    pub country: Option<String>,
    #[validate(length(max = 280, message = "bio must be at most 280 characters"))]
    pub bio: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`] and register responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub slug: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with a unique slug derived from the display name.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role.unwrap_or_else(|| ROLE_BUYER.to_string());
    if !is_valid_role(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "This email is already registered".into(),
        )));
    }

    let slug = unique_user_slug(&state, &input.name).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            slug,
            name: input.name,
            email: input.email,
            password_hash,
            role,
            country: input.country,
            bio: input.bio,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, slug = %user.slug, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
                slug: user.slug,
                role: user.role,
            },
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Find the account and issue fresh tokens.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated account. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a slug from the display name, appending `-N` until it is free.
async fn unique_user_slug(state: &AppState, name: &str) -> AppResult<String> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must contain at least one letter or digit".into(),
        )));
    }

    if !UserRepo::slug_exists(&state.pool, &base).await? {
        return Ok(base);
    }
    let mut counter = 1;
    loop {
        let attempt = with_suffix(&base, counter);
        if !UserRepo::slug_exists(&state.pool, &attempt).await? {
            return Ok(attempt);
        }
        counter += 1;
    }
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &alvuelo_db::models::user::User,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = alvuelo_db::models::session::CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            slug: user.slug.clone(),
            role: user.role.clone(),
        },
    })
}
