//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use alvuelo_core::error::CoreError;
use alvuelo_core::roles::ROLE_PRODUCER;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `producer` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn producer_only(RequireProducer(user): RequireProducer) -> AppResult<Json<()>> {
///     // user is guaranteed to be a producer here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireProducer(pub AuthUser);

impl FromRequestParts<AppState> for RequireProducer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_PRODUCER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Producer role required".into(),
            )));
        }
        Ok(RequireProducer(user))
    }
}

/// Requires any authenticated account (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
