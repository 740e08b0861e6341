//! Payout banking details for commission settlement.

use alvuelo_core::error::CoreError;
use alvuelo_db::repositories::UserRepo;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Request body for `POST /payout-settings`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSettingsRequest {
    /// Optional transfer alias (e.g. a CBU/CVU alias).
    pub alias: Option<String>,
    #[validate(length(min = 1, message = "bankId is required"))]
    pub bank_id: String,
    #[validate(length(min = 1, message = "holder is required"))]
    pub holder: String,
}

/// POST /api/v1/payout-settings
///
/// Store where commission settlements should be transferred.
pub async fn update_payout_settings(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<PayoutSettingsRequest>,
) -> AppResult<Json<Value>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    UserRepo::set_payout_details(
        &state.pool,
        user.user_id,
        input.alias.as_deref().filter(|a| !a.trim().is_empty()),
        input.bank_id.trim(),
        input.holder.trim(),
    )
    .await?;

    tracing::info!(user_id = user.user_id, "Payout settings updated");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_id_and_holder_are_required() {
        let input: PayoutSettingsRequest = serde_json::from_value(json!({
            "bankId": "",
            "holder": "Ana García",
        }))
        .unwrap();
        assert!(input.validate().is_err());

        let input: PayoutSettingsRequest = serde_json::from_value(json!({
            "alias": "ana.beats.mp",
            "bankId": "007",
            "holder": "Ana García",
        }))
        .unwrap();
        assert!(input.validate().is_ok());
    }
}
