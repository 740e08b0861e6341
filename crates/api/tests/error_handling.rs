//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use alvuelo_api::error::AppError;
use alvuelo_core::error::CoreError;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "License",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "License with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("bpm must be between 60 and 200".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "bpm must be between 60 and 200");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Precondition maps to 400 with PRECONDITION_FAILED code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn precondition_error_returns_400() {
    let err = AppError::Core(CoreError::Precondition(
        "This producer has not connected Mercado Pago yet".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PRECONDITION_FAILED");
    assert_eq!(
        json["error"],
        "This producer has not connected Mercado Pago yet"
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::Conflict maps to 409 with CONFLICT code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict(
        "This exclusive license is reserved or already sold".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(
        json["error"],
        "This exclusive license is reserved or already sold"
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized / Forbidden map to 401 / 403
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid webhook signature".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("Producer role required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Producer role required");
}

// ---------------------------------------------------------------------------
// Test: AppError::NotFound / BadRequest carry their message through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slug_not_found_error_returns_404() {
    let err = AppError::NotFound("Beat not found: trap-oscuro".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Beat not found: trap-oscuro");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: AppError::Configuration maps to 500 with CONFIGURATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configuration_error_returns_500() {
    let err = AppError::Configuration("Public base URL is not configured".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
    assert_eq!(json["error"], "Public base URL is not configured");
}

// ---------------------------------------------------------------------------
// Test: AppError::Upstream maps to 500 and hides the upstream body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_returns_500_and_hides_details() {
    let err = AppError::Upstream(alvuelo_payments::PaymentError::Api {
        status: 401,
        body: "{\"message\":\"invalid access token\"}".to_string(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Could not reach the payment provider");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(
        !json["error"].as_str().unwrap().contains("credentials"),
        "internal details must not leak to the client"
    );
}

// ---------------------------------------------------------------------------
// Test: sqlx::Error::RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Resource not found");
}
