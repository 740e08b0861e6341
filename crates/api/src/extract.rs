//! Request-body extraction that speaks the crate's error taxonomy.
//!
//! Axum's stock `Json` answers malformed bodies with its own plain-text
//! 422. Handlers take this wrapper instead so syntactically invalid JSON
//! and wrong field types produce the same 400 `VALIDATION_ERROR` JSON body
//! as every other validation failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use alvuelo_core::error::CoreError;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`]; rejections become [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}
