//! Shared response envelope types for API handlers.
//!
//! Resource CRUD responses use a `{ "data": ... }` envelope. The checkout,
//! webhook, and account-linking endpoints return their documented wire
//! bodies directly and do not use this type.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
