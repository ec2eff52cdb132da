//! Shared response envelope types for API handlers.
//!
//! Responses that wrap their payload use a `{ "data": ... }` envelope; the
//! middleware reshapes only the field named by `SerializerConfig::data_field`
//! and leaves sibling fields untouched. Use [`DataResponse`] instead of
//! ad-hoc `serde_json::json!({ "data": ... })` to get compile-time type
//! safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: user }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
