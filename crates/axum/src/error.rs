use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use reshape_core::TransformError;

/// Middleware-level error type.
///
/// Wraps [`TransformError`] for conversion failures and adds the two
/// HTTP-specific failure modes (unreadable body, non-JSON body). Implements
/// [`IntoResponse`] to produce consistent JSON error responses; details are
/// logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A typed/plain conversion failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The response body was not valid JSON (or could not be re-encoded).
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The response body could not be buffered.
    #[error("failed to buffer response body: {0}")]
    BodyRead(#[source] axum::Error),
}

/// Convenience type alias for middleware return values.
pub type AdapterResult<T> = Result<T, AdapterError>;

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AdapterError::Transform(err) => {
                tracing::error!(shape = err.shape(), error = %err, "Response serialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERIALIZATION_ERROR",
                    "Response serialization failed".to_string(),
                )
            }
            AdapterError::InvalidBody(err) => {
                tracing::error!(error = %err, "Response body is not valid JSON");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_RESPONSE_BODY",
                    "Response serialization failed".to_string(),
                )
            }
            AdapterError::BodyRead(err) => {
                tracing::error!(error = %err, "Failed to buffer response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
