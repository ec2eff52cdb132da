//! Response serialization middleware.
//!
//! [`serialize_response`] is an `axum::middleware::from_fn` function: it
//! runs the rest of the stack exactly once, then reshapes the response body
//! according to the registry entry resolved for the matched route. Attach it
//! with [`from_fn_with_state`](axum::middleware::from_fn_with_state) and a
//! [`SerializeState`].

use axum::body::{to_bytes, Body};
use axum::extract::{MatchedPath, Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use reshape_core::{serialize, SerializeOptions};

use crate::error::{AdapterError, AdapterResult};
use crate::state::SerializeState;

/// Reshape the response produced by the rest of the stack.
///
/// The response passes through untouched when any of these hold:
///
/// - the request did not match a route (no `MatchedPath` extension);
/// - no registry entry resolves for the method and route template;
/// - the status is not 2xx, or the content type is not JSON;
/// - the body is empty.
///
/// Otherwise the body is buffered (bounded by
/// `SerializerConfig::max_body_bytes`), parsed, run through
/// [`serialize`], and re-emitted with a corrected `content-length`.
/// Failures surface as [`AdapterError`]; nothing is retried.
pub async fn serialize_response(
    State(state): State<SerializeState>,
    req: Request,
    next: Next,
) -> AdapterResult<Response> {
    let method = req.method().clone();
    let matched = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());

    let response = next.run(req).await;

    let Some(path) = matched else {
        return Ok(response);
    };
    let Some(rule) = state.registry.resolve(&method, &path) else {
        return Ok(response);
    };
    if !response.status().is_success() || !is_json(&response) {
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let bytes = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(AdapterError::BodyRead)?;
    if bytes.is_empty() {
        return Ok(Response::from_parts(parts, Body::from(bytes)));
    }

    let payload: Value = serde_json::from_slice(&bytes)?;

    let default_options = SerializeOptions::default();
    let options = rule.options.unwrap_or(&default_options);
    let reshaped = serialize(
        state.transformer.as_ref(),
        payload,
        options,
        rule.shape,
        &state.config.data_field,
    )?;

    tracing::debug!(
        %method,
        path,
        shape = rule.shape.map(|shape| shape.name()).unwrap_or("-"),
        "Serialized response payload"
    );

    let body = serde_json::to_vec(&reshaped)?;
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    Ok(Response::from_parts(parts, Body::from(body)))
}

/// Whether the response declares a JSON content type.
fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.trim_start().starts_with("application/json"))
}
