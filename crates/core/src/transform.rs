//! The transformer seam between the adapter and the serialization backend.
//!
//! [`Transformer`] is the narrow interface the adapter needs: materialize a
//! typed instance from untyped data, flatten an instance back to plain
//! data, and pass already-plain values through. [`SerdeTransformer`] is the
//! default serde_json-backed implementation; swapping in another backend is
//! a matter of implementing the trait and injecting it into the middleware
//! state.

use serde_json::Value;

use crate::error::TransformError;
use crate::options::SerializeOptions;
use crate::shape::{Instance, TypeShape};

/// Converts payloads between typed and plain representations.
///
/// Implementations must be stateless from the adapter's point of view:
/// concurrent calls on the same transformer must not interact.
pub trait Transformer: Send + Sync {
    /// Materialize a typed instance from untyped data, honoring options.
    fn to_instance(
        &self,
        shape: &TypeShape,
        value: Value,
        options: &SerializeOptions,
    ) -> Result<Instance, TransformError>;

    /// Flatten a typed instance into plain data, honoring options.
    fn to_plain(
        &self,
        instance: Instance,
        options: &SerializeOptions,
    ) -> Result<Value, TransformError>;

    /// Pass an already-plain value through.
    ///
    /// Plain data needs no conversion, so the default implementation returns
    /// the value unchanged regardless of options; filters only take effect
    /// when a typed instance is flattened via [`Transformer::to_plain`].
    fn reshape_plain(&self, value: Value, _options: &SerializeOptions) -> Value {
        value
    }
}

/// Default [`Transformer`] backed by serde_json.
///
/// Materialization is `serde_json::from_value::<T>` (via the shape's erased
/// closure) and flattening is `serde_json::to_value`, with the option
/// filters applied as pure value rewrites on either side.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeTransformer;

impl SerdeTransformer {
    pub fn new() -> Self {
        SerdeTransformer
    }
}

impl Transformer for SerdeTransformer {
    fn to_instance(
        &self,
        shape: &TypeShape,
        value: Value,
        options: &SerializeOptions,
    ) -> Result<Instance, TransformError> {
        // Strip excluded keys first so extraneous internal fields cannot
        // fail materialization into a strict shape.
        let value = strip_excluded(value, options);
        shape.materialize(value)
    }

    fn to_plain(
        &self,
        instance: Instance,
        options: &SerializeOptions,
    ) -> Result<Value, TransformError> {
        let value = instance.to_value()?;
        Ok(apply_flatten_filters(value, options))
    }
}

/// Remove keys excluded by prefix, recursively.
fn strip_excluded(value: Value, options: &SerializeOptions) -> Value {
    if options.exclude_prefixes.is_empty() {
        return value;
    }
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !options.excludes(key))
                .map(|(key, inner)| (key, strip_excluded(inner, options)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| strip_excluded(item, options))
                .collect(),
        ),
        other => other,
    }
}

/// Apply the flatten-side filters (prefix stripping plus null dropping),
/// recursively.
fn apply_flatten_filters(value: Value, options: &SerializeOptions) -> Value {
    if options.exclude_prefixes.is_empty() && !options.drop_nulls {
        return value;
    }
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, inner)| {
                    !options.excludes(key) && !(options.drop_nulls && inner.is_null())
                })
                .map(|(key, inner)| (key, apply_flatten_filters(inner, options)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| apply_flatten_filters(item, options))
                .collect(),
        ),
        other => other,
    }
}
