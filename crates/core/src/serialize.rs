//! The serialization adapter itself.
//!
//! [`serialize`] is a pure function composition over the [`Transformer`]
//! seam: a handful of branches selecting which conversion to apply to a
//! response payload. It holds no state across invocations.

use serde_json::Value;

use crate::error::TransformError;
use crate::options::SerializeOptions;
use crate::shape::TypeShape;
use crate::transform::Transformer;

/// Conventional name of the nested-payload field on enveloped responses.
///
/// Configurable at the integration layer; see `reshape-axum`'s
/// `SerializerConfig`.
pub const DEFAULT_DATA_FIELD: &str = "data";

/// Convert a response payload into its plain, emit-ready form.
///
/// With a target `shape`:
///
/// - If the response is an object containing `data_field`, only that field
///   is converted (materialized into the shape, then flattened back);
///   sibling fields are returned untouched.
/// - Otherwise the whole response is materialized and flattened.
///
/// Without a shape, primitives pass through unchanged, arrays are mapped
/// element-wise through [`Transformer::reshape_plain`] (order preserved),
/// and objects pass through `reshape_plain` once.
///
/// Failures from the transformer propagate unchanged; there is no fallback
/// beyond the documented pass-through branches.
pub fn serialize(
    transformer: &dyn Transformer,
    response: Value,
    options: &SerializeOptions,
    shape: Option<&TypeShape>,
    data_field: &str,
) -> Result<Value, TransformError> {
    let Some(shape) = shape else {
        return Ok(serialize_plain(transformer, response, options));
    };

    if let Value::Object(mut map) = response {
        if let Some(data) = map.remove(data_field) {
            tracing::debug!(shape = shape.name(), field = data_field, "reshaping nested payload");
            let instance = transformer.to_instance(shape, data, options)?;
            map.insert(data_field.to_owned(), transformer.to_plain(instance, options)?);
            return Ok(Value::Object(map));
        }
        let instance = transformer.to_instance(shape, Value::Object(map), options)?;
        return transformer.to_plain(instance, options);
    }

    let instance = transformer.to_instance(shape, response, options)?;
    transformer.to_plain(instance, options)
}

/// The no-shape branch: plain conversion only.
fn serialize_plain(
    transformer: &dyn Transformer,
    response: Value,
    options: &SerializeOptions,
) -> Value {
    match response {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transformer.reshape_plain(item, options))
                .collect(),
        ),
        value @ Value::Object(_) => transformer.reshape_plain(value, options),
        primitive => primitive,
    }
}
