//! Target shape descriptors and the typed instances they produce.
//!
//! A [`TypeShape`] is the registration-time stand-in for "which type should
//! this response be validated against". It erases the concrete type behind
//! a materialize closure so the registry and middleware never need a type
//! parameter.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransformError;

type Materialize = dyn Fn(Value) -> Result<Instance, TransformError> + Send + Sync;

/// Type-erased descriptor of a target shape.
///
/// Built once at route-registration time; cloning is cheap (the materialize
/// closure is behind an [`Arc`]).
#[derive(Clone)]
pub struct TypeShape {
    name: &'static str,
    materialize: Arc<Materialize>,
}

impl TypeShape {
    /// Describe the shape of `T`.
    ///
    /// Materialization deserializes the payload into `T`, so `T`'s serde
    /// attributes (`deny_unknown_fields`, defaults, renames) define what
    /// "fits the shape" means. Flattening re-serializes the instance, so
    /// `skip_serializing` attributes define what the plain form exposes.
    ///
    /// The whole payload is materialized as one value, so routes returning
    /// a list use a collection shape (e.g. `TypeShape::of::<Vec<User>>()`)
    /// rather than the element type.
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        let name = std::any::type_name::<T>();
        TypeShape {
            name,
            materialize: Arc::new(move |value| {
                let typed: T = serde_json::from_value(value)
                    .map_err(|source| TransformError::Materialize { shape: name, source })?;
                Ok(Instance::new(name, typed))
            }),
        }
    }

    /// Fully-qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Materialize a typed instance from untyped data.
    pub fn materialize(&self, value: Value) -> Result<Instance, TransformError> {
        (*self.materialize)(value)
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeShape").field("name", &self.name).finish()
    }
}

/// A typed value materialized from plain data.
///
/// Exists only between [`Transformer::to_instance`] and
/// [`Transformer::to_plain`]; the payload handed downstream is always plain.
///
/// [`Transformer::to_instance`]: crate::Transformer::to_instance
/// [`Transformer::to_plain`]: crate::Transformer::to_plain
pub struct Instance {
    shape: &'static str,
    flatten: Box<dyn Fn() -> Result<Value, TransformError> + Send + Sync>,
}

impl Instance {
    fn new<T>(shape: &'static str, typed: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Instance {
            shape,
            flatten: Box::new(move || {
                serde_json::to_value(&typed)
                    .map_err(|source| TransformError::Flatten { shape, source })
            }),
        }
    }

    /// Type name of the shape this instance was materialized from.
    pub fn shape(&self) -> &'static str {
        self.shape
    }

    /// Flatten the instance back into plain JSON (no option filtering).
    pub fn to_value(&self) -> Result<Value, TransformError> {
        (self.flatten)()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("shape", &self.shape).finish()
    }
}
