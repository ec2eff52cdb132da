use thiserror::Error;

/// Failures raised while moving a payload between typed and plain form.
///
/// There is no recovery path: callers propagate these with `?` and let the
/// host pipeline turn them into a failure response.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The payload could not be materialized into the target shape.
    #[error("cannot materialize `{shape}` from response payload: {source}")]
    Materialize {
        /// Type name of the target shape.
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A typed instance could not be flattened back into plain JSON.
    #[error("cannot flatten `{shape}` into a plain value: {source}")]
    Flatten {
        /// Type name of the shape the instance was materialized from.
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TransformError {
    /// Type name of the shape involved in the failure.
    pub fn shape(&self) -> &'static str {
        match self {
            TransformError::Materialize { shape, .. } => shape,
            TransformError::Flatten { shape, .. } => shape,
        }
    }
}
