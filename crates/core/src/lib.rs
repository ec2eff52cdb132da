//! Transport-agnostic response serialization engine.
//!
//! Converts handler payloads between typed ("shaped") and plain JSON
//! representations. The HTTP integration lives in `reshape-axum`; this
//! crate only knows about [`serde_json::Value`] payloads, target shapes,
//! and the [`Transformer`] seam that performs the actual conversion.

pub mod error;
pub mod options;
pub mod serialize;
pub mod shape;
pub mod transform;

pub use error::TransformError;
pub use options::SerializeOptions;
pub use serialize::serialize;
pub use shape::{Instance, TypeShape};
pub use transform::{SerdeTransformer, Transformer};
