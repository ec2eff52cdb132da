//! Options honored by a [`Transformer`](crate::Transformer) when converting
//! payloads.
//!
//! The adapter itself never inspects these; it only forwards them to the
//! transformer alongside the payload. Route registration attaches them per
//! route or per scope (see `reshape-axum`).

use serde::{Deserialize, Serialize};

/// Transformation options attached to a route or scope.
///
/// Both filters are applied recursively, so keys inside nested objects and
/// array elements are affected as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Object keys starting with any of these prefixes are stripped.
    ///
    /// Applies in both directions: stripped from the input before
    /// materializing into a shape, and from the output when flattening.
    /// Typical use is hiding internal fields (e.g. prefix `"_"`).
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,

    /// Drop object fields whose value is `null` when flattening.
    #[serde(default)]
    pub drop_nulls: bool,
}

impl SerializeOptions {
    /// Options with no filters; every field passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip keys starting with any of the given prefixes.
    pub fn exclude_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude_prefixes: prefixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Enable dropping of `null` fields on flatten.
    pub fn with_drop_nulls(mut self) -> Self {
        self.drop_nulls = true;
        self
    }

    /// Whether the given object key is excluded by the prefix filter.
    pub fn excludes(&self, key: &str) -> bool {
        self.exclude_prefixes.iter().any(|p| key.starts_with(p))
    }
}
