use reshape_core::serialize::DEFAULT_DATA_FIELD;

/// Middleware configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Name of the nested-payload field on enveloped responses
    /// (default: `data`).
    pub data_field: String,
    /// Maximum response body size the middleware will buffer, in bytes
    /// (default: 2 MiB). Larger bodies fail the request.
    pub max_body_bytes: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            data_field: DEFAULT_DATA_FIELD.to_owned(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl SerializerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default   |
    /// |-----------------------------|-----------|
    /// | `SERIALIZER_DATA_FIELD`     | `data`    |
    /// | `SERIALIZER_MAX_BODY_BYTES` | `2097152` |
    pub fn from_env() -> Self {
        let data_field =
            std::env::var("SERIALIZER_DATA_FIELD").unwrap_or_else(|_| DEFAULT_DATA_FIELD.into());

        let max_body_bytes: usize = std::env::var("SERIALIZER_MAX_BODY_BYTES")
            .unwrap_or_else(|_| "2097152".into())
            .parse()
            .expect("SERIALIZER_MAX_BODY_BYTES must be a valid usize");

        Self {
            data_field,
            max_body_bytes,
        }
    }
}
