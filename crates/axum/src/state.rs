use std::sync::Arc;

use reshape_core::{SerdeTransformer, Transformer};

use crate::config::SerializerConfig;
use crate::registry::SerializeRegistry;

/// Shared middleware state, injected via `middleware::from_fn_with_state`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The transformer
/// is an explicitly constructed dependency; there is no process-global
/// fallback.
#[derive(Clone)]
pub struct SerializeState {
    /// Frozen route-to-rule registry.
    pub registry: Arc<SerializeRegistry>,
    /// Backend performing the typed/plain conversions.
    pub transformer: Arc<dyn Transformer>,
    /// Middleware configuration (data field name, body limit).
    pub config: Arc<SerializerConfig>,
}

impl SerializeState {
    /// State with the default [`SerdeTransformer`] and default config.
    pub fn new(registry: SerializeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            transformer: Arc::new(SerdeTransformer::new()),
            config: Arc::new(SerializerConfig::default()),
        }
    }

    /// Replace the transformer backend.
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Arc::new(transformer);
        self
    }

    /// Replace the middleware configuration.
    pub fn with_config(mut self, config: SerializerConfig) -> Self {
        self.config = Arc::new(config);
        self
    }
}
