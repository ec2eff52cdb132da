//! Axum integration for the response serialization engine.
//!
//! Exposes the route registry, the middleware function, HTTP error mapping,
//! and configuration so applications and integration tests share the same
//! building blocks:
//!
//! ```ignore
//! let registry = SerializeRegistry::builder()
//!     .route(Method::GET, "/users/{id}", SerializeRule::shaped::<User>())
//!     .build();
//!
//! let app = Router::new()
//!     .route("/users/{id}", get(get_user))
//!     .layer(middleware::from_fn_with_state(
//!         SerializeState::new(registry),
//!         serialize_response,
//!     ));
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod response;
pub mod state;

pub use config::SerializerConfig;
pub use error::{AdapterError, AdapterResult};
pub use middleware::serialize_response;
pub use registry::{ResolvedRule, SerializeRegistry, SerializeRegistryBuilder, SerializeRule};
pub use response::DataResponse;
pub use state::SerializeState;
