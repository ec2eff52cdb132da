//! Shared test application builder.
//!
//! Builds a small router wired the way a production service would wire the
//! serialization middleware (tracing, panic recovery, serialization layer)
//! so every integration test exercises the same stack.

use axum::http::{Method, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use reshape_axum::config::SerializerConfig;
use reshape_axum::middleware::serialize_response;
use reshape_axum::registry::{SerializeRegistry, SerializeRule};
use reshape_axum::response::DataResponse;
use reshape_axum::state::SerializeState;
use reshape_core::SerializeOptions;

/// The shape `/users/*` responses are validated against.
///
/// `password` is `skip_serializing`, so any payload run through this shape
/// loses the field.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password: String,
}

/// The shape `/admin/*` responses are validated against.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub actor: i64,
}

/// Initialize test tracing once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "reshape_axum=debug".into()),
        )
        .try_init();
}

// --- Handlers ---
//
// Handlers deliberately return raw `json!` payloads (including fields the
// shape hides) so the reshaping done by the middleware is observable.

async fn get_user() -> Json<Value> {
    Json(json!({ "id": 1, "name": "a", "password": "hunter2" }))
}

async fn list_users() -> Json<Value> {
    Json(json!([{ "id": 1 }, { "id": 2 }]))
}

async fn team() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "a", "password": "hunter2" },
        { "id": 2, "name": "b", "password": "qwerty" }
    ]))
}

async fn paged_users() -> Json<Value> {
    Json(json!({
        "data": { "id": 1, "name": "a", "password": "hunter2" },
        "total": 10,
        "page": 2
    }))
}

async fn me() -> Json<DataResponse<User>> {
    Json(DataResponse {
        data: User {
            id: 7,
            name: "me".into(),
            password: "s3cret".into(),
        },
    })
}

async fn count() -> Json<Value> {
    Json(json!(42))
}

async fn report() -> &'static str {
    "hello"
}

async fn missing() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "nope", "password": "leaky" })),
    )
}

async fn audit() -> Json<Value> {
    Json(json!({ "action": "delete", "actor": 3, "_trace": "abc123" }))
}

async fn broken() -> Json<Value> {
    Json(json!({ "id": "not a number", "name": "b" }))
}

/// Build the registry the test app registers its routes with.
pub fn test_registry() -> SerializeRegistry {
    SerializeRegistry::builder()
        .route(Method::GET, "/users/{id}", SerializeRule::shaped::<User>())
        .route(Method::GET, "/users/{id}/page", SerializeRule::shaped::<User>())
        .route(Method::GET, "/me", SerializeRule::shaped::<User>())
        .route(Method::GET, "/team", SerializeRule::shaped::<Vec<User>>())
        .route(
            Method::GET,
            "/count",
            SerializeRule::new().with_options(SerializeOptions::default()),
        )
        .route(Method::GET, "/report", SerializeRule::shaped::<User>())
        .route(Method::GET, "/missing", SerializeRule::shaped::<User>())
        .route(Method::GET, "/broken", SerializeRule::shaped::<User>())
        .scope(
            "/admin",
            SerializeRule::shaped::<AuditEntry>()
                .with_options(SerializeOptions::exclude_prefixes(["_"])),
        )
        .build()
}

/// Build the full test application with the middleware stack applied.
pub fn build_test_app() -> Router {
    build_test_app_with_config(SerializerConfig::default())
}

/// Build the test application with a custom middleware configuration.
pub fn build_test_app_with_config(config: SerializerConfig) -> Router {
    init_tracing();

    let state = SerializeState::new(test_registry()).with_config(config);

    Router::new()
        .route("/users", get(list_users))
        .route("/team", get(team))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/page", get(paged_users))
        .route("/me", get(me))
        .route("/count", get(count))
        .route("/report", get(report))
        .route("/missing", get(missing))
        .route("/broken", get(broken))
        .route("/admin/audit", get(audit))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(state, serialize_response))
}
