//! Route-registration-time serialization metadata.
//!
//! Replaces runtime reflection with an explicit registry: each route (and
//! optionally each scope of routes) is associated with a [`SerializeRule`]
//! when the router is assembled, and the middleware resolves the rule by
//! method plus matched-path template at request time.

use std::collections::HashMap;

use axum::http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use reshape_core::{SerializeOptions, TypeShape};

/// Serialization metadata attached to a route or scope.
///
/// Either field may be absent; resolution falls back to the enclosing scope
/// per field (see [`SerializeRegistry::resolve`]).
#[derive(Debug, Clone, Default)]
pub struct SerializeRule {
    /// Options forwarded to the transformer.
    pub options: Option<SerializeOptions>,
    /// Target shape the response (or its data field) is validated against.
    pub shape: Option<TypeShape>,
}

impl SerializeRule {
    /// Rule with no options and no shape (explicit pass-through).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule targeting the shape of `T`.
    ///
    /// For list routes, `T` is the collection (e.g.
    /// `SerializeRule::shaped::<Vec<User>>()`); the payload is materialized
    /// as one value, not element by element.
    pub fn shaped<T>() -> Self
    where
        T: DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        Self::new().with_shape::<T>()
    }

    /// Attach transformer options.
    pub fn with_options(mut self, options: SerializeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Attach the shape of `T`.
    pub fn with_shape<T>(mut self) -> Self
    where
        T: DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        self.shape = Some(TypeShape::of::<T>());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    method: Method,
    path: String,
}

/// Builder for [`SerializeRegistry`]; used while the router is assembled.
#[derive(Debug, Default)]
pub struct SerializeRegistryBuilder {
    routes: HashMap<RouteKey, SerializeRule>,
    scopes: Vec<(String, SerializeRule)>,
}

impl SerializeRegistryBuilder {
    /// Register per-route metadata.
    ///
    /// `path` is the route template as registered with the router (e.g.
    /// `/users/{id}`), not a concrete request path.
    pub fn route(mut self, method: Method, path: impl Into<String>, rule: SerializeRule) -> Self {
        self.routes.insert(
            RouteKey {
                method,
                path: path.into(),
            },
            rule,
        );
        self
    }

    /// Register scope-level metadata for every route whose template falls
    /// under `prefix` at a path-segment boundary. The per-route entry, when
    /// present, wins per field.
    pub fn scope(mut self, prefix: impl Into<String>, rule: SerializeRule) -> Self {
        self.scopes.push((prefix.into(), rule));
        self
    }

    /// Freeze into an immutable registry.
    pub fn build(mut self) -> SerializeRegistry {
        // Longest prefix wins when scopes nest.
        self.scopes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        SerializeRegistry {
            routes: self.routes,
            scopes: self.scopes,
        }
    }
}

/// Immutable registry of serialization metadata, frozen at startup.
#[derive(Debug, Default)]
pub struct SerializeRegistry {
    routes: HashMap<RouteKey, SerializeRule>,
    scopes: Vec<(String, SerializeRule)>,
}

/// The metadata view resolved for one request.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRule<'a> {
    pub options: Option<&'a SerializeOptions>,
    pub shape: Option<&'a TypeShape>,
}

impl SerializeRegistry {
    pub fn builder() -> SerializeRegistryBuilder {
        SerializeRegistryBuilder::default()
    }

    /// Resolve the metadata for a request.
    ///
    /// Options and shape fall back independently from the route entry to the
    /// longest matching scope, so a scope can provide the shape while a
    /// route overrides only the options (or vice versa). Returns `None` when
    /// neither level yields anything, which the middleware treats as
    /// pass-through.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<ResolvedRule<'_>> {
        let route = self.routes.get(&RouteKey {
            method: method.clone(),
            path: path.to_owned(),
        });
        let scope = self
            .scopes
            .iter()
            .find(|(prefix, _)| scope_matches(prefix, path))
            .map(|(_, rule)| rule);

        let options = route
            .and_then(|rule| rule.options.as_ref())
            .or_else(|| scope.and_then(|rule| rule.options.as_ref()));
        let shape = route
            .and_then(|rule| rule.shape.as_ref())
            .or_else(|| scope.and_then(|rule| rule.shape.as_ref()));

        if options.is_none() && shape.is_none() {
            return None;
        }
        Some(ResolvedRule { options, shape })
    }
}

/// Whether `path` falls under `prefix` at a path-segment boundary, so
/// `/admin` covers `/admin` and `/admin/audit` but not `/administrators`.
fn scope_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct User {
        id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Audit {
        entry: String,
    }

    #[test]
    fn unregistered_route_resolves_to_none() {
        let registry = SerializeRegistry::builder().build();
        assert!(registry.resolve(&Method::GET, "/users/{id}").is_none());
    }

    #[test]
    fn route_entry_wins_over_scope() {
        let registry = SerializeRegistry::builder()
            .scope("/users", SerializeRule::shaped::<Audit>())
            .route(Method::GET, "/users/{id}", SerializeRule::shaped::<User>())
            .build();

        let rule = registry.resolve(&Method::GET, "/users/{id}").unwrap();
        assert!(rule.shape.unwrap().name().ends_with("User"));
    }

    #[test]
    fn options_and_shape_fall_back_independently() {
        let registry = SerializeRegistry::builder()
            .scope("/users", SerializeRule::shaped::<User>())
            .route(
                Method::GET,
                "/users/{id}",
                SerializeRule::new().with_options(SerializeOptions::exclude_prefixes(["_"])),
            )
            .build();

        let rule = registry.resolve(&Method::GET, "/users/{id}").unwrap();
        // Options from the route, shape from the scope.
        assert!(rule.options.unwrap().excludes("_rev"));
        assert!(rule.shape.unwrap().name().ends_with("User"));
    }

    #[test]
    fn longest_scope_prefix_wins() {
        let registry = SerializeRegistry::builder()
            .scope("/api", SerializeRule::shaped::<Audit>())
            .scope("/api/users", SerializeRule::shaped::<User>())
            .build();

        let rule = registry.resolve(&Method::GET, "/api/users/{id}").unwrap();
        assert!(rule.shape.unwrap().name().ends_with("User"));

        let rule = registry.resolve(&Method::GET, "/api/audit").unwrap();
        assert!(rule.shape.unwrap().name().ends_with("Audit"));
    }

    #[test]
    fn scope_prefix_matches_on_segment_boundary() {
        let registry = SerializeRegistry::builder()
            .scope("/admin", SerializeRule::shaped::<Audit>())
            .build();

        assert!(registry.resolve(&Method::GET, "/admin").is_some());
        assert!(registry.resolve(&Method::GET, "/admin/audit").is_some());
        assert!(registry.resolve(&Method::GET, "/administrators").is_none());
    }

    #[test]
    fn method_is_part_of_the_key() {
        let registry = SerializeRegistry::builder()
            .route(Method::GET, "/users", SerializeRule::shaped::<User>())
            .build();

        assert!(registry.resolve(&Method::GET, "/users").is_some());
        assert!(registry.resolve(&Method::POST, "/users").is_none());
    }

    #[test]
    fn empty_rule_is_pass_through() {
        let registry = SerializeRegistry::builder()
            .route(Method::GET, "/users", SerializeRule::new())
            .build();

        assert!(registry.resolve(&Method::GET, "/users").is_none());
    }
}
