//! Route definitions, the ordered route table, and the active-route snapshot.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::params::QueryValue;
use crate::path::{normalize, PathPattern};

/// Declarative route definition supplied at registration.
///
/// Replaces ad-hoc field merging with a typed configuration: `path` is
/// required, everything else is optional with documented defaults.
///
/// # Example
///
/// ```
/// use rudder_router::RouteConfig;
///
/// let config = RouteConfig::new("/users/:id")
///     .name("user-detail")
///     .meta("requires_auth", true);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path template, e.g. `/users/:id`. Normalized at registration.
    pub path: String,
    /// Optional route name for reverse lookup. Default: unnamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arbitrary application data carried by the route. Default: empty.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta: HashMap<String, serde_json::Value>,
}

impl RouteConfig {
    /// Creates a definition for the given path template.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            meta: HashMap::new(),
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches one meta entry.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// A registered route: canonical template plus compiled matcher.
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    pattern: PathPattern,
    name: Option<String>,
    meta: HashMap<String, serde_json::Value>,
}

impl Route {
    /// Returns the canonical template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the compiled matcher.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the route name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the attached meta data.
    #[must_use]
    pub fn meta(&self) -> &HashMap<String, serde_json::Value> {
        &self.meta
    }
}

/// An ordered collection of routes, queried by first structural match.
///
/// Insertion order is the match-priority order; the table grows only via
/// registration and never shrinks at runtime. Lookup is a linear scan,
/// which is fine for the small static tables this router is built for.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    base: String,
}

impl RouteTable {
    /// Creates an empty table whose normalization strips `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            base: base.into(),
        }
    }

    /// Validates, compiles, and appends a route definition.
    ///
    /// Duplicate and overlapping templates are permitted; the earlier
    /// registration wins ties at match time.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidTemplate`] for an empty path or a
    /// template that names the same `:param` twice.
    pub fn register(&mut self, config: RouteConfig) -> Result<()> {
        if config.path.trim().is_empty() {
            return Err(RouterError::InvalidTemplate {
                template: config.path,
                reason: "path must not be empty".to_string(),
            });
        }

        let path = normalize(&config.path, &self.base, true);
        let pattern = PathPattern::compile(&path);

        let mut seen = HashSet::new();
        for name in pattern.param_names() {
            if name.is_empty() {
                return Err(RouterError::InvalidTemplate {
                    template: config.path,
                    reason: "parameter segment has no name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(RouterError::InvalidTemplate {
                    template: config.path,
                    reason: format!("duplicate parameter `:{name}`"),
                });
            }
        }

        debug!(%path, name = ?config.name, "route registered");
        self.routes.push(Route {
            path,
            pattern,
            name: config.name,
            meta: config.meta,
        });
        Ok(())
    }

    /// Returns the first route whose pattern matches the location, or
    /// `None` when nothing matches. The query string is ignored.
    #[must_use]
    pub fn find(&self, location: &str) -> Option<&Route> {
        let path = normalize(location, &self.base, true);
        self.routes.iter().find(|route| route.pattern.matches(&path))
    }

    /// Returns the first route registered under `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == Some(name))
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the base prefix this table strips.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Snapshot of the matched route while it is active.
///
/// Parameter and query values only exist per activation; they are captured
/// here instead of being written back onto the registered [`Route`], which
/// stays immutable.
#[derive(Debug, Clone)]
pub struct ActiveRoute {
    path: String,
    name: Option<String>,
    params: HashMap<String, String>,
    query: HashMap<String, QueryValue>,
}

impl ActiveRoute {
    pub(crate) fn new(
        path: String,
        name: Option<String>,
        params: HashMap<String, String>,
        query: HashMap<String, QueryValue>,
    ) -> Self {
        Self {
            path,
            name,
            params,
            query,
        }
    }

    /// Returns the route's canonical template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the route name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns one decoded parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the full parameter mapping.
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Returns one query value.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&QueryValue> {
        self.query.get(name)
    }

    /// Returns the full query mapping.
    #[must_use]
    pub fn query_map(&self) -> &HashMap<String, QueryValue> {
        &self.query
    }

    /// Reconstructs the template with `:name` placeholders substituted by
    /// the current parameter values. Placeholders without a value are kept
    /// as-is.
    #[must_use]
    pub fn location(&self) -> String {
        let mut out = String::new();
        for part in self.path.split('/').filter(|s| !s.is_empty()) {
            out.push('/');
            match part.strip_prefix(':').and_then(|name| self.param(name)) {
                Some(value) => out.push_str(value),
                None => out.push_str(part),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_normalizes_template() {
        let mut table = RouteTable::new("");
        table
            .register(RouteConfig::new("https://example.com/users/:id/"))
            .unwrap();
        assert_eq!(table.find("/users/7").unwrap().path(), "/users/:id");
    }

    #[test]
    fn test_register_rejects_empty_path() {
        let mut table = RouteTable::new("");
        assert!(table.register(RouteConfig::new("")).is_err());
        assert!(table.register(RouteConfig::new("   ")).is_err());
    }

    #[test]
    fn test_register_rejects_duplicate_params() {
        let mut table = RouteTable::new("");
        let err = table
            .register(RouteConfig::new("/a/:id/b/:id"))
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_first_registration_wins_ties() {
        let mut table = RouteTable::new("");
        table
            .register(RouteConfig::new("/users/:id").name("param"))
            .unwrap();
        table
            .register(RouteConfig::new("/users/new").name("literal"))
            .unwrap();

        // Both templates structurally match /users/new.
        assert_eq!(table.find("/users/new").unwrap().name(), Some("param"));
    }

    #[test]
    fn test_duplicate_templates_permitted() {
        let mut table = RouteTable::new("");
        table.register(RouteConfig::new("/a").name("first")).unwrap();
        table.register(RouteConfig::new("/a").name("second")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.find("/a").unwrap().name(), Some("first"));
    }

    #[test]
    fn test_find_ignores_query() {
        let mut table = RouteTable::new("");
        table.register(RouteConfig::new("/users/:id")).unwrap();
        assert!(table.find("/users/42?active=true").is_some());
    }

    #[test]
    fn test_find_respects_base() {
        let mut table = RouteTable::new("/app");
        table.register(RouteConfig::new("/users/:id")).unwrap();
        assert!(table.find("/app/users/42").is_some());
        assert!(table.find("/users/42").is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let table = RouteTable::new("");
        assert!(table.find("/anything").is_none());
    }

    #[test]
    fn test_by_name() {
        let mut table = RouteTable::new("");
        table
            .register(RouteConfig::new("/users/:id").name("user-detail"))
            .unwrap();
        assert!(table.by_name("user-detail").is_some());
        assert!(table.by_name("missing").is_none());
    }

    #[test]
    fn test_active_route_location() {
        let params: HashMap<String, String> =
            [("id".to_string(), "7".to_string())].into_iter().collect();
        let active = ActiveRoute::new(
            "/users/:id".to_string(),
            None,
            params,
            HashMap::new(),
        );
        assert_eq!(active.location(), "/users/7");
    }

    #[test]
    fn test_route_config_meta() {
        let config = RouteConfig::new("/admin").meta("requires_auth", true);
        assert_eq!(
            config.meta.get("requires_auth"),
            Some(&serde_json::Value::Bool(true))
        );
    }
}
