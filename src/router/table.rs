//! Per-method route storage.
//!
//! Each HTTP method owns a hash map of static routes (keyed by normalized
//! literal, last registration wins) and an insertion-ordered list of dynamic
//! routes (duplicates kept; the earliest registered is tried first).

use http::Method;
use smallvec::{smallvec, SmallVec};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::compiler::CompiledRoute;
use crate::dispatcher::Handler;

/// A compiled route bound to its handler
#[derive(Clone, Debug)]
pub struct RouteEntry {
    pub route: Arc<CompiledRoute>,
    pub handler: Handler,
}

/// Routes registered under one method
#[derive(Clone, Debug, Default)]
pub struct MethodRoutes {
    static_routes: HashMap<String, RouteEntry>,
    dynamic_routes: Vec<RouteEntry>,
}

impl MethodRoutes {
    /// Number of distinct static routes plus every dynamic route
    #[must_use]
    pub fn len(&self) -> usize {
        self.static_routes.len() + self.dynamic_routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.static_routes.is_empty() && self.dynamic_routes.is_empty()
    }

    /// Registered templates: static ones sorted, then dynamic ones in registration order
    #[must_use]
    pub fn templates(&self) -> Vec<&str> {
        let mut statics: Vec<&str> = self.static_routes.keys().map(String::as_str).collect();
        statics.sort_unstable();
        statics.extend(
            self.dynamic_routes
                .iter()
                .map(|e| e.route.template.as_str()),
        );
        statics
    }
}

/// One or more methods a route is registered under
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSet(SmallVec<[Method; 4]>);

impl MethodSet {
    /// Methods in the order given
    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.0.iter()
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        Self(smallvec![Method::GET])
    }
}

impl From<Method> for MethodSet {
    fn from(method: Method) -> Self {
        Self(smallvec![method])
    }
}

impl From<Vec<Method>> for MethodSet {
    fn from(methods: Vec<Method>) -> Self {
        Self(methods.into_iter().collect())
    }
}

impl From<&[Method]> for MethodSet {
    fn from(methods: &[Method]) -> Self {
        Self(methods.iter().cloned().collect())
    }
}

impl<const N: usize> From<[Method; N]> for MethodSet {
    fn from(methods: [Method; N]) -> Self {
        Self(methods.into_iter().collect())
    }
}

/// All routes of a router, grouped by method
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    methods: HashMap<Method, MethodRoutes>,
}

impl RouteTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route` under `method`, creating the method's table on first use
    pub fn add(&mut self, method: Method, route: Arc<CompiledRoute>, handler: Handler) {
        let routes = self.methods.entry(method.clone()).or_default();
        let entry = RouteEntry { route, handler };

        if entry.route.is_static() {
            let key = entry.route.template.clone();
            if routes.static_routes.insert(key, entry).is_some() {
                warn!(
                    method = %method,
                    "Replaced existing static route handler"
                );
            }
        } else {
            debug!(
                method = %method,
                template = %entry.route.template,
                candidates = routes.dynamic_routes.len() + 1,
                "Dynamic route appended"
            );
            routes.dynamic_routes.push(entry);
        }
    }

    /// Exact lookup of a normalized path among static routes
    #[must_use]
    pub fn lookup_static(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        self.methods.get(method)?.static_routes.get(path)
    }

    /// Dynamic routes for `method` in registration order
    pub fn iter_dynamic(&self, method: &Method) -> impl Iterator<Item = &RouteEntry> {
        self.methods
            .get(method)
            .map(|r| r.dynamic_routes.as_slice())
            .unwrap_or_default()
            .iter()
    }

    /// Routes registered for one method, if any
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> Option<&MethodRoutes> {
        self.methods.get(method)
    }

    /// Number of routes stored under `method`
    #[must_use]
    pub fn route_count(&self, method: &Method) -> usize {
        self.methods.get(method).map_or(0, MethodRoutes::len)
    }

    /// Methods that have at least one route, sorted by name
    #[must_use]
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Human-readable listing of every template, methods separated by `; `.
    ///
    /// With `method` set only that method is listed. Used by the default
    /// no-match handler so the diagnostic shows what *was* registered.
    #[must_use]
    pub fn trace_all(&self, method: Option<&Method>) -> String {
        let methods: Vec<&Method> = match method {
            Some(m) => vec![m],
            None => self.methods(),
        };

        if methods.is_empty() {
            return "<no routes registered>".to_string();
        }

        methods
            .into_iter()
            .map(|m| {
                let templates = self
                    .methods
                    .get(m)
                    .map(MethodRoutes::templates)
                    .unwrap_or_default();
                let listing = if templates.is_empty() {
                    "<none>".to_string()
                } else {
                    templates.join(", ")
                };
                format!("{m} : {listing}")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
