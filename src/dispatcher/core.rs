//! Dispatcher core module - match and invoke.
//!
//! Resolution runs in two phases against a [`RouteTable`]:
//!
//! 1. static lookup by the normalized path (hash map, independent of the
//!    number of dynamic routes);
//! 2. linear scan of dynamic routes in registration order; the first
//!    pattern that matches wins.
//!
//! A static hit always beats a dynamic route that would match the same path.

use http::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Result, RouterError};
use crate::params::Params;
use crate::router::{RouteEntry, RouteTable};

/// What handlers return
pub type HandlerResult = Result<Value>;

/// Closure/function handler signature: `(normalized path, params)`
pub type HandlerFn = dyn Fn(&str, &Params) -> HandlerResult + Send + Sync;

/// An object whose methods can be addressed by name.
///
/// This is the `(object, method-name)` half of [`Handler`]: the router holds
/// the target and the method name, and calls back through `call_method`.
pub trait MethodTarget: Send + Sync {
    /// Invoke `method`. Unknown names should return [`RouterError::ActionNotFound`].
    fn call_method(&self, method: &str, path: &str, params: &Params) -> HandlerResult;
}

/// Callable bound to a route
#[derive(Clone)]
pub enum Handler {
    /// Standalone function or closure
    Function(Arc<HandlerFn>),
    /// Named method on a shared target
    BoundMethod {
        target: Arc<dyn MethodTarget>,
        method: Arc<str>,
    },
}

impl Handler {
    /// Wrap a closure or function
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &Params) -> HandlerResult + Send + Sync + 'static,
    {
        Handler::Function(Arc::new(f))
    }

    /// Bind `method` on `target`
    pub fn bound<T>(target: Arc<T>, method: &str) -> Self
    where
        T: MethodTarget + 'static,
    {
        Handler::BoundMethod {
            target,
            method: Arc::from(method),
        }
    }

    /// Call the handler
    pub fn invoke(&self, path: &str, params: &Params) -> HandlerResult {
        match self {
            Handler::Function(f) => f(path, params),
            Handler::BoundMethod { target, method } => target.call_method(method, path, params),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Function(_) => f.write_str("Handler::Function"),
            Handler::BoundMethod { method, .. } => {
                write!(f, "Handler::BoundMethod({method})")
            }
        }
    }
}

/// Which phase produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact hit in the static map
    Static,
    /// First matching dynamic route
    Dynamic,
}

/// Successful resolution of a method + path
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The winning entry
    pub entry: &'a RouteEntry,
    /// Decoded parameters (empty for static routes)
    pub params: Params,
    pub kind: MatchKind,
}

impl RouteMatch<'_> {
    /// Template of the winning route
    #[must_use]
    pub fn template(&self) -> &str {
        &self.entry.route.template
    }
}

/// Context handed to the no-match handler
pub struct NoMatch<'a> {
    pub method: &'a Method,
    /// Normalized request path
    pub path: &'a str,
    pub table: &'a RouteTable,
}

impl NoMatch<'_> {
    /// Listing of every registered route across methods
    #[must_use]
    pub fn routes_trace(&self) -> String {
        self.table.trace_all(None)
    }

    /// The diagnostic error the default handler returns
    #[must_use]
    pub fn to_error(&self) -> RouterError {
        RouterError::NoRouteMatched {
            method: self.method.to_string(),
            path: self.path.to_string(),
            trace: self.routes_trace(),
        }
    }
}

/// Fallback invoked when nothing matches.
///
/// The default fails with [`RouterError::NoRouteMatched`]; a replacement may
/// return a value instead (a 404 page, a redirect target, ...).
#[derive(Clone)]
pub struct NoMatchHandler(Arc<dyn Fn(&NoMatch<'_>) -> HandlerResult + Send + Sync>);

impl NoMatchHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&NoMatch<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, no_match: &NoMatch<'_>) -> HandlerResult {
        (self.0)(no_match)
    }
}

impl Default for NoMatchHandler {
    fn default() -> Self {
        Self::new(|no_match| Err(no_match.to_error()))
    }
}

impl fmt::Debug for NoMatchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NoMatchHandler")
    }
}

/// Stateless resolver over a borrowed route table
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    table: &'a RouteTable,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(table: &'a RouteTable) -> Self {
        Self { table }
    }

    /// Resolve an already normalized path.
    ///
    /// Returns `None` when neither phase matches; a method with no routes
    /// behaves exactly like an unknown path.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'a>> {
        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();

        if let Some(entry) = self.table.lookup_static(method, path) {
            info!(
                method = %method,
                path = %path,
                route_pattern = %entry.route.template,
                duration_us = match_start.elapsed().as_micros(),
                "Static route matched"
            );
            return Some(RouteMatch {
                entry,
                params: Params::new(),
                kind: MatchKind::Static,
            });
        }

        for (tried, entry) in self.table.iter_dynamic(method).enumerate() {
            let Some(matcher) = entry.route.matcher() else {
                continue;
            };
            if let Some(params) = matcher.captures(path) {
                info!(
                    method = %method,
                    path = %path,
                    route_pattern = %entry.route.template,
                    path_params = ?params,
                    candidates_tried = tried + 1,
                    duration_us = match_start.elapsed().as_micros(),
                    "Dynamic route matched"
                );
                return Some(RouteMatch {
                    entry,
                    params,
                    kind: MatchKind::Dynamic,
                });
            }
        }

        warn!(
            method = %method,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// Resolve and invoke; on a miss the `no_match` handler runs instead.
    ///
    /// `on_match` sees the resolved parameters before the handler is called
    /// (the router uses it to refresh its last-match context).
    pub fn dispatch<F>(
        &self,
        method: &Method,
        path: &str,
        no_match: &NoMatchHandler,
        on_match: F,
    ) -> HandlerResult
    where
        F: FnOnce(&Params),
    {
        match self.resolve(method, path) {
            Some(matched) => {
                on_match(&matched.params);
                matched.entry.handler.invoke(path, &matched.params)
            }
            None => no_match.call(&NoMatch {
                method,
                path,
                table: self.table,
            }),
        }
    }
}
