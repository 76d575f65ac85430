//! Router façade: registration, dispatch and last-match parameter access.

use http::Method;
use std::sync::Arc;
use tracing::{debug, info};

use super::compiler::{normalize_route, PatternCompiler};
use super::table::{MethodSet, RouteTable};
use crate::dispatcher::{Dispatcher, Handler, HandlerResult, NoMatchHandler};
use crate::error::Result;
use crate::params::Params;
use crate::runtime_config::RuntimeConfig;
use crate::types::{TypeDescriptor, TypeRegistry};

/// URL router with typed placeholders.
///
/// Owns the type registry, the route table, the no-match handler and the
/// parameters of the last successful match. Dispatch takes `&mut self`
/// because it rewrites that last-match state; share one router across
/// threads only behind external synchronization, or build one per worker.
///
/// # Last-match parameters
///
/// A successful dispatch replaces the stored parameters entirely (a static
/// hit leaves them empty). A dispatch that falls through to the no-match
/// handler does **not** clear them, so `has_param` / `get_param` keep
/// answering for the previous match.
#[derive(Clone, Debug)]
pub struct Router {
    types: TypeRegistry,
    table: RouteTable,
    no_match: NoMatchHandler,
    params: Params,
    request_method: Method,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Empty router with the built-in types; dispatches as `GET`
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            table: RouteTable::new(),
            no_match: NoMatchHandler::default(),
            params: Params::new(),
            request_method: Method::GET,
        }
    }

    /// Empty router whose implicit request method comes from the environment
    #[must_use]
    pub fn with_config(config: &RuntimeConfig) -> Self {
        let mut router = Self::new();
        router.request_method = config.request_method.clone();
        router
    }

    /// Register (or replace) a placeholder type.
    ///
    /// Routes already compiled keep the descriptor they were built with.
    pub fn add_type(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        self.types.register(descriptor)
    }

    /// Registered placeholder types
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Compile `template` once and register it under every method in `methods`.
    ///
    /// # Errors
    ///
    /// Compilation errors abort the call before anything is stored.
    pub fn add_route(
        &mut self,
        template: &str,
        handler: Handler,
        methods: impl Into<MethodSet>,
    ) -> Result<()> {
        let compiled = Arc::new(PatternCompiler::new(&self.types).compile(template)?);
        let methods = methods.into();

        for method in methods.iter() {
            debug!(
                method = %method,
                template = %compiled.template,
                is_static = compiled.is_static(),
                "Route registered"
            );
            self.table.add(method.clone(), Arc::clone(&compiled), handler.clone());
        }
        Ok(())
    }

    /// Shorthand for a GET-only route
    pub fn add_get_route(&mut self, template: &str, handler: Handler) -> Result<()> {
        self.add_route(template, handler, Method::GET)
    }

    /// Shorthand for a POST-only route
    pub fn add_post_route(&mut self, template: &str, handler: Handler) -> Result<()> {
        self.add_route(template, handler, Method::POST)
    }

    /// Replace the no-match handler, returning the previous one so it can be restored
    pub fn set_no_match_handler(&mut self, handler: NoMatchHandler) -> NoMatchHandler {
        std::mem::replace(&mut self.no_match, handler)
    }

    /// Method used by [`call_route`](Self::call_route)
    #[must_use]
    pub fn request_method(&self) -> &Method {
        &self.request_method
    }

    /// Set the implicit request method, returning the previous one
    pub fn set_request_method(&mut self, method: Method) -> Method {
        std::mem::replace(&mut self.request_method, method)
    }

    /// Dispatch `raw_path` using the current request method
    pub fn call_route(&mut self, raw_path: &str) -> HandlerResult {
        let method = self.request_method.clone();
        self.call_route_with_method(&method, raw_path)
    }

    /// Dispatch a path given as segments (`["catalog", "1"]` → `/catalog/1/`)
    pub fn call_route_segments<S: AsRef<str>>(&mut self, segments: &[S]) -> HandlerResult {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("/");
        self.call_route(&joined)
    }

    /// Dispatch `raw_path` for an explicit method
    pub fn call_route_with_method(&mut self, method: &Method, raw_path: &str) -> HandlerResult {
        let path = normalize_route(raw_path);
        let params = &mut self.params;
        Dispatcher::new(&self.table).dispatch(method, &path, &self.no_match, |matched| {
            params.clone_from(matched);
        })
    }

    /// Whether the last successful match captured `name`
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params.has(name)
    }

    /// Value captured for `name` by the last successful match
    ///
    /// # Errors
    ///
    /// [`RouterError::ParamNotFound`](crate::RouterError::ParamNotFound) if absent.
    pub fn get_param(&self, name: &str) -> Result<&str> {
        self.params.get(name)
    }

    /// Parameters of the last successful match
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Listing of every registered route across methods
    #[must_use]
    pub fn routes_trace(&self) -> String {
        self.table.trace_all(None)
    }

    /// Log every registered route at `info`
    pub fn dump_routes(&self) {
        for method in self.table.methods() {
            info!(
                method = %method,
                routes_count = self.table.route_count(method),
                routes = %self.table.trace_all(Some(method)),
                "Routing table"
            );
        }
    }
}
