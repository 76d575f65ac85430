//! # Dispatcher Module
//!
//! Turns a `(method, path)` pair into a handler call.
//!
//! ## Request Flow
//!
//! 1. The router normalizes the path (`catalog/1` → `/catalog/1/`)
//! 2. [`Dispatcher::resolve`] tries the static table, then dynamic routes in
//!    registration order
//! 3. On a hit the decoded [`Params`](crate::params::Params) are published and
//!    the route's [`Handler`] is invoked with `(path, params)`
//! 4. On a miss the [`NoMatchHandler`] runs; the default returns
//!    [`RouterError::NoRouteMatched`](crate::RouterError::NoRouteMatched) with a
//!    trace of every registered route
//!
//! ## Handlers
//!
//! ```rust
//! use pathmux::dispatcher::Handler;
//! use serde_json::json;
//!
//! let handler = Handler::function(|path, params| {
//!     Ok(json!({ "path": path, "id": params.get("id")? }))
//! });
//! # let _ = handler;
//! ```
//!
//! Object methods are bound by name through [`MethodTarget`], the way
//! [`fetch_actions`](crate::actions::fetch_actions) registers them.

mod core;

pub use core::{
    Dispatcher, Handler, HandlerFn, HandlerResult, MatchKind, MethodTarget, NoMatch,
    NoMatchHandler, RouteMatch,
};
