//! # pathmux
//!
//! **pathmux** matches a request path and HTTP method against registered route
//! templates and dispatches to the associated handler, extracting typed
//! parameters embedded in the path.
//!
//! ## Templates
//!
//! A template is a path with optional `[type:name]` placeholders:
//!
//! ```text
//! /catalog/                     static: matched by string equality
//! /catalog/[i:id]/              dynamic: id is an integer or decimal
//! /user/[a:login]/posts/[il:ids]/
//! ```
//!
//! Built-in types are `i` (signed integer or decimal), `a` (alphanumerics plus
//! `. _ - @ % =`), `s` (anything but `/`, HTML-escaped on capture) and `il`
//! (comma-separated unsigned integers, kept as one string). More can be added
//! with [`Router::add_type`].
//!
//! ## Architecture
//!
//! - **[`types`]** - [`TypeRegistry`]: type token → regex fragment + decode rule
//! - **[`router`]** - [`PatternCompiler`](router::PatternCompiler), the per-method
//!   [`RouteTable`](router::RouteTable) and the [`Router`] façade
//! - **[`dispatcher`]** - static-then-dynamic resolution and handler invocation
//! - **[`params`]** - [`Params`] captured by the last successful match
//! - **[`actions`]** - registering `action*` methods of an object as routes
//! - **[`route_file`]** - YAML route manifests
//! - **[`runtime_config`]** / **[`otel`]** - environment configuration and logging
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Dispatcher
//!     participant Table as RouteTable
//!     participant Handler
//!
//!     Caller->>Router: call_route("/catalog/1")
//!     Router->>Router: normalize → "/catalog/1/"
//!     Router->>Dispatcher: dispatch(GET, "/catalog/1/")
//!     Dispatcher->>Table: lookup_static(GET, path)
//!     alt static hit
//!         Dispatcher->>Router: params = {}
//!     else
//!         Dispatcher->>Table: iter_dynamic(GET)
//!         Dispatcher->>Dispatcher: first pattern that matches,<br/>decode captures
//!         Dispatcher->>Router: params = {id: "1"}
//!     end
//!     Dispatcher->>Handler: invoke(path, params)
//!     Handler-->>Caller: Value
//!     alt no match
//!         Dispatcher->>Router: no-match handler(path)
//!         Router-->>Caller: Err(NoRouteMatched)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use pathmux::{Handler, Router};
//! use serde_json::json;
//!
//! # fn main() -> pathmux::Result<()> {
//! let mut router = Router::new();
//! router.add_route("/catalog/", Handler::function(|_, _| Ok(json!("index"))), Method::GET)?;
//! router.add_route(
//!     "/catalog/[s:title]/",
//!     Handler::function(|_, params| Ok(json!(params.get("title")?))),
//!     [Method::GET, Method::POST],
//! )?;
//!
//! assert_eq!(router.call_route("catalog")?, json!("index"));
//! assert_eq!(router.call_route("/catalog/a&b/")?, json!("a&amp;b"));
//! assert!(router.call_route("/missing/").unwrap_err().is_no_route());
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! A [`Router`] is synchronous and keeps the parameters of its last match, so
//! dispatch needs `&mut self`. Finish registration before dispatching, and
//! use one router per worker (it is `Clone`) or wrap it in a lock.

pub mod actions;
pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod otel;
pub mod params;
pub mod route_file;
pub mod router;
pub mod runtime_config;
pub mod types;

pub use dispatcher::{Handler, HandlerResult, MethodTarget, NoMatch, NoMatchHandler};
pub use error::{Result, RouterError};
pub use params::Params;
pub use router::Router;
pub use types::{TypeDescriptor, TypeRegistry};
