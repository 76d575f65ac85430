//! # Router Module
//!
//! Route registration, template compilation and per-method storage.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: at registration, templates such as `/catalog/[i:id]/`
//!    are compiled by [`PatternCompiler`] into either a static literal or an
//!    anchored regex with one group per placeholder. Placeholder types come
//!    from the router's [`TypeRegistry`](crate::types::TypeRegistry).
//!
//! 2. **Matching**: the [`Dispatcher`](crate::dispatcher::Dispatcher) looks the
//!    normalized path up in the static map, then tests dynamic routes in the
//!    order they were registered.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use pathmux::{dispatcher::Handler, router::Router};
//! use serde_json::json;
//!
//! # fn main() -> pathmux::Result<()> {
//! let mut router = Router::new();
//! router.add_route(
//!     "/catalog/[i:id]/",
//!     Handler::function(|_, params| Ok(json!(params.get("id")?))),
//!     Method::GET,
//! )?;
//!
//! assert_eq!(router.call_route("/catalog/42/")?, json!("42"));
//! assert_eq!(router.get_param("id")?, "42");
//! # Ok(())
//! # }
//! ```

mod compiler;
mod core;
mod table;

pub use compiler::{
    normalize_route, CompiledRoute, ParamSlot, PatternCompiler, RouteKind, RouteMatcher,
};
pub use core::Router;
pub use table::{MethodRoutes, MethodSet, RouteEntry, RouteTable};
