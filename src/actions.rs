//! Registering an object's `action*` methods as routes.
//!
//! This sits outside the router core: it only lists method names and calls
//! [`Router::add_route`] for each of them. Rust has no runtime method
//! reflection, so a target lists its own method names via [`ActionTarget`].

use http::Method;
use std::sync::Arc;
use tracing::debug;

use crate::dispatcher::{Handler, MethodTarget};
use crate::error::Result;
use crate::router::Router;

/// Prefix that marks a method as a routable action
pub const ACTION_PREFIX: &str = "action";

/// A [`MethodTarget`] that can enumerate its callable methods
pub trait ActionTarget: MethodTarget {
    /// Names of every callable method, prefixed or not
    fn method_names(&self) -> Vec<String>;
}

/// `actionHelloWorld` → `hello-world`.
///
/// The prefix is stripped, the first character lowercased and every further
/// uppercase character becomes `-` followed by its lowercase form.
#[must_use]
pub fn method_name_to_route(method_name: &str) -> String {
    let name = method_name.strip_prefix(ACTION_PREFIX).unwrap_or(method_name);
    let mut route = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                route.push('-');
            }
            route.extend(c.to_lowercase());
        } else {
            route.push(c);
        }
    }
    route
}

/// Register every `action*` method of `target` for GET and POST.
///
/// Returns the number of actions registered.
pub fn fetch_actions<T>(router: &mut Router, target: Arc<T>) -> Result<usize>
where
    T: ActionTarget + 'static,
{
    let mut registered = 0;
    for name in target.method_names() {
        if !name.starts_with(ACTION_PREFIX) {
            continue;
        }
        let route = method_name_to_route(&name);
        debug!(action = %name, route = %route, "Registering action route");
        router.add_route(
            &route,
            Handler::bound(Arc::clone(&target), &name),
            [Method::GET, Method::POST],
        )?;
        registered += 1;
    }
    Ok(registered)
}
