//! Environment-supplied request method.
//!
//! Kept to a single test: it mutates process environment.

use http::Method;
use pathmux::runtime_config::{RuntimeConfig, REQUEST_METHOD_VAR};
use pathmux::{Handler, Router};
use serde_json::json;

#[test]
fn test_request_method_from_env() {
    std::env::set_var(REQUEST_METHOD_VAR, "DELETE");
    let config = RuntimeConfig::from_env();
    assert_eq!(config.request_method, Method::DELETE);

    let mut router = Router::with_config(&config);
    router
        .add_route(
            "/catalog/[i:cat_id]",
            Handler::function(|path, _| Ok(json!(path))),
            Method::DELETE,
        )
        .unwrap();
    assert_eq!(router.call_route("/catalog/1024/").unwrap(), json!("/catalog/1024/"));

    std::env::set_var(REQUEST_METHOD_VAR, "NOT A VERB");
    assert_eq!(RuntimeConfig::from_env().request_method, Method::GET);

    std::env::remove_var(REQUEST_METHOD_VAR);
    assert_eq!(RuntimeConfig::from_env().request_method, Method::GET);
}
