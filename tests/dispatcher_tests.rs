//! Tests for handler invocation and the no-match fallback
//!
//! # Test Coverage
//!
//! - Function and bound-method handlers invoked uniformly
//! - Handler errors propagated unchanged
//! - Default no-match diagnostic (path + trace of all routes)
//! - Replacing and restoring the no-match handler

use http::Method;
use pathmux::dispatcher::{Dispatcher, MatchKind};
use pathmux::{Handler, HandlerResult, MethodTarget, NoMatchHandler, Params, Router, RouterError};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Catalog {
    calls: AtomicUsize,
}

impl MethodTarget for Catalog {
    fn call_method(&self, method: &str, path: &str, params: &Params) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match method {
            "item" => Ok(json!({ "path": path, "id": params.get("id")? })),
            "ids" => Ok(json!(params.get("ids")?)),
            other => Err(RouterError::ActionNotFound {
                action: other.to_string(),
            }),
        }
    }
}

#[test]
fn test_bound_method_handler() {
    let catalog = Arc::new(Catalog {
        calls: AtomicUsize::new(0),
    });
    let mut router = Router::new();
    router
        .add_route(
            "/catalog/[i:id]/",
            Handler::bound(Arc::clone(&catalog), "item"),
            Method::GET,
        )
        .unwrap();
    router
        .add_route(
            "/catalog/[il:ids]/",
            Handler::bound(Arc::clone(&catalog), "ids"),
            Method::POST,
        )
        .unwrap();

    assert_eq!(
        router.call_route("/catalog/3/").unwrap(),
        json!({ "path": "/catalog/3/", "id": "3" })
    );
    assert_eq!(
        router
            .call_route_with_method(&Method::POST, "/catalog/1,2/")
            .unwrap(),
        json!("1,2")
    );
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_bound_method_unknown_action() {
    let catalog = Arc::new(Catalog {
        calls: AtomicUsize::new(0),
    });
    let mut router = Router::new();
    router
        .add_route("/x/", Handler::bound(catalog, "missing"), Method::GET)
        .unwrap();

    match router.call_route("/x/") {
        Err(RouterError::ActionNotFound { action }) => assert_eq!(action, "missing"),
        other => panic!("expected ActionNotFound, got {other:?}"),
    }
}

#[test]
fn test_handler_error_propagates() {
    let mut router = Router::new();
    router
        .add_route(
            "/fail/",
            Handler::function(|_, _| Err(anyhow::anyhow!("backend down").into())),
            Method::GET,
        )
        .unwrap();

    let err = router.call_route("/fail/").unwrap_err();
    assert!(matches!(err, RouterError::Handler(_)));
    assert_eq!(err.to_string(), "backend down");
}

#[test]
fn test_default_no_match_message_contains_trace() {
    let mut router = Router::new();
    let noop = Handler::function(|_, _| Ok(json!(null)));
    router.add_route("/a/", noop.clone(), Method::GET).unwrap();
    router.add_route("/b/[i:id]/", noop, Method::POST).unwrap();

    let err = router.call_route("/nowhere").unwrap_err();
    assert_eq!(
        err.to_string(),
        "The processor was not found for the route /nowhere/ in GET : /a/; POST : /b/[i:id]/"
    );
}

#[test]
fn test_no_match_handler_override_and_restore() {
    let mut router = Router::new();

    let previous = router.set_no_match_handler(NoMatchHandler::new(|no_match| {
        Ok(json!({ "status": 404, "path": no_match.path, "method": no_match.method.as_str() }))
    }));

    assert_eq!(
        router.call_route("/missing/").unwrap(),
        json!({ "status": 404, "path": "/missing/", "method": "GET" })
    );

    router.set_no_match_handler(previous);
    assert!(router.call_route("/missing/").unwrap_err().is_no_route());
}

#[test]
fn test_no_match_handler_can_list_routes() {
    let mut router = Router::new();
    router
        .add_route(
            "/only/",
            Handler::function(|_, _| Ok(json!(1))),
            Method::GET,
        )
        .unwrap();
    router.set_no_match_handler(NoMatchHandler::new(|no_match| {
        Ok(json!(no_match.routes_trace()))
    }));

    assert_eq!(router.call_route("/other/").unwrap(), json!("GET : /only/"));
}

#[test]
fn test_resolve_reports_match_kind() {
    let mut router = Router::new();
    let noop = Handler::function(|_, _| Ok(json!(null)));
    router.add_route("/s/", noop.clone(), Method::GET).unwrap();
    router.add_route("/d/[a:x]/", noop, Method::GET).unwrap();

    let dispatcher = Dispatcher::new(router.table());
    let matched = dispatcher.resolve(&Method::GET, "/s/").unwrap();
    assert_eq!(matched.kind, MatchKind::Static);
    assert!(matched.params.is_empty());

    let matched = dispatcher.resolve(&Method::GET, "/d/q/").unwrap();
    assert_eq!(matched.kind, MatchKind::Dynamic);
    assert_eq!(matched.template(), "/d/[a:x]/");
    assert_eq!(matched.params.get("x").unwrap(), "q");

    assert!(dispatcher.resolve(&Method::HEAD, "/s/").is_none());
}

#[test]
fn test_static_lookup_ignores_dynamic_route_count() {
    let mut router = Router::new();
    let noop = Handler::function(|_, _| Ok(json!("static")));
    for i in 0..500 {
        router
            .add_route(&format!("/bulk{i}/[i:id]/"), noop.clone(), Method::GET)
            .unwrap();
    }
    router.add_route("/health/", noop, Method::GET).unwrap();

    let matched = Dispatcher::new(router.table())
        .resolve(&Method::GET, "/health/")
        .unwrap();
    assert_eq!(matched.kind, MatchKind::Static);
    assert_eq!(router.table().route_count(&Method::GET), 501);
}
