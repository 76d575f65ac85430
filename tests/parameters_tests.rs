//! Typed placeholder capture and last-match parameter access.

use http::Method;
use pathmux::{Handler, Router, RouterError, TypeDescriptor};
use serde_json::json;

fn param_router(template: &str, name: &'static str) -> Router {
    let mut router = Router::new();
    router
        .add_route(
            template,
            Handler::function(move |_, params| Ok(json!(params.get(name)?))),
            Method::GET,
        )
        .unwrap();
    router
}

#[test]
fn test_validating_parameter() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    router.call_route("/catalog/1/").unwrap();

    assert!(router.has_param("foo"));
    assert!(!router.has_param("unexisting"));
}

#[test]
fn test_getting_existing_parameter() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    router.call_route("/catalog/1/").unwrap();
    assert_eq!(router.get_param("foo").unwrap(), "1");
}

#[test]
fn test_getting_unexisting_parameter() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    router.call_route("/catalog/1/").unwrap();

    match router.get_param("unexisting") {
        Err(RouterError::ParamNotFound { name }) => assert_eq!(name, "unexisting"),
        other => panic!("expected ParamNotFound, got {other:?}"),
    }
}

#[test]
fn test_integer_values_round_trip() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    for value in ["-1", "+1.1", "1.1", "1", "-1.1", "+1"] {
        let result = router.call_route(&format!("/catalog/{value}/")).unwrap();
        assert_eq!(result, json!(value), "value {value} changed");
        assert_eq!(router.get_param("foo").unwrap(), value);
    }
}

#[test]
fn test_integer_rejects_non_numeric() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    match router.call_route("/catalog/abc/") {
        Err(RouterError::NoRouteMatched { path, .. }) => assert_eq!(path, "/catalog/abc/"),
        other => panic!("expected NoRouteMatched, got {other:?}"),
    }
    assert!(router.call_route("/catalog/1./").is_err());
}

#[test]
fn test_alpha_special_chars() {
    let mut router = param_router("/[a:url]/", "url");
    assert_eq!(router.call_route("/.-@/").unwrap(), json!(".-@"));
    assert!(router.call_route("/a b/").is_err());
}

#[test]
fn test_string_special_chars() {
    let mut router = param_router("/[s:url]/", "url");
    assert_eq!(router.call_route("/, ;:/").unwrap(), json!(", ;:"));
}

#[test]
fn test_string_param_is_html_escaped() {
    let mut router = param_router("/catalog/[s:foo]/", "foo");
    assert_eq!(router.call_route("/catalog/123&456/").unwrap(), json!("123&amp;456"));
    assert_eq!(router.get_param("foo").unwrap(), "123&amp;456");
    assert_eq!(
        router.call_route("/catalog/<b>'x'/").unwrap(),
        json!("&lt;b&gt;&#039;x&#039;")
    );
}

#[test]
fn test_valid_id_list() {
    let mut router = param_router("/catalog/[il:ids]/", "ids");
    assert_eq!(router.call_route("/catalog/123,456,789/").unwrap(), json!("123,456,789"));
}

#[test]
fn test_invalid_id_list() {
    let mut router = param_router("/catalog/[il:cat_id]/", "cat_id");
    let err = router.call_route("/catalog/12345./").unwrap_err();
    assert!(err
        .to_string()
        .contains("The processor was not found for the route /catalog/12345./"));
}

#[test]
fn test_params_are_stale_after_failed_dispatch() {
    let mut router = param_router("/catalog/[i:foo]/", "foo");
    router.call_route("/catalog/5/").unwrap();
    assert!(router.call_route("/catalog/nope/").is_err());

    assert_eq!(router.get_param("foo").unwrap(), "5");
}

#[test]
fn test_params_replaced_entirely_on_match() {
    let mut router = Router::new();
    let noop = Handler::function(|_, _| Ok(json!(null)));
    router
        .add_route("/a/[i:x]/", noop.clone(), Method::GET)
        .unwrap();
    router.add_route("/b/[i:y]/", noop, Method::GET).unwrap();

    router.call_route("/a/1/").unwrap();
    router.call_route("/b/2/").unwrap();
    assert!(!router.has_param("x"));
    assert_eq!(router.get_param("y").unwrap(), "2");
}

#[test]
fn test_handler_receives_all_params_in_order() {
    let mut router = Router::new();
    router
        .add_route(
            "/user/[a:login]/orders/[il:ids]/[s:note]/",
            Handler::function(|_, params| {
                Ok(json!(params.iter().map(|(k, _)| k).collect::<Vec<_>>()))
            }),
            Method::GET,
        )
        .unwrap();

    let result = router.call_route("/user/bob/orders/1,2/hi/").unwrap();
    assert_eq!(result, json!(["login", "ids", "note"]));
    assert_eq!(
        router.params().to_map().get("ids").map(String::as_str),
        Some("1,2")
    );
}

#[test]
fn test_custom_type() {
    let mut router = Router::new();
    router
        .add_type(TypeDescriptor::with_decode("hex", "[0-9a-f]+", |v| {
            u64::from_str_radix(v, 16).map_or_else(|_| v.to_string(), |n| n.to_string())
        }))
        .unwrap();
    router
        .add_route(
            "/color/[hex:value]/",
            Handler::function(|_, params| Ok(json!(params.get("value")?))),
            Method::GET,
        )
        .unwrap();

    assert_eq!(router.call_route("/color/ff/").unwrap(), json!("255"));
    assert!(router.call_route("/color/zz/").is_err());
}

#[test]
fn test_unknown_type_names_template() {
    let mut router = Router::new();
    let err = router
        .add_route(
            "/color/[hex:value]",
            Handler::function(|_, _| Ok(json!(null))),
            Method::GET,
        )
        .unwrap_err();
    match err {
        RouterError::UnknownType { token, template } => {
            assert_eq!(token, "hex");
            assert_eq!(template, "/color/[hex:value]/");
        }
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn test_override_builtin_type_leaves_compiled_routes_alone() {
    let mut router = param_router("/n/[i:n]/", "n");
    router.add_type(TypeDescriptor::new("i", "[0-9]+")).unwrap();
    router
        .add_route(
            "/m/[i:m]/",
            Handler::function(|_, p| Ok(json!(p.get("m")?))),
            Method::GET,
        )
        .unwrap();

    // compiled before the override: still accepts a signed value
    assert_eq!(router.call_route("/n/-1/").unwrap(), json!("-1"));
    // compiled after the override: unsigned digits only
    assert!(router.call_route("/m/-1/").is_err());
    assert_eq!(router.call_route("/m/12/").unwrap(), json!("12"));
}

#[test]
fn test_add_type_rejects_fragment_breaking_out_of_placeholder() {
    let mut router = Router::new();
    let err = router
        .add_type(TypeDescriptor::new("x", "a)|(b"))
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidTypePattern { .. }));

    let err = router
        .add_route(
            "/x/[x:v]/",
            Handler::function(|_, _| Ok(json!(null))),
            Method::GET,
        )
        .unwrap_err();
    assert!(matches!(err, RouterError::UnknownType { .. }));
}

#[test]
fn test_custom_type_alternation_stays_anchored() {
    let mut router = Router::new();
    router.add_type(TypeDescriptor::new("x", "a|b")).unwrap();
    router
        .add_route(
            "/x/[x:v]/",
            Handler::function(|_, p| Ok(json!(p.get("v")?))),
            Method::GET,
        )
        .unwrap();

    assert_eq!(router.call_route("/x/b/").unwrap(), json!("b"));
    assert!(router.call_route("/x/azzz/extra/").unwrap_err().is_no_route());
    assert!(router.call_route("/totally/unrelated/b/").unwrap_err().is_no_route());
}
