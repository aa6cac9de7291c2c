//! Shared fixtures for the integration tests.
//!
//! Provides the standard router used by the URL helper tests plus a few
//! assertion helpers.

#![allow(dead_code)]

use mvc_router::module_listener::MODULE_NAMESPACE;
use mvc_router::*;
use std::sync::Arc;

/// Route logs to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `home` (`/`) and `default` (`/:controller[/:action]`).
pub fn simple_router() -> SimpleRouteStack {
    SimpleRouteStack::new()
        .with_route("home", Literal::new("/"))
        .with_route(
            "default",
            Segment::new("/:controller[/:action]").expect("valid pattern"),
        )
}

/// [`simple_router`] plus `replace` (`/:controller/:action`) with a default
/// controller.
pub fn router_with_replace() -> SimpleRouteStack {
    let mut router = simple_router();
    router.add_route(
        "replace",
        Segment::new("/:controller/:action")
            .expect("valid pattern")
            .defaults([(
                "controller",
                "ZendTest\\Mvc\\Controller\\TestAsset\\SampleController",
            )]),
    );
    router
}

/// Tree router with a namespaced `default` route and a `wildcard` child
/// using `=` and `%` as delimiters.
pub fn namespaced_tree_router() -> TreeRouteStack {
    TreeRouteStack::new().with_route(
        "default",
        Part::new(
            Segment::new("/:controller/:action")
                .expect("valid pattern")
                .defaults([
                    (MODULE_NAMESPACE, "ZendTest\\Mvc\\Controller\\TestAsset"),
                    ("controller", "SampleController"),
                    ("action", "Dash"),
                ]),
        )
        .child(
            "wildcard",
            Wildcard::new().param_delimiter("=").key_value_delimiter("%"),
        ),
    )
}

/// Helper wired to `router`.
pub fn url_helper(router: impl RouteStack + 'static) -> Url {
    Url::new().with_router(Arc::new(router))
}

/// A route match named `name` carrying `params`.
pub fn named_match(name: &str, params: &[(&str, &str)]) -> RouteMatch {
    let mut route_match = RouteMatch::new(params.iter().copied().collect::<RouteParams>());
    route_match.set_matched_route_name(name);
    route_match
}

/// Assert that a route match carries `key = expected`.
pub fn assert_param_equals(route_match: &RouteMatch, key: &str, expected: &str) {
    let value = route_match.param(key);
    assert!(value.is_some(), "Parameter '{}' not found in RouteMatch", key);
    assert_eq!(value.unwrap(), expected, "Parameter '{}' has wrong value", key);
}
