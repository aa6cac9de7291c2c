//! Routers built from JSON configuration.

mod common;

use common::*;
use mvc_router::module_listener::on_route;
use mvc_router::*;
use serde_json::json;

fn url_helper_config() -> serde_json::Value {
    json!({
        "home": {
            "type": "literal",
            "options": { "route": "/" }
        },
        "default": {
            "type": "segment",
            "options": { "route": "/:controller[/:action]" }
        }
    })
}

#[test]
fn test_config_matches_builder_router() {
    init_logging();
    let configured = SimpleRouteStack::from_config(&url_helper_config()).unwrap();
    let built = simple_router();

    let params = RouteParams::from([("controller", "ctrl"), ("action", "act")]);
    for name in ["home", "default"] {
        let options = AssembleOptions::named(name);
        assert_eq!(
            configured.assemble(&params, &options).unwrap(),
            built.assemble(&params, &options).unwrap()
        );
    }

    for path in ["/", "/ctrl", "/ctrl/act"] {
        assert_eq!(configured.match_path(path), built.match_path(path));
    }
}

#[test]
fn test_config_namespaced_wildcard_child() {
    let router = TreeRouteStack::from_config(&json!({
        "default": {
            "type": "segment",
            "options": {
                "route": "/:controller/:action",
                "defaults": {
                    "__NAMESPACE__": "ZendTest\\Mvc\\Controller\\TestAsset",
                    "controller": "SampleController",
                    "action": "Dash"
                }
            },
            "child_routes": {
                "wildcard": {
                    "type": "wildcard",
                    "options": {
                        "param_delimiter": "=",
                        "key_value_delimiter": "%"
                    }
                }
            }
        }
    }))
    .unwrap();

    let mut route_match = named_match(
        "default/wildcard",
        &[
            ("__NAMESPACE__", "ZendTest\\Mvc\\Controller\\TestAsset"),
            ("controller", "Rainbow"),
        ],
    );
    on_route(&mut route_match);

    let url = url_helper(router).with_route_match(route_match);
    let generated = url
        .generate_from_value(
            Some("default/wildcard"),
            &json!({ "Twenty": "Cooler" }),
            AssembleOptions::new(),
            true,
        )
        .unwrap();
    assert_eq!(generated, "/Rainbow/Dash=Twenty%Cooler");
}

#[test]
fn test_config_priority() {
    let router = TreeRouteStack::from_config(&json!({
        "about": { "type": "literal", "options": { "route": "/about" } },
        "page": { "type": "segment", "options": { "route": "/:page" }, "priority": 10 }
    }))
    .unwrap();

    assert_eq!(router.route_names(), vec!["page", "about"]);
    assert_eq!(
        router.match_path("/about").unwrap().matched_route_name(),
        Some("page")
    );
}

#[test]
fn test_config_may_terminate() {
    let config = |may_terminate: bool| {
        json!({
            "blog": {
                "type": "literal",
                "options": { "route": "/blog" },
                "may_terminate": may_terminate,
                "child_routes": {
                    "rss": { "type": "literal", "options": { "route": "/rss" } }
                }
            }
        })
    };

    let terminating = TreeRouteStack::from_config(&config(true)).unwrap();
    assert!(terminating.match_path("/blog").is_some());
    assert_eq!(
        terminating
            .match_path("/blog/rss")
            .unwrap()
            .matched_route_name(),
        Some("blog/rss")
    );

    let open = TreeRouteStack::from_config(&config(false)).unwrap();
    assert!(open.match_path("/blog").is_none());
    assert_eq!(
        open.assemble(&RouteParams::new(), &AssembleOptions::named("blog"))
            .unwrap_err(),
        RouterError::NotTerminal
    );
}

#[test]
fn test_add_routes_from_config_extends_router() {
    let mut router = TreeRouteStack::new().with_route("home", Literal::new("/"));
    router
        .add_routes_from_config(&json!({
            "contact": { "type": "literal", "options": { "route": "/contact" } }
        }))
        .unwrap();

    assert!(router.has_route("home"));
    assert!(router.has_route("contact"));
    assert_eq!(router.route("contact").map(|r| r.has_children()), Some(false));
}

#[test]
fn test_invalid_configurations() {
    let cases = [
        json!("routes"),
        json!({ "home": { "options": { "route": "/" } } }),
        json!({ "home": { "type": "literal", "options": { "path": "/" } } }),
        json!({ "home": { "type": "literal" } }),
        json!({ "home": { "type": "literal", "options": { "route": "/", "defaults": [1] } } }),
    ];

    for config in cases {
        let err = TreeRouteStack::from_config(&config).unwrap_err();
        assert!(
            matches!(err, RouterError::InvalidConfig { .. }),
            "unexpected error for {}: {:?}",
            config,
            err
        );
        assert!(err.is_invalid_argument());
    }
}
