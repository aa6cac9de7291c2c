//! # mvc-router
//!
//! Named-route URL generation for MVC-style applications.
//!
//! Routes are registered under names in a route stack. A stack matches
//! incoming paths back to named routes and assembles paths from a route name
//! and parameters. The [`Url`] helper sits on top of a stack and can reuse
//! the parameters of the route matched for the current request.
//!
//! ## Features
//!
//! - **Route types**: [`Literal`], [`Segment`] (`/:controller[/:action]`),
//!   [`Wildcard`] (`/key/value/...`) and [`Part`] for child routes.
//! - **Stacks**: flat [`SimpleRouteStack`] and [`TreeRouteStack`] with
//!   `parent/child` names, base URL, query and fragment.
//! - **Priorities**: higher priority first, later registration first among
//!   equals.
//! - **Module namespacing**: [`module_listener::on_route`] qualifies matched
//!   controllers; the helper undoes it when reusing parameters.
//! - **JSON configuration**: [`TreeRouteStack::from_config`], see [`config`].
//! - **Match cache**: LRU cache of match outcomes (feature `cache`).
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use mvc_router::{AssembleOptions, Literal, RouteStack, Segment, SimpleRouteStack, Url};
//!
//! let router = SimpleRouteStack::new()
//!     .with_route("home", Literal::new("/"))
//!     .with_route("default", Segment::new("/:controller[/:action]").unwrap());
//! let router = Arc::new(router);
//!
//! let url = Url::new().with_router(router.clone());
//! assert_eq!(url.route("home").unwrap(), "/");
//! assert_eq!(
//!     url.generate(Some("default"), [("controller", "ctrl"), ("action", "act")], AssembleOptions::new(), false)
//!         .unwrap(),
//!     "/ctrl/act"
//! );
//!
//! let matched = router.match_path("/ctrl/act").unwrap();
//! assert_eq!(matched.matched_route_name(), Some("default"));
//! ```
//!
//! ## Cargo features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | log through the `log` crate |
//! | `tracing` | no | log through the `tracing` crate |
//! | `cache` | yes | LRU match cache in [`TreeRouteStack`] |

pub mod logging;

#[cfg(feature = "cache")]
pub mod cache;
pub mod config;
pub mod error;
pub mod helper;
pub mod matching;
pub mod module_listener;
pub mod nested;
pub mod params;
mod priority;
pub mod route;
pub mod route_match;
pub mod stack;

pub use error::RouterError;
pub use helper::Url;
pub use matching::Segment;
pub use nested::Part;
pub use params::{
    decode_uri_component, encode_fragment, encode_path_segment, encode_uri_component,
    QueryParams, RouteParams,
};
pub use route::{AssembleContext, Assembled, Literal, Route, Wildcard};
pub use route_match::RouteMatch;
pub use stack::{AssembleOptions, RouteStack, SimpleRouteStack, TreeRouteStack};

#[cfg(feature = "cache")]
pub use cache::CacheStats;
