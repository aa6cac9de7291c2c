//! Route stacks: named collections of routes.
//!
//! A route stack answers two questions:
//!
//! - which route matches this path? ([`RouteStack::match_path`])
//! - what is the URL of route *X* with parameters *P*? ([`RouteStack::assemble`])
//!
//! Two stacks are provided:
//!
//! | Stack | Names | Extras |
//! |-------|-------|--------|
//! | [`SimpleRouteStack`] | flat | default parameters |
//! | [`TreeRouteStack`] | `parent/child` | base URL, query, fragment, match cache |
//!
//! Routes are tried in **priority order** (higher value first); among equal
//! priorities the most recently added route is tried first.

use crate::config::{self, RouteConfig};
use crate::error::RouterError;
use crate::params::{encode_fragment, QueryParams, RouteParams};
use crate::priority::PriorityList;
use crate::route::{split_route_name, AssembleContext, Route};
use crate::route_match::RouteMatch;
use crate::{debug_log, trace_log, warn_log};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, MatchCache};
#[cfg(feature = "cache")]
use std::sync::{Mutex, PoisonError};

/// Options for [`RouteStack::assemble`].
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleOptions, QueryParams};
///
/// let options = AssembleOptions::named("blog")
///     .with_query(QueryParams::from_query_string("page=2"))
///     .with_fragment("comments");
/// assert_eq!(options.name(), Some("blog"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    name: Option<String>,
    query: Option<QueryParams>,
    fragment: Option<String>,
}

impl AssembleOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options naming the route to assemble.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Set the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the query string appended by [`TreeRouteStack`].
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the fragment appended by [`TreeRouteStack`].
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Route name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Query parameters, if set.
    pub fn query(&self) -> Option<&QueryParams> {
        self.query.as_ref()
    }

    /// Fragment, if set.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

/// A router: matches paths to named routes and assembles URLs for them.
///
/// This is the seam the [`Url`](crate::Url) helper depends on.
pub trait RouteStack: fmt::Debug + Send + Sync {
    /// Match a request path, naming the matched route.
    fn match_path(&self, path: &str) -> Option<RouteMatch>;

    /// Assemble the URL of the route named in `options`.
    fn assemble(
        &self,
        params: &RouteParams,
        options: &AssembleOptions,
    ) -> Result<String, RouterError>;
}

// ============================================================================
// SimpleRouteStack
// ============================================================================

/// A flat list of named routes.
///
/// Query and fragment options are ignored; use [`TreeRouteStack`] for those.
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleOptions, Literal, RouteParams, RouteStack, Segment, SimpleRouteStack};
///
/// let router = SimpleRouteStack::new()
///     .with_route("home", Literal::new("/"))
///     .with_route("default", Segment::new("/:controller[/:action]").unwrap());
///
/// let params = RouteParams::from([("controller", "ctrl"), ("action", "act")]);
/// let url = router.assemble(&params, &AssembleOptions::named("default")).unwrap();
/// assert_eq!(url, "/ctrl/act");
/// ```
#[derive(Debug, Default)]
pub struct SimpleRouteStack {
    routes: PriorityList<Box<dyn Route>>,
    default_params: RouteParams,
}

impl SimpleRouteStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from a JSON route configuration.
    ///
    /// See [`config`](crate::config) for the format.
    pub fn from_config(value: &serde_json::Value) -> Result<Self, RouterError> {
        let mut stack = Self::new();
        stack.add_routes_from_config(value)?;
        Ok(stack)
    }

    /// Add a route with priority 0 (builder style).
    pub fn with_route(mut self, name: impl Into<String>, route: impl Route + 'static) -> Self {
        self.add_route(name, route);
        self
    }

    /// Add (or replace) a route with priority 0.
    pub fn add_route(&mut self, name: impl Into<String>, route: impl Route + 'static) -> &mut Self {
        self.add_route_with_priority(name, route, 0)
    }

    /// Add (or replace) a route with an explicit priority.
    pub fn add_route_with_priority(
        &mut self,
        name: impl Into<String>,
        route: impl Route + 'static,
        priority: i32,
    ) -> &mut Self {
        self.routes
            .insert(name, Box::new(route) as Box<dyn Route>, priority);
        self
    }

    /// Add every route of a JSON route configuration.
    pub fn add_routes_from_config(
        &mut self,
        value: &serde_json::Value,
    ) -> Result<&mut Self, RouterError> {
        for (name, route_config) in config::parse_routes(value)? {
            self.add_configured_route(name, &route_config)?;
        }
        Ok(self)
    }

    pub(crate) fn add_configured_route(
        &mut self,
        name: String,
        route_config: &RouteConfig,
    ) -> Result<(), RouterError> {
        let route = route_config.build(&name)?;
        self.routes.insert(name, route, route_config.priority);
        Ok(())
    }

    /// Remove a route, returning whether it existed.
    pub fn remove_route(&mut self, name: &str) -> bool {
        self.routes.remove(name).is_some()
    }

    /// Look up a route by name.
    pub fn route(&self, name: &str) -> Option<&dyn Route> {
        self.routes.get(name).map(|route| &**route)
    }

    /// Check whether a route is registered under `name`.
    pub fn has_route(&self, name: &str) -> bool {
        self.routes.get(name).is_some()
    }

    /// Names of all routes in the order they are tried.
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(|(name, _)| name).collect()
    }

    /// Replace the parameters applied to every match and assembly.
    pub fn set_default_params(&mut self, params: impl Into<RouteParams>) -> &mut Self {
        self.default_params = params.into();
        self
    }

    /// Set a single default parameter.
    pub fn set_default_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.default_params.insert(name, value);
        self
    }

    /// Parameters applied to every match and assembly.
    pub fn default_params(&self) -> &RouteParams {
        &self.default_params
    }

    fn finish_match(&self, name: &str, mut route_match: RouteMatch) -> RouteMatch {
        route_match.set_matched_route_name(name);
        for (key, value) in self.default_params.iter() {
            if route_match.param(key).is_none() {
                route_match.set_param(key, value);
            }
        }
        debug_log!(
            "Matched route '{}'",
            route_match.matched_route_name().unwrap_or(name)
        );
        route_match
    }

    fn lookup(&self, name: &str) -> Result<&dyn Route, RouterError> {
        self.route(name).ok_or_else(|| {
            warn_log!("Route '{}' is not registered", name);
            RouterError::RouteNotFound {
                name: name.to_string(),
            }
        })
    }
}

impl RouteStack for SimpleRouteStack {
    fn match_path(&self, path: &str) -> Option<RouteMatch> {
        for (name, route) in self.routes.iter() {
            trace_log!("Trying route '{}' against '{}'", name, path);
            if let Some(route_match) = route.match_at(path, None) {
                return Some(self.finish_match(name, route_match));
            }
        }
        None
    }

    fn assemble(
        &self,
        params: &RouteParams,
        options: &AssembleOptions,
    ) -> Result<String, RouterError> {
        let name = options.name().ok_or(RouterError::MissingName)?;
        let route = self.lookup(name)?;

        let merged = RouteParams::merge(&self.default_params, params);
        let assembled = route.assemble(&merged, &AssembleContext::default())?;

        debug_log!("Assembled route '{}' -> {}", name, assembled.path);
        Ok(assembled.path)
    }
}

// ============================================================================
// TreeRouteStack
// ============================================================================

/// A route stack whose routes may carry child routes.
///
/// Child routes are addressed as `parent/child`. The stack prepends its base
/// URL to every assembled path and strips it before matching.
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleOptions, Part, RouteParams, RouteStack, Segment, TreeRouteStack, Wildcard};
///
/// let mut router = TreeRouteStack::new();
/// router.add_route(
///     "default",
///     Part::new(Segment::new("/:controller/:action").unwrap())
///         .may_terminate(true)
///         .child("wildcard", Wildcard::new()),
/// );
///
/// let params = RouteParams::from([("controller", "blog"), ("action", "list"), ("page", "2")]);
/// let url = router.assemble(&params, &AssembleOptions::named("default/wildcard")).unwrap();
/// assert_eq!(url, "/blog/list/page/2");
///
/// let matched = router.match_path("/blog/list/page/2").unwrap();
/// assert_eq!(matched.matched_route_name(), Some("default/wildcard"));
/// ```
#[derive(Debug, Default)]
pub struct TreeRouteStack {
    stack: SimpleRouteStack,
    base_url: String,
    #[cfg(feature = "cache")]
    cache: Mutex<MatchCache>,
}

impl TreeRouteStack {
    /// Create an empty stack without base URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from a JSON route configuration.
    ///
    /// See [`config`](crate::config) for the format.
    pub fn from_config(value: &serde_json::Value) -> Result<Self, RouterError> {
        let mut stack = Self::new();
        stack.add_routes_from_config(value)?;
        Ok(stack)
    }

    /// Add a route with priority 0 (builder style).
    pub fn with_route(mut self, name: impl Into<String>, route: impl Route + 'static) -> Self {
        self.add_route(name, route);
        self
    }

    /// Add (or replace) a route with priority 0.
    pub fn add_route(&mut self, name: impl Into<String>, route: impl Route + 'static) -> &mut Self {
        self.add_route_with_priority(name, route, 0)
    }

    /// Add (or replace) a route with an explicit priority.
    pub fn add_route_with_priority(
        &mut self,
        name: impl Into<String>,
        route: impl Route + 'static,
        priority: i32,
    ) -> &mut Self {
        self.stack.add_route_with_priority(name, route, priority);
        self.invalidate();
        self
    }

    /// Add every route of a JSON route configuration.
    pub fn add_routes_from_config(
        &mut self,
        value: &serde_json::Value,
    ) -> Result<&mut Self, RouterError> {
        let routes: BTreeMap<String, RouteConfig> = config::parse_routes(value)?;
        for (name, route_config) in routes {
            self.stack.add_configured_route(name, &route_config)?;
        }
        self.invalidate();
        Ok(self)
    }

    /// Remove a route, returning whether it existed.
    pub fn remove_route(&mut self, name: &str) -> bool {
        let removed = self.stack.remove_route(name);
        self.invalidate();
        removed
    }

    /// Look up a top-level route by name.
    pub fn route(&self, name: &str) -> Option<&dyn Route> {
        self.stack.route(name)
    }

    /// Check whether a top-level route is registered under `name`.
    pub fn has_route(&self, name: &str) -> bool {
        self.stack.has_route(name)
    }

    /// Names of all top-level routes in the order they are tried.
    pub fn route_names(&self) -> Vec<&str> {
        self.stack.route_names()
    }

    /// Replace the parameters applied to every match and assembly.
    pub fn set_default_params(&mut self, params: impl Into<RouteParams>) -> &mut Self {
        self.stack.set_default_params(params);
        self.invalidate();
        self
    }

    /// Set a single default parameter.
    pub fn set_default_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.stack.set_default_param(name, value);
        self.invalidate();
        self
    }

    /// Parameters applied to every match and assembly.
    pub fn default_params(&self) -> &RouteParams {
        self.stack.default_params()
    }

    /// Set the prefix of every URL handled by this stack.
    ///
    /// A trailing `/` is removed, so `/app/` and `/app` are equivalent.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self.invalidate();
        self
    }

    /// The base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Match cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
            .clone()
    }

    #[cfg(feature = "cache")]
    fn invalidate(&mut self) {
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[cfg(not(feature = "cache"))]
    fn invalidate(&mut self) {}

    fn match_uncached(&self, path: &str) -> Option<RouteMatch> {
        if !path.starts_with(&self.base_url) {
            trace_log!("Path '{}' is outside base URL '{}'", path, self.base_url);
            return None;
        }
        let offset = self.base_url.len();

        for (name, route) in self.stack.routes.iter() {
            trace_log!("Trying route '{}' against '{}'", name, path);
            if let Some(route_match) = route.match_at(path, Some(offset)) {
                if offset + route_match.length() == path.len() {
                    return Some(self.stack.finish_match(name, route_match));
                }
            }
        }
        None
    }
}

impl RouteStack for TreeRouteStack {
    fn match_path(&self, path: &str) -> Option<RouteMatch> {
        #[cfg(feature = "cache")]
        {
            let cached = self
                .cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(path);
            if let Some(outcome) = cached {
                return outcome;
            }

            // Matching runs unlocked; routes cannot change while `&self` is shared.
            let outcome = self.match_uncached(path);
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(path.to_string(), outcome.clone());
            outcome
        }

        #[cfg(not(feature = "cache"))]
        {
            self.match_uncached(path)
        }
    }

    fn assemble(
        &self,
        params: &RouteParams,
        options: &AssembleOptions,
    ) -> Result<String, RouterError> {
        let name = options.name().ok_or(RouterError::MissingName)?;
        let (head, tail) = split_route_name(name);

        let route = self.stack.lookup(head)?;
        if tail.is_some() && !route.has_children() {
            return Err(RouterError::NoChildRoutes {
                name: head.to_string(),
            });
        }

        let merged = RouteParams::merge(self.stack.default_params(), params);
        let assembled = route.assemble(&merged, &AssembleContext::with_child(tail))?;

        let mut url = format!("{}{}", self.base_url, assembled.path);
        if let Some(query) = options.query().filter(|query| !query.is_empty()) {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        if let Some(fragment) = options.fragment() {
            url.push('#');
            url.push_str(&encode_fragment(fragment));
        }

        debug_log!("Assembled route '{}' -> {}", name, url);
        Ok(url)
    }
}
