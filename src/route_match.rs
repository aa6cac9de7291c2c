//! The result of matching a request path against a route.

use crate::params::RouteParams;

/// Name and parameters of the route that matched an incoming path.
///
/// A `RouteMatch` is produced by [`RouteStack::match_path`](crate::RouteStack::match_path)
/// (or built by hand) and attached to the [`Url`](crate::Url) helper, which
/// only ever reads it.
///
/// # Example
///
/// ```
/// use mvc_router::{RouteMatch, RouteParams};
///
/// let mut route_match = RouteMatch::new(RouteParams::from([("controller", "foo")]));
/// route_match.set_matched_route_name("wildcard");
/// route_match.set_matched_route_name("default");
///
/// assert_eq!(route_match.matched_route_name(), Some("default/wildcard"));
/// assert_eq!(route_match.param("controller"), Some("foo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    params: RouteParams,
    matched_route_name: Option<String>,
    length: usize,
}

impl RouteMatch {
    /// Create a match holding the given parameters and no route name.
    pub fn new(params: impl Into<RouteParams>) -> Self {
        Self {
            params: params.into(),
            matched_route_name: None,
            length: 0,
        }
    }

    /// Set the number of path bytes this match consumed.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Number of path bytes consumed by the match.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Name of the matched route, `parent/child` for nested routes.
    pub fn matched_route_name(&self) -> Option<&str> {
        self.matched_route_name.as_deref()
    }

    /// Record the name of a matched route.
    ///
    /// Matches bubble up from the innermost route, so when a name is already
    /// present the new one is prepended: setting `child` then `parent`
    /// yields `parent/child`.
    pub fn set_matched_route_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.matched_route_name = Some(match self.matched_route_name.take() {
            Some(inner) => format!("{}/{}", name, inner),
            None => name,
        });
    }

    /// All matched parameters.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// A single matched parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Overwrite or add a parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name, value);
    }

    /// Fold a nested match into this one.
    ///
    /// Parameters of `other` win, lengths add up and the route name is taken
    /// from `other`.
    pub fn merge(&mut self, other: RouteMatch) {
        self.params = RouteParams::merge(&self.params, &other.params);
        self.length += other.length;
        self.matched_route_name = other.matched_route_name;
    }
}
