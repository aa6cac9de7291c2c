//! The [`Route`] trait and the literal and wildcard route types.
//!
//! A route does two things:
//!
//! - **match**: bind parameters from (a part of) a request path, producing
//!   a [`RouteMatch`];
//! - **assemble**: the reverse, building the path fragment for a set of
//!   parameters, reporting which parameters it consumed so a parent route
//!   can pass the rest to its child.
//!
//! | Route | Matches | Assembles |
//! |-------|---------|-----------|
//! | [`Literal`] | an exact string | the string |
//! | [`Segment`](crate::Segment) | a pattern like `/:controller[/:action]` | the pattern filled with params |
//! | [`Wildcard`] | the rest of the path as key/value pairs | every param as a key/value pair |
//! | [`Part`](crate::Part) | a route followed by one of its children | route path + child path |

use crate::error::RouterError;
use crate::params::{decode_uri_component, encode_uri_component, RouteParams};
use crate::route_match::RouteMatch;
use std::fmt;

/// Per-call context for [`Route::assemble`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleContext<'a> {
    /// Remaining route name below the route being assembled, e.g.
    /// `wildcard` when assembling `default/wildcard` on `default`.
    pub child_name: Option<&'a str>,
}

impl<'a> AssembleContext<'a> {
    /// Context for assembling a route that has a child below it.
    pub fn with_child(child_name: Option<&'a str>) -> Self {
        Self { child_name }
    }

    /// Whether a child route will be appended after this one.
    pub fn has_child(&self) -> bool {
        self.child_name.is_some()
    }
}

/// Output of [`Route::assemble`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembled {
    /// The assembled path fragment.
    pub path: String,
    /// Names of the parameters the route used.
    pub assembled_params: Vec<String>,
}

impl Assembled {
    /// A path fragment that consumed no parameters.
    pub fn path_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            assembled_params: Vec::new(),
        }
    }
}

/// A single route: matches request paths and assembles URLs.
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleContext, Literal, Route, RouteParams};
///
/// let route = Literal::new("/about");
///
/// assert!(route.match_at("/about", None).is_some());
/// let assembled = route.assemble(&RouteParams::new(), &AssembleContext::default()).unwrap();
/// assert_eq!(assembled.path, "/about");
/// ```
pub trait Route: fmt::Debug + Send + Sync {
    /// Match `path`.
    ///
    /// With `offset == None` the whole path must match. With `Some(offset)`
    /// the route matches a prefix of `path[offset..]` and reports the number
    /// of bytes consumed via [`RouteMatch::length`].
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch>;

    /// Assemble the path fragment for `params`.
    fn assemble(
        &self,
        params: &RouteParams,
        context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError>;

    /// Whether child routes can be addressed below this route.
    fn has_children(&self) -> bool {
        false
    }
}

impl<R: Route + ?Sized> Route for Box<R> {
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch> {
        (**self).match_at(path, offset)
    }

    fn assemble(
        &self,
        params: &RouteParams,
        context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError> {
        (**self).assemble(params, context)
    }

    fn has_children(&self) -> bool {
        (**self).has_children()
    }
}

/// Split `parent/child/grandchild` into `("parent", Some("child/grandchild"))`.
pub(crate) fn split_route_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (name, None),
    }
}

/// The slice of `path` a route should look at, or `None` if `offset` is
/// past the end or not on a character boundary.
pub(crate) fn subject(path: &str, offset: Option<usize>) -> Option<&str> {
    match offset {
        Some(offset) => path.get(offset..),
        None => Some(path),
    }
}

// ============================================================================
// Literal
// ============================================================================

/// A route matching one fixed path, such as `/` or `/about`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    route: String,
    defaults: RouteParams,
}

impl Literal {
    /// Create a literal route.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            defaults: RouteParams::new(),
        }
    }

    /// Parameters returned with every match.
    pub fn defaults(mut self, defaults: impl Into<RouteParams>) -> Self {
        self.defaults = defaults.into();
        self
    }

    /// The literal path.
    pub fn route(&self) -> &str {
        &self.route
    }
}

impl Route for Literal {
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch> {
        let subject = subject(path, offset)?;
        let matched = match offset {
            Some(_) => subject.starts_with(&self.route),
            None => subject == self.route,
        };

        matched.then(|| RouteMatch::new(self.defaults.clone()).with_length(self.route.len()))
    }

    fn assemble(
        &self,
        _params: &RouteParams,
        _context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError> {
        Ok(Assembled::path_only(self.route.clone()))
    }
}

// ============================================================================
// Wildcard
// ============================================================================

/// A route turning the remainder of the path into key/value parameters.
///
/// With the default delimiters (`/` and `/`) the path `/page/2/sort/name`
/// yields `{page: 2, sort: name}`. With `param_delimiter("=")` and
/// `key_value_delimiter("%")` the same parameters read `=page%2=sort%name`.
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleContext, Route, RouteParams, Wildcard};
///
/// let route = Wildcard::new().param_delimiter("=").key_value_delimiter("%");
/// let assembled = route
///     .assemble(&RouteParams::from([("Twenty", "Cooler")]), &AssembleContext::default())
///     .unwrap();
/// assert_eq!(assembled.path, "=Twenty%Cooler");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    param_delimiter: String,
    key_value_delimiter: String,
    defaults: RouteParams,
}

impl Default for Wildcard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wildcard {
    /// Create a wildcard route with `/` as both delimiters.
    pub fn new() -> Self {
        Self {
            param_delimiter: "/".to_string(),
            key_value_delimiter: "/".to_string(),
            defaults: RouteParams::new(),
        }
    }

    /// Delimiter placed before each key/value pair. Empty falls back to `/`.
    pub fn param_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.param_delimiter = non_empty_or_slash(delimiter.into());
        self
    }

    /// Delimiter between a key and its value. Empty falls back to `/`.
    pub fn key_value_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.key_value_delimiter = non_empty_or_slash(delimiter.into());
        self
    }

    /// Parameters merged under matched and assembled parameters.
    pub fn defaults(mut self, defaults: impl Into<RouteParams>) -> Self {
        self.defaults = defaults.into();
        self
    }
}

fn non_empty_or_slash(delimiter: String) -> String {
    if delimiter.is_empty() {
        "/".to_string()
    } else {
        delimiter
    }
}

impl Route for Wildcard {
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch> {
        let subject = subject(path, offset)?;
        let pieces: Vec<&str> = subject.split(self.param_delimiter.as_str()).collect();

        // Anything left must start with the delimiter and not end with it.
        if pieces.len() > 1 && (!pieces[0].is_empty() || pieces.last() == Some(&"")) {
            return None;
        }
        if pieces.len() == 1 && !subject.is_empty() {
            return None;
        }

        let mut matches = RouteParams::new();
        if self.key_value_delimiter == self.param_delimiter {
            for pair in pieces[1..].chunks_exact(2) {
                matches.insert(decode_uri_component(pair[0]), decode_uri_component(pair[1]));
            }
        } else {
            for piece in &pieces[1..] {
                if let Some((key, value)) = piece.split_once(self.key_value_delimiter.as_str()) {
                    matches.insert(decode_uri_component(key), decode_uri_component(value));
                }
            }
        }

        Some(RouteMatch::new(RouteParams::merge(&self.defaults, &matches)).with_length(subject.len()))
    }

    fn assemble(
        &self,
        params: &RouteParams,
        _context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError> {
        let merged = RouteParams::merge(&self.defaults, params);
        if merged.is_empty() {
            return Ok(Assembled::default());
        }

        let pairs: Vec<String> = merged
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}{}{}",
                    encode_uri_component(key),
                    self.key_value_delimiter,
                    encode_uri_component(value)
                )
            })
            .collect();

        Ok(Assembled {
            path: format!(
                "{}{}",
                self.param_delimiter,
                pairs.join(&self.param_delimiter)
            ),
            assembled_params: merged.keys().map(String::from).collect(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(route: &dyn Route, params: RouteParams) -> Assembled {
        route
            .assemble(&params, &AssembleContext::default())
            .unwrap()
    }

    #[test]
    fn test_split_route_name() {
        assert_eq!(split_route_name("home"), ("home", None));
        assert_eq!(
            split_route_name("default/wildcard"),
            ("default", Some("wildcard"))
        );
        assert_eq!(split_route_name("a/b/c"), ("a", Some("b/c")));
    }

    #[test]
    fn test_literal_full_match() {
        let route = Literal::new("/").defaults(RouteParams::from([("controller", "index")]));

        let matched = route.match_at("/", None).unwrap();
        assert_eq!(matched.param("controller"), Some("index"));
        assert_eq!(matched.length(), 1);

        assert!(route.match_at("/foo", None).is_none());
    }

    #[test]
    fn test_literal_prefix_match_at_offset() {
        let route = Literal::new("/blog");

        let matched = route.match_at("/app/blog/rss", Some(4)).unwrap();
        assert_eq!(matched.length(), 5);
        assert!(route.match_at("/app/news", Some(4)).is_none());
        assert!(route.match_at("/app", Some(40)).is_none());
    }

    #[test]
    fn test_literal_assemble_ignores_params() {
        let assembled = assemble(&Literal::new("/"), RouteParams::from([("id", "1")]));
        assert_eq!(assembled.path, "/");
        assert!(assembled.assembled_params.is_empty());
    }

    #[test]
    fn test_wildcard_default_delimiters_match() {
        let route = Wildcard::new();
        let matched = route.match_at("/page/2/sort/name", None).unwrap();

        assert_eq!(matched.param("page"), Some("2"));
        assert_eq!(matched.param("sort"), Some("name"));
        assert_eq!(matched.length(), 17);
    }

    #[test]
    fn test_wildcard_custom_delimiters_match_at_offset() {
        let route = Wildcard::new().param_delimiter("=").key_value_delimiter("%");
        let path = "/Rainbow/Dash=Twenty%Cooler=Page%2";

        let matched = route.match_at(path, Some(13)).unwrap();
        assert_eq!(matched.param("Twenty"), Some("Cooler"));
        assert_eq!(matched.param("Page"), Some("2"));
        assert_eq!(matched.length(), path.len() - 13);
    }

    #[test]
    fn test_wildcard_empty_remainder_matches_defaults() {
        let route = Wildcard::new().defaults(RouteParams::from([("page", "1")]));
        let matched = route.match_at("/blog", Some(5)).unwrap();

        assert_eq!(matched.param("page"), Some("1"));
        assert_eq!(matched.length(), 0);
    }

    #[test]
    fn test_wildcard_rejects_malformed_remainder() {
        let route = Wildcard::new();
        assert!(route.match_at("page/2", None).is_none());
        assert!(route.match_at("/page/2/", None).is_none());
    }

    #[test]
    fn test_wildcard_assemble() {
        let route = Wildcard::new();
        let assembled = assemble(&route, RouteParams::from([("page", "2"), ("q", "a b")]));

        assert_eq!(assembled.path, "/page/2/q/a%20b");
        assert_eq!(assembled.assembled_params, vec!["page", "q"]);
    }

    #[test]
    fn test_wildcard_assemble_empty() {
        let assembled = assemble(&Wildcard::new(), RouteParams::new());
        assert_eq!(assembled.path, "");
    }
}
