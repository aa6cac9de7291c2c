//! Part routes: a route with named child routes.
//!
//! A [`Part`] wraps one route and any number of children. In a
//! [`TreeRouteStack`](crate::TreeRouteStack) the children are addressed with
//! `/`-separated names: `default/wildcard` is the child `wildcard` of the
//! top-level route `default`.
//!
//! # Matching
//!
//! 1. The wrapped route matches a prefix of the path.
//! 2. If that consumed the whole path and the part may terminate, done.
//! 3. Otherwise each child is tried on the rest of the path; the first one
//!    that consumes everything wins and its parameters are laid over the
//!    parent's.
//!
//! # Assembly
//!
//! The wrapped route is assembled first. The parameters it consumed are
//! removed and the rest are handed to the child named next in the route
//! name. Without a child name the part must be allowed to terminate.
//!
//! ```
//! use mvc_router::{AssembleContext, Part, Route, RouteParams, Segment, Wildcard};
//!
//! let route = Part::new(Segment::new("/:controller/:action").unwrap())
//!     .may_terminate(true)
//!     .child("wildcard", Wildcard::new());
//!
//! let params = RouteParams::from([("controller", "blog"), ("action", "list"), ("page", "2")]);
//! let assembled = route.assemble(&params, &AssembleContext::with_child(Some("wildcard"))).unwrap();
//! assert_eq!(assembled.path, "/blog/list/page/2");
//! ```

use crate::error::RouterError;
use crate::params::RouteParams;
use crate::priority::PriorityList;
use crate::route::{split_route_name, AssembleContext, Assembled, Route};
use crate::route_match::RouteMatch;
use crate::trace_log;

/// A route followed by optional named child routes.
#[derive(Debug)]
pub struct Part {
    route: Box<dyn Route>,
    may_terminate: bool,
    children: PriorityList<Box<dyn Route>>,
}

impl Part {
    /// Wrap a route. The part may not terminate until told otherwise.
    pub fn new(route: impl Route + 'static) -> Self {
        Self {
            route: Box::new(route),
            may_terminate: false,
            children: PriorityList::default(),
        }
    }

    /// Wrap an already boxed route.
    pub(crate) fn from_boxed(route: Box<dyn Route>) -> Self {
        Self {
            route,
            may_terminate: false,
            children: PriorityList::default(),
        }
    }

    /// Whether the wrapped route alone is a complete match.
    pub fn may_terminate(mut self, may_terminate: bool) -> Self {
        self.may_terminate = may_terminate;
        self
    }

    /// Add a child route with priority 0.
    pub fn child(mut self, name: impl Into<String>, route: impl Route + 'static) -> Self {
        self.add_child(name, route, 0);
        self
    }

    /// Add a child route with an explicit priority.
    pub fn child_with_priority(
        mut self,
        name: impl Into<String>,
        route: impl Route + 'static,
        priority: i32,
    ) -> Self {
        self.add_child(name, route, priority);
        self
    }

    /// Add (or replace) a child route in place.
    pub fn add_child(&mut self, name: impl Into<String>, route: impl Route + 'static, priority: i32) {
        self.children.insert(name, Box::new(route) as Box<dyn Route>, priority);
    }

    /// Add an already boxed child route.
    pub(crate) fn add_boxed_child(&mut self, name: String, route: Box<dyn Route>, priority: i32) {
        self.children.insert(name, route, priority);
    }

    /// Look up a direct child by name.
    pub fn get_child(&self, name: &str) -> Option<&dyn Route> {
        self.children.get(name).map(|route| &**route)
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Route for Part {
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch> {
        let start = offset.unwrap_or(0);
        let mut route_match = self.route.match_at(path, Some(start))?;
        let next = start + route_match.length();

        if self.may_terminate && next == path.len() {
            return Some(route_match);
        }

        for (name, child) in self.children.iter() {
            trace_log!("Trying child route '{}' at offset {}", name, next);
            if let Some(child_match) = child.match_at(path, Some(next)) {
                if next + child_match.length() == path.len() {
                    route_match.merge(child_match);
                    route_match.set_matched_route_name(name);
                    return Some(route_match);
                }
            }
        }

        None
    }

    fn assemble(
        &self,
        params: &RouteParams,
        context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError> {
        let parent = self.route.assemble(params, context)?;

        let Some(child_name) = context.child_name else {
            if !self.may_terminate {
                return Err(RouterError::NotTerminal);
            }
            return Ok(parent);
        };

        let (head, tail) = split_route_name(child_name);
        let child = self
            .children
            .get(head)
            .ok_or_else(|| RouterError::RouteNotFound {
                name: head.to_string(),
            })?;
        if tail.is_some() && !child.has_children() {
            return Err(RouterError::NoChildRoutes {
                name: head.to_string(),
            });
        }

        let remaining = params.without(&parent.assembled_params);
        let assembled_child = child.assemble(&remaining, &AssembleContext::with_child(tail))?;

        let mut assembled_params = parent.assembled_params;
        assembled_params.extend(assembled_child.assembled_params);

        Ok(Assembled {
            path: parent.path + &assembled_child.path,
            assembled_params,
        })
    }

    fn has_children(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Segment;
    use crate::route::{Literal, Wildcard};

    fn blog_part() -> Part {
        Part::new(Literal::new("/blog").defaults(RouteParams::from([("controller", "blog")])))
            .may_terminate(true)
            .child(
                "post",
                Segment::new("/:slug")
                    .unwrap()
                    .defaults(RouteParams::from([("action", "show")])),
            )
            .child("rss", Literal::new("/rss").defaults(RouteParams::from([("action", "feed")])))
    }

    #[test]
    fn test_match_terminates_on_parent() {
        let part = blog_part();
        let matched = part.match_at("/blog", None).unwrap();

        assert_eq!(matched.param("controller"), Some("blog"));
        assert_eq!(matched.matched_route_name(), None);
    }

    #[test]
    fn test_match_child_merges_params_and_names() {
        let part = blog_part();

        let matched = part.match_at("/blog/rss", None).unwrap();
        assert_eq!(matched.param("action"), Some("feed"));
        assert_eq!(matched.param("controller"), Some("blog"));
        assert_eq!(matched.matched_route_name(), Some("rss"));

        let matched = part.match_at("/blog/hello-world", None).unwrap();
        assert_eq!(matched.param("slug"), Some("hello-world"));
        assert_eq!(matched.matched_route_name(), Some("post"));
        assert_eq!(matched.length(), 17);
    }

    #[test]
    fn test_match_requires_full_consumption() {
        let part = blog_part();
        assert!(part.match_at("/blog/a/b", None).is_none());
        assert!(part.match_at("/news", None).is_none());
    }

    #[test]
    fn test_match_without_termination() {
        let part = Part::new(Literal::new("/blog")).child("rss", Literal::new("/rss"));
        assert!(part.match_at("/blog", None).is_none());
        assert!(part.match_at("/blog/rss", None).is_some());
    }

    #[test]
    fn test_assemble_child_gets_remaining_params() {
        let part = Part::new(Segment::new("/:controller/:action").unwrap())
            .may_terminate(true)
            .child("wildcard", Wildcard::new().param_delimiter("=").key_value_delimiter("%"));

        let params = RouteParams::from([
            ("controller", "Rainbow"),
            ("action", "Dash"),
            ("Twenty", "Cooler"),
        ]);
        let assembled = part
            .assemble(&params, &AssembleContext::with_child(Some("wildcard")))
            .unwrap();

        assert_eq!(assembled.path, "/Rainbow/Dash=Twenty%Cooler");
        assert_eq!(
            assembled.assembled_params,
            vec!["controller", "action", "Twenty"]
        );
    }

    #[test]
    fn test_assemble_not_terminal() {
        let part = Part::new(Literal::new("/blog")).child("rss", Literal::new("/rss"));
        let err = part
            .assemble(&RouteParams::new(), &AssembleContext::default())
            .unwrap_err();
        assert_eq!(err, RouterError::NotTerminal);
    }

    #[test]
    fn test_assemble_unknown_child() {
        let part = blog_part();
        let err = part
            .assemble(&RouteParams::new(), &AssembleContext::with_child(Some("atom")))
            .unwrap_err();
        assert_eq!(
            err,
            RouterError::RouteNotFound {
                name: "atom".to_string()
            }
        );
    }

    #[test]
    fn test_assemble_grandchild_of_leaf() {
        let part = blog_part();
        let err = part
            .assemble(&RouteParams::new(), &AssembleContext::with_child(Some("rss/latest")))
            .unwrap_err();
        assert!(matches!(err, RouterError::NoChildRoutes { .. }));
    }
}
