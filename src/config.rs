//! Route definitions loaded from JSON.
//!
//! A configuration is an object mapping route names to route definitions:
//!
//! ```json
//! {
//!   "home": { "type": "literal", "options": { "route": "/" } },
//!   "default": {
//!     "type": "segment",
//!     "options": {
//!       "route": "/:controller[/:action]",
//!       "defaults": { "controller": "index" },
//!       "constraints": { "controller": "[a-zA-Z][a-zA-Z0-9_-]*" }
//!     },
//!     "priority": 10,
//!     "may_terminate": true,
//!     "child_routes": {
//!       "wildcard": { "type": "wildcard" }
//!     }
//!   }
//! }
//! ```
//!
//! A definition with `child_routes` becomes a [`Part`]. Such a part may only
//! terminate on its own route when `may_terminate` is `true`.
//!
//! Definitions are applied in name order; use `priority` where the order of
//! matching matters.

use crate::error::RouterError;
use crate::matching::Segment;
use crate::nested::Part;
use crate::params::RouteParams;
use crate::route::{Literal, Route, Wildcard};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Kind of route a definition builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// [`Literal`]
    Literal,
    /// [`Segment`]
    Segment,
    /// [`Wildcard`]
    Wildcard,
}

/// Options of a single route definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteOptions {
    /// Literal path or segment pattern.
    pub route: Option<String>,
    /// Default parameters; scalar values are converted to strings.
    pub defaults: serde_json::Value,
    /// Per-parameter regexes for segment routes.
    pub constraints: BTreeMap<String, String>,
    /// Wildcard delimiter before each pair.
    pub param_delimiter: Option<String>,
    /// Wildcard delimiter between key and value.
    pub key_value_delimiter: Option<String>,
}

/// A single route definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Route kind.
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// Kind-specific options.
    #[serde(default)]
    pub options: RouteOptions,
    /// Matching priority, higher first.
    #[serde(default)]
    pub priority: i32,
    /// Whether a part route may match without a child.
    #[serde(default)]
    pub may_terminate: bool,
    /// Named child routes.
    #[serde(default)]
    pub child_routes: BTreeMap<String, RouteConfig>,
}

impl RouteConfig {
    /// Build the route described by this definition.
    pub fn build(&self, name: &str) -> Result<Box<dyn Route>, RouterError> {
        let route = self.build_own(name)?;
        if self.child_routes.is_empty() {
            return Ok(route);
        }

        let mut part = Part::from_boxed(route).may_terminate(self.may_terminate);
        for (child_name, child) in &self.child_routes {
            let child_route = child.build(&format!("{}/{}", name, child_name))?;
            part.add_boxed_child(child_name.clone(), child_route, child.priority);
        }
        Ok(Box::new(part))
    }

    fn build_own(&self, name: &str) -> Result<Box<dyn Route>, RouterError> {
        let defaults = RouteParams::try_from(&self.options.defaults).map_err(|err| {
            RouterError::invalid_config(format!("defaults of route \"{}\": {}", name, err))
        })?;

        let route: Box<dyn Route> = match self.kind {
            RouteKind::Literal => {
                Box::new(Literal::new(self.required_route(name)?).defaults(defaults))
            }
            RouteKind::Segment => {
                let constraints: RouteParams = self.options.constraints.clone().into();
                Box::new(
                    Segment::with_constraints(self.required_route(name)?, constraints)?
                        .defaults(defaults),
                )
            }
            RouteKind::Wildcard => {
                let mut wildcard = Wildcard::new().defaults(defaults);
                if let Some(delimiter) = &self.options.param_delimiter {
                    wildcard = wildcard.param_delimiter(delimiter.as_str());
                }
                if let Some(delimiter) = &self.options.key_value_delimiter {
                    wildcard = wildcard.key_value_delimiter(delimiter.as_str());
                }
                Box::new(wildcard)
            }
        };
        Ok(route)
    }

    fn required_route(&self, name: &str) -> Result<&str, RouterError> {
        self.options.route.as_deref().ok_or_else(|| {
            RouterError::invalid_config(format!("route \"{}\" is missing the \"route\" option", name))
        })
    }
}

/// Parse a route configuration object.
pub fn parse_routes(value: &serde_json::Value) -> Result<BTreeMap<String, RouteConfig>, RouterError> {
    if !value.is_object() {
        return Err(RouterError::invalid_config(
            "route configuration must be an object",
        ));
    }
    Ok(BTreeMap::<String, RouteConfig>::deserialize(value)?)
}
