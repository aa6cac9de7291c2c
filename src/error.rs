//! Error handling for route stacks, routes and the URL helper.
//!
//! Every fallible operation in the crate returns [`RouterError`]. Variants
//! fall into two classes, mirrored by [`RouterError::is_runtime`] and
//! [`RouterError::is_invalid_argument`]:
//!
//! - **runtime**: the helper or router is missing state it needs (no router,
//!   no route match, unknown route name, ...).
//! - **invalid argument**: the caller handed over something malformed
//!   (parameters of the wrong shape, a missing required parameter, a broken
//!   route pattern or configuration).
//!
//! # Examples
//!
//! ```
//! use mvc_router::RouterError;
//!
//! let err = RouterError::RouteNotFound { name: "blog".into() };
//! assert!(err.is_runtime());
//! assert_eq!(err.to_string(), "Route with name \"blog\" not found");
//! ```

use std::fmt;

/// Detailed error variants raised while matching or assembling routes.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The URL helper was invoked before a router was attached
    MissingRouter,

    /// No route name was given and no route match is attached
    MissingRouteMatch,

    /// The attached route match does not name the route it matched
    NoMatchedRouteName,

    /// No route is registered under the requested name
    RouteNotFound { name: String },

    /// A child route was requested from a route without children
    NoChildRoutes { name: String },

    /// A part route without `may_terminate` was assembled without a child
    NotTerminal,

    /// Parameters were not a map or a sequence of key/value pairs
    InvalidParams { message: String },

    /// Assembly was requested without a route name
    MissingName,

    /// A required route parameter has no value
    MissingParameter { name: String },

    /// A segment pattern or one of its constraints could not be compiled
    InvalidPattern { pattern: String, message: String },

    /// A declarative route configuration could not be turned into routes
    InvalidConfig { message: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MissingRouter => write!(f, "No RouteStack instance provided"),
            RouterError::MissingRouteMatch => write!(f, "No RouteMatch instance provided"),
            RouterError::NoMatchedRouteName => {
                write!(f, "RouteMatch does not contain a matched route name")
            }
            RouterError::RouteNotFound { name } => {
                write!(f, "Route with name \"{}\" not found", name)
            }
            RouterError::NoChildRoutes { name } => {
                write!(f, "Route with name \"{}\" does not have child routes", name)
            }
            RouterError::NotTerminal => write!(f, "Part route may not terminate"),
            RouterError::InvalidParams { message } => write!(f, "{}", message),
            RouterError::MissingName => write!(f, "Missing \"name\" option"),
            RouterError::MissingParameter { name } => {
                write!(f, "Missing parameter \"{}\"", name)
            }
            RouterError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern \"{}\": {}", pattern, message)
            }
            RouterError::InvalidConfig { message } => {
                write!(f, "Invalid route configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for RouterError {}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl RouterError {
    /// Build an [`InvalidParams`](Self::InvalidParams) error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        RouterError::InvalidParams {
            message: message.into(),
        }
    }

    /// Build an [`InvalidPattern`](Self::InvalidPattern) error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Build an [`InvalidConfig`](Self::InvalidConfig) error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        RouterError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if the error is caused by missing helper or router state
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            RouterError::MissingRouter
                | RouterError::MissingRouteMatch
                | RouterError::NoMatchedRouteName
                | RouterError::RouteNotFound { .. }
                | RouterError::NoChildRoutes { .. }
                | RouterError::NotTerminal
        )
    }

    /// Check if the error is caused by a malformed argument
    pub fn is_invalid_argument(&self) -> bool {
        !self.is_runtime()
    }
}

// ============================================================================
// Tests
// ============================================================================
