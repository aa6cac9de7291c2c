//! The URL view helper.
//!
//! [`Url`] turns a route name and parameters into a path through a
//! [`RouteStack`], optionally reusing the parameters of the route matched for
//! the current request.
//!
//! ```
//! use std::sync::Arc;
//! use mvc_router::{AssembleOptions, Literal, RouteMatch, RouteParams, Segment, SimpleRouteStack, Url};
//!
//! let router = SimpleRouteStack::new()
//!     .with_route("home", Literal::new("/"))
//!     .with_route("default", Segment::new("/:controller[/:action]").unwrap());
//!
//! let mut matched = RouteMatch::new([("controller", "ctrl"), ("action", "act")]);
//! matched.set_matched_route_name("default");
//!
//! let url = Url::new().with_router(Arc::new(router)).with_route_match(matched);
//!
//! assert_eq!(url.route("home").unwrap(), "/");
//! assert_eq!(url.current().unwrap(), "/ctrl/act");
//! assert_eq!(
//!     url.generate(None, [("action", "show")], AssembleOptions::new(), true).unwrap(),
//!     "/ctrl/show"
//! );
//! ```

use crate::debug_log;
use crate::error::RouterError;
use crate::module_listener::{MODULE_NAMESPACE, ORIGINAL_CONTROLLER};
use crate::params::RouteParams;
use crate::route_match::RouteMatch;
use crate::stack::{AssembleOptions, RouteStack};
use std::sync::Arc;

/// Generates URLs from route names.
#[derive(Debug, Clone, Default)]
pub struct Url {
    router: Option<Arc<dyn RouteStack>>,
    route_match: Option<RouteMatch>,
}

impl Url {
    /// A helper with neither router nor route match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the router used for assembly.
    pub fn set_router(&mut self, router: Arc<dyn RouteStack>) -> &mut Self {
        self.router = Some(router);
        self
    }

    /// Builder form of [`set_router`](Self::set_router).
    pub fn with_router(mut self, router: Arc<dyn RouteStack>) -> Self {
        self.set_router(router);
        self
    }

    /// Set the route matched for the current request.
    pub fn set_route_match(&mut self, route_match: RouteMatch) -> &mut Self {
        self.route_match = Some(route_match);
        self
    }

    /// Builder form of [`set_route_match`](Self::set_route_match).
    pub fn with_route_match(mut self, route_match: RouteMatch) -> Self {
        self.set_route_match(route_match);
        self
    }

    /// The router, if set.
    pub fn router(&self) -> Option<&Arc<dyn RouteStack>> {
        self.router.as_ref()
    }

    /// The current route match, if set.
    pub fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }

    /// Generate the URL of a route.
    ///
    /// Without `name` the matched route of the current request is used.
    /// `params` is any collection or iterator of key/value pairs: a
    /// [`RouteParams`], a map, an array, a `Vec` or an iterator adapter.
    /// With `reuse_matched_params` the parameters of the current match are
    /// laid under `params`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::MissingRouter`] if no router is set.
    /// - [`RouterError::MissingRouteMatch`] / [`RouterError::NoMatchedRouteName`]
    ///   if no name is given and there is no named match.
    /// - Any error of the router's [`assemble`](RouteStack::assemble).
    pub fn generate<I, K, V>(
        &self,
        name: Option<&str>,
        params: I,
        options: AssembleOptions,
        reuse_matched_params: bool,
    ) -> Result<String, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params: RouteParams = params.into_iter().collect();
        self.generate_with(name, move || Ok(params), options, reuse_matched_params)
    }

    /// [`generate`](Self::generate) with parameters held as JSON.
    ///
    /// `params` may be `null`, an object, or an array of `[key, value]`
    /// pairs; scalar values are converted to strings.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate), plus [`RouterError::InvalidParams`]
    /// for any other shape.
    pub fn generate_from_value(
        &self,
        name: Option<&str>,
        params: &serde_json::Value,
        options: AssembleOptions,
        reuse_matched_params: bool,
    ) -> Result<String, RouterError> {
        self.generate_with(
            name,
            || RouteParams::try_from(params),
            options,
            reuse_matched_params,
        )
    }

    /// URL of the named route without parameters.
    pub fn route(&self, name: &str) -> Result<String, RouterError> {
        self.generate(Some(name), RouteParams::new(), AssembleOptions::new(), false)
    }

    /// URL of the current request's route with its own parameters.
    pub fn current(&self) -> Result<String, RouterError> {
        self.generate(None, RouteParams::new(), AssembleOptions::new(), true)
    }

    fn generate_with(
        &self,
        name: Option<&str>,
        params: impl FnOnce() -> Result<RouteParams, RouterError>,
        options: AssembleOptions,
        reuse_matched_params: bool,
    ) -> Result<String, RouterError> {
        let router = self.router.as_ref().ok_or(RouterError::MissingRouter)?;

        let name = match name {
            Some(name) => name,
            None => self
                .route_match
                .as_ref()
                .ok_or(RouterError::MissingRouteMatch)?
                .matched_route_name()
                .ok_or(RouterError::NoMatchedRouteName)?,
        };

        let mut params = params()?;
        if reuse_matched_params {
            if let Some(route_match) = &self.route_match {
                params = RouteParams::merge(&reusable_params(route_match), &params);
            }
        }

        debug_log!("Generating URL for route '{}'", name);
        router.assemble(&params, &options.with_name(name))
    }
}

/// Matched parameters with the module namespacing undone.
fn reusable_params(route_match: &RouteMatch) -> RouteParams {
    let mut params = route_match.params().clone();
    if let Some(controller) = params.remove(ORIGINAL_CONTROLLER) {
        params.insert("controller", controller);
    }
    params.remove(MODULE_NAMESPACE);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_listener::on_route;

    #[test]
    fn test_reusable_params_restore_controller() {
        let mut route_match = RouteMatch::new([
            (MODULE_NAMESPACE, "App\\Controller"),
            ("controller", "blog"),
            ("action", "list"),
        ]);
        on_route(&mut route_match);

        let params = reusable_params(&route_match);
        assert_eq!(params.get("controller"), Some("blog"));
        assert_eq!(params.get("action"), Some("list"));
        assert!(!params.contains(MODULE_NAMESPACE));
        assert!(!params.contains(ORIGINAL_CONTROLLER));
    }

    #[test]
    fn test_reusable_params_without_namespacing() {
        let route_match = RouteMatch::new([("controller", "blog")]);
        assert_eq!(
            reusable_params(&route_match),
            RouteParams::from([("controller", "blog")])
        );
    }

    #[test]
    fn test_router_checked_before_params() {
        let err = Url::new()
            .generate_from_value(Some("home"), &serde_json::json!("foo"), AssembleOptions::new(), false)
            .unwrap_err();
        assert_eq!(err, RouterError::MissingRouter);
    }
}
