//! Namespacing of matched controllers.
//!
//! Routes of a module usually carry a `__NAMESPACE__` default. After a
//! match, [`on_route`] turns the short controller name into the fully
//! qualified one and keeps the short name under `__CONTROLLER__`:
//!
//! ```
//! use mvc_router::module_listener::{on_route, ORIGINAL_CONTROLLER};
//! use mvc_router::RouteMatch;
//!
//! let mut route_match = RouteMatch::new([
//!     ("__NAMESPACE__", "Application\\Controller"),
//!     ("controller", "blog-post"),
//! ]);
//! assert!(on_route(&mut route_match));
//!
//! assert_eq!(route_match.param("controller"), Some("Application\\Controller\\BlogPost"));
//! assert_eq!(route_match.param(ORIGINAL_CONTROLLER), Some("blog-post"));
//! ```
//!
//! The [`Url`](crate::Url) helper reverses this when reusing matched
//! parameters.

use crate::route_match::RouteMatch;
use crate::trace_log;

/// Parameter holding the namespace of a module's controllers.
pub const MODULE_NAMESPACE: &str = "__NAMESPACE__";

/// Parameter holding the controller name as it was matched.
pub const ORIGINAL_CONTROLLER: &str = "__CONTROLLER__";

/// Qualify the matched controller with the module namespace.
///
/// Returns `false` and leaves the match untouched when the namespace or the
/// controller is missing or empty, or when the controller already starts with
/// the namespace.
pub fn on_route(route_match: &mut RouteMatch) -> bool {
    let Some(namespace) = route_match.param(MODULE_NAMESPACE).filter(|ns| !ns.is_empty()) else {
        return false;
    };
    let Some(controller) = route_match.param("controller").filter(|c| !c.is_empty()) else {
        return false;
    };
    if controller.starts_with(namespace) {
        return false;
    }

    let qualified = format!("{}\\{}", namespace, camel_case(controller));
    let original = controller.to_string();
    trace_log!("Controller '{}' qualified as '{}'", original, qualified);

    route_match.set_param(ORIGINAL_CONTROLLER, original);
    route_match.set_param("controller", qualified);
    true
}

/// `blog-post` → `BlogPost`. Only the first letter of each word changes.
fn camel_case(name: &str) -> String {
    name.split('-')
        .flat_map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .into_iter()
                .flat_map(char::to_uppercase)
                .chain(chars)
        })
        .collect()
}
