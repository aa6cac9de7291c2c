//! Logging abstraction layer.
//!
//! Route matching and assembly report through a small set of macros that
//! forward to either the [`log`](https://docs.rs/log) or the
//! [`tracing`](https://docs.rs/tracing) crate, selected by Cargo feature.
//! Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! What the crate logs:
//!
//! - `trace_log!` for every route tried while matching a path.
//! - `debug_log!` for each assembled URL and each successful match.
//! - `warn_log!` when an unknown route name is requested.
//!
//! ```ignore
//! use mvc_router::{debug_log, warn_log};
//!
//! debug_log!("Assembled route '{}' -> {}", name, url);
//! warn_log!("Route '{}' is not registered", name);
//! ```

/// Forward a message to the enabled logging backend at the given level.
#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level log message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level log message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level log message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level log message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level log message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(error, $($arg)*)
    };
}
