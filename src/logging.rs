/// Conditional debug logging for development builds
///
/// The `debug_log!` macro forwards to `log::debug!` in debug builds and compiles
/// to nothing in release builds unless the `console_logging` feature is enabled.
/// Diagnostics that must always be emitted (rejected edges, broken paths) use
/// `log::warn!` directly.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::logging::debug_log;
///
/// debug_log!("Routing {} -> {}", start, end);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            ::log::debug!($($arg)+);
        }
    };
}

pub use debug_log;
