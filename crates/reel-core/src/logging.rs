#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature (default) this module re-exports the `tracing`
//! macros. Without it the same macro names are provided as no-ops at the crate
//! root, so call sites compile unchanged:
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use reel_core::logging::warn;
//! #[cfg(not(feature = "tracing"))]
//! use reel_core::warn;
//! ```
//!
//! The `tracing-json` feature adds [`init_json_logging`], which installs a
//! JSON formatter filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Install a global JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}

/// Span stand-in used when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `tracing::Span::entered`.
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }

    /// Mirrors `tracing::Span::in_scope`.
    #[inline]
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        f()
    }
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}
