//! Logging facade.
//!
//! With the `tracing` feature the standard `tracing` macros are re-exported
//! from the crate root. Without it, the crate root exports macros with the
//! same names that only borrow their field values, so call sites never need
//! their own `cfg` attributes and bindings used only for logging stay used.
//!
//! `tracing-json` additionally exposes [`init_json_subscriber`] for hosts that
//! want line-delimited JSON logs without wiring a subscriber themselves.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, info_span, trace, warn};

/// Placeholder returned by the span shims when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirror of `tracing::Span::entered`.
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }
}

/// Borrow every field value and format argument of a disabled event, so
/// bindings used only for logging still count as used.
#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __consume_fields {
    () => {};
    ($message:literal $(,)?) => {};
    ($message:literal, $($arg:expr),+ $(,)?) => {
        $(let _ = &$arg;)+
    };
    ($field:ident = % $value:expr $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
    ($field:ident = ? $value:expr $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
    ($field:ident = $value:expr $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
    (% $value:ident $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
    (? $value:ident $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
    ($value:ident $(, $($rest:tt)*)?) => {
        let _ = &$value;
        $($crate::__consume_fields!($($rest)*);)?
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{
        $crate::__consume_fields!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        $crate::__consume_fields!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        $crate::__consume_fields!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::__consume_fields!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug_span {
    ($name:literal $(, $($field:tt)*)?) => {{
        $($crate::__consume_fields!($($field)*);)?
        $crate::logging::NoopSpan
    }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info_span {
    ($name:literal $(, $($field:tt)*)?) => {{
        $($crate::__consume_fields!($($field)*);)?
        $crate::logging::NoopSpan
    }};
}

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
