//! Library-level tracing that costs nothing when the `logging` feature is off.
//!
//! With `logging` enabled the macros forward to `tracing`; the library never
//! installs a subscriber, consumers do. Without it they expand to nothing and
//! their arguments are not evaluated.
//!
//! ```rust,ignore
//! use crate::logging::{debug, trace};
//!
//! debug!(arguments = types.len(), head_size, "encoding argument list");
//! trace!(index, ty = %ty, "static argument");
//! ```

/// Per-argument placement details.
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// One line per encoded argument list.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_trace as trace;
