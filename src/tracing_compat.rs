//! Structured logging that compiles away unless requested.
//!
//! - **With `tracing-integration`**: re-exports the `tracing` event macros.
//! - **Without it**: no-op macros with the same names, so call sites never
//!   need their own `cfg` guards.
//!
//! The Result algebra is silent on every combinator path. Events are only
//! emitted where a deferred computation terminates abnormally:
//!
//! - [`crate::defect::CatchDefect`] logs the captured defect at `warn`
//! - [`crate::SharedAsyncResult`] logs at `debug` when its computation is poisoned
//!
//! ```toml
//! resolute = { version = "0.1", features = ["tracing-integration"] }
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    //! Event macros that expand to nothing.

    /// No-op trace-level event.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug-level event.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op warn-level event.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    pub use crate::{debug, trace, warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub use noop::*;
