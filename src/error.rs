//! Error types for the Result algebra.
//!
//! Error handling follows these principles:
//!
//! - Domain failures are data: the `Err` payload of a [`SyncResult`], never a panic
//! - Unwrapping the wrong branch is the only designed panic, and its message
//!   always carries the `Debug` form of the payload that was found instead
//! - Defects (panics inside a deferred computation) are distinct from both and
//!   are described in [`crate::defect`]
//!
//! [`SyncResult`]: crate::SyncResult

use core::fmt;

use crate::defect::Defect;

/// Which accessor detected the tag mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnwrapKind {
    /// `unwrap()` on an `Err`.
    Unwrap,
    /// `unwrap_err()` on an `Ok`.
    UnwrapErr,
    /// `expect(msg)` on an `Err`.
    Expect,
    /// `expect_err(msg)` on an `Ok`.
    ExpectErr,
}

impl UnwrapKind {
    /// Returns true if the accessor expected an `Ok` value.
    #[must_use]
    pub const fn expected_ok(&self) -> bool {
        matches!(self, Self::Unwrap | Self::Expect)
    }
}

impl fmt::Display for UnwrapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unwrap => write!(f, "unwrap"),
            Self::UnwrapErr => write!(f, "unwrap_err"),
            Self::Expect => write!(f, "expect"),
            Self::ExpectErr => write!(f, "expect_err"),
        }
    }
}

/// Failure of an unwrap-style accessor invoked on the wrong branch.
///
/// The panicking accessors (`unwrap`, `expect`, ...) panic with this value's
/// `Display` form; the `try_*` accessors return it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: {payload}")]
pub struct UnwrapFailure {
    kind: UnwrapKind,
    message: String,
    payload: String,
}

impl UnwrapFailure {
    /// Builds the failure for `unwrap()` called on an `Err(error)`.
    #[must_use]
    pub fn unwrap(error: &dyn fmt::Debug) -> Self {
        Self {
            kind: UnwrapKind::Unwrap,
            message: "called `SyncResult::unwrap()` on an `Err` value".to_string(),
            payload: format!("{error:?}"),
        }
    }

    /// Builds the failure for `unwrap_err()` called on an `Ok(value)`.
    #[must_use]
    pub fn unwrap_err(value: &dyn fmt::Debug) -> Self {
        Self {
            kind: UnwrapKind::UnwrapErr,
            message: "called `SyncResult::unwrap_err()` on an `Ok` value".to_string(),
            payload: format!("{value:?}"),
        }
    }

    /// Builds the failure for `expect(msg)` called on an `Err(error)`.
    #[must_use]
    pub fn expect(msg: &str, error: &dyn fmt::Debug) -> Self {
        Self {
            kind: UnwrapKind::Expect,
            message: msg.to_string(),
            payload: format!("{error:?}"),
        }
    }

    /// Builds the failure for `expect_err(msg)` called on an `Ok(value)`.
    #[must_use]
    pub fn expect_err(msg: &str, value: &dyn fmt::Debug) -> Self {
        Self {
            kind: UnwrapKind::ExpectErr,
            message: msg.to_string(),
            payload: format!("{value:?}"),
        }
    }

    /// Returns the accessor that failed.
    #[must_use]
    pub const fn kind(&self) -> UnwrapKind {
        self.kind
    }

    /// Returns the generic or caller-supplied message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `Debug` form of the payload that was found instead.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Panics with this failure as the message.
    ///
    /// A [`CatchDefect`](crate::CatchDefect) on the same thread recovers the
    /// failure itself through [`Defect::unwrap_failure`](crate::Defect::unwrap_failure).
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        let message = self.to_string();
        Defect::from_unwrap_failure(self).raise(message)
    }
}
