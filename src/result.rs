//! The immediate Result value.
//!
//! [`SyncResult`] is a two-valued, immutable outcome:
//!
//! - `Ok(T)`: success carrying a value
//! - `Err(E)`: failure carrying an error
//!
//! Every combinator consumes the receiver and yields a new value. Nothing in
//! this module ever suspends; the deferred counterpart lives in
//! [`crate::result_async`].

use core::fmt;
use std::future::{ready, IntoFuture, Ready};

use crate::error::UnwrapFailure;

/// The outcome of a fallible computation that is already known.
///
/// With the `serde` feature the JSON form is adjacently tagged:
/// `{"type":"ok","value":..}` or `{"type":"err","value":..}`. A unit payload
/// serializes as `"value": null`. An object without `value` is accepted only
/// when the payload type tolerates a missing field (`Option` reads it as
/// `None`); for `()` and every other payload `value` is required.
#[must_use = "this `SyncResult` may be an `Err` variant, which should be handled"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum SyncResult<T, E> {
    /// Success with a value.
    Ok(T),
    /// Failure with an error.
    Err(E),
}

impl<T, E> SyncResult<T, E> {
    /// Returns true if this result is `Ok`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns true if this result is `Err`.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns true if this result is `Ok` and the value matches `pred`.
    ///
    /// `pred` is not called on an `Err`.
    #[must_use]
    pub fn is_ok_and(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Ok(v) => pred(v),
            Self::Err(_) => false,
        }
    }

    /// Returns true if this result is `Err` and the error matches `pred`.
    ///
    /// `pred` is not called on an `Ok`.
    #[must_use]
    pub fn is_err_and(&self, pred: impl FnOnce(&E) -> bool) -> bool {
        match self {
            Self::Ok(_) => false,
            Self::Err(e) => pred(e),
        }
    }

    /// Borrows both payloads.
    pub const fn as_ref(&self) -> SyncResult<&T, &E> {
        match self {
            Self::Ok(v) => SyncResult::Ok(v),
            Self::Err(e) => SyncResult::Err(e),
        }
    }

    /// Returns the success value, discarding the error.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(v) => Some(v),
            Self::Err(_) => None,
        }
    }

    /// Returns the error, discarding the success value.
    #[must_use]
    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(e) => Some(e),
        }
    }

    /// Maps the success value, leaving an `Err` untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SyncResult<U, E> {
        match self {
            Self::Ok(v) => SyncResult::Ok(f(v)),
            Self::Err(e) => SyncResult::Err(e),
        }
    }

    /// Maps the error, leaving an `Ok` untouched.
    pub fn map_err<F2, G: FnOnce(E) -> F2>(self, g: G) -> SyncResult<T, F2> {
        match self {
            Self::Ok(v) => SyncResult::Ok(v),
            Self::Err(e) => SyncResult::Err(g(e)),
        }
    }

    /// Applies `f` to the success value, or returns `default` on `Err`.
    ///
    /// `default` is evaluated eagerly; use [`map_or_else`](Self::map_or_else)
    /// when computing it is expensive.
    pub fn map_or<U, F: FnOnce(T) -> U>(self, default: U, f: F) -> U {
        match self {
            Self::Ok(v) => f(v),
            Self::Err(_) => default,
        }
    }

    /// Applies `ok_fn` to the success value or `err_fn` to the error.
    pub fn map_or_else<U, D, F>(self, err_fn: D, ok_fn: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(v) => ok_fn(v),
            Self::Err(e) => err_fn(e),
        }
    }

    /// Returns `other` if this is `Ok`, otherwise this `Err`.
    pub fn and<U>(self, other: SyncResult<U, E>) -> SyncResult<U, E> {
        match self {
            Self::Ok(_) => other,
            Self::Err(e) => SyncResult::Err(e),
        }
    }

    /// Chains a fallible step on the success value.
    pub fn and_then<U, F>(self, f: F) -> SyncResult<U, E>
    where
        F: FnOnce(T) -> SyncResult<U, E>,
    {
        match self {
            Self::Ok(v) => f(v),
            Self::Err(e) => SyncResult::Err(e),
        }
    }

    /// Returns `other` if this is `Err`, otherwise this `Ok`.
    pub fn or<F2>(self, other: SyncResult<T, F2>) -> SyncResult<T, F2> {
        match self {
            Self::Ok(v) => SyncResult::Ok(v),
            Self::Err(_) => other,
        }
    }

    /// Recovers from an error with a fallible step.
    pub fn or_else<F2, G>(self, g: G) -> SyncResult<T, F2>
    where
        G: FnOnce(E) -> SyncResult<T, F2>,
    {
        match self {
            Self::Ok(v) => SyncResult::Ok(v),
            Self::Err(e) => g(e),
        }
    }

    /// Calls `f` with the success value, then returns `self` unchanged.
    pub fn inspect<F: FnOnce(&T)>(self, f: F) -> Self {
        if let Self::Ok(v) = &self {
            f(v);
        }
        self
    }

    /// Calls `f` with the error, then returns `self` unchanged.
    pub fn inspect_err<F: FnOnce(&E)>(self, f: F) -> Self {
        if let Self::Err(e) = &self {
            f(e);
        }
        self
    }

    /// Returns the success value or a default.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(_) => default,
        }
    }

    /// Returns the success value or computes one from the error.
    pub fn unwrap_or_else<F: FnOnce(E) -> T>(self, f: F) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(e) => f(e),
        }
    }

    /// Returns the success value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Ok(v) => v,
            Self::Err(_) => T::default(),
        }
    }

    /// Returns the success value without checking the tag.
    ///
    /// The caller asserts this is an `Ok`. On an `Err` the absent sentinel
    /// `None` comes back in release builds; debug builds fail the assertion
    /// instead, so misuse is caught during development.
    #[track_caller]
    pub fn unwrap_unchecked(self) -> Option<T> {
        debug_assert!(
            self.is_ok(),
            "called `SyncResult::unwrap_unchecked()` on an `Err` value"
        );
        self.ok()
    }

    /// Returns the error without checking the tag.
    ///
    /// Mirror of [`unwrap_unchecked`](Self::unwrap_unchecked): `None` on an
    /// `Ok` in release builds, a failed debug assertion otherwise.
    #[track_caller]
    pub fn unwrap_err_unchecked(self) -> Option<E> {
        debug_assert!(
            self.is_err(),
            "called `SyncResult::unwrap_err_unchecked()` on an `Ok` value"
        );
        self.err()
    }

    /// Converts into the standard library result.
    pub fn into_std(self) -> Result<T, E> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(e),
        }
    }
}

impl<T, E: fmt::Debug> SyncResult<T, E> {
    /// Returns the success value or an [`UnwrapFailure`] describing the error.
    pub fn try_unwrap(self) -> Result<T, UnwrapFailure> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(UnwrapFailure::unwrap(&e)),
        }
    }

    /// Like [`try_unwrap`](Self::try_unwrap) with a caller-supplied message.
    pub fn try_expect(self, msg: &str) -> Result<T, UnwrapFailure> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(UnwrapFailure::expect(msg, &e)),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Err`, with the error's `Debug` form in the message.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(v) => v,
            Err(failure) => failure.raise(),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` followed by the error's `Debug` form if this is an `Err`.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self.try_expect(msg) {
            Ok(v) => v,
            Err(failure) => failure.raise(),
        }
    }
}

impl<T: fmt::Debug, E> SyncResult<T, E> {
    /// Returns the error or an [`UnwrapFailure`] describing the value.
    pub fn try_unwrap_err(self) -> Result<E, UnwrapFailure> {
        match self {
            Self::Ok(v) => Err(UnwrapFailure::unwrap_err(&v)),
            Self::Err(e) => Ok(e),
        }
    }

    /// Like [`try_unwrap_err`](Self::try_unwrap_err) with a caller-supplied message.
    pub fn try_expect_err(self, msg: &str) -> Result<E, UnwrapFailure> {
        match self {
            Self::Ok(v) => Err(UnwrapFailure::expect_err(msg, &v)),
            Self::Err(e) => Ok(e),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Ok`, with the value's `Debug` form in the message.
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self.try_unwrap_err() {
            Ok(e) => e,
            Err(failure) => failure.raise(),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics with `msg` followed by the value's `Debug` form if this is an `Ok`.
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        match self.try_expect_err(msg) {
            Ok(e) => e,
            Err(failure) => failure.raise(),
        }
    }
}

impl<T: PartialEq, E: PartialEq> SyncResult<T, E> {
    /// Deep structural equality.
    ///
    /// Tags must match and the active payloads must be equal; nested
    /// `SyncResult` payloads are compared by this same relation.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T, E> SyncResult<Option<T>, E> {
    /// Transposes a result of an optional value into an optional result.
    ///
    /// `Ok(None)` maps to `None`.
    #[must_use]
    pub fn transpose(self) -> Option<SyncResult<T, E>> {
        match self {
            Self::Ok(Some(v)) => Some(SyncResult::Ok(v)),
            Self::Ok(None) => None,
            Self::Err(e) => Some(SyncResult::Err(e)),
        }
    }
}

impl<T, E> SyncResult<SyncResult<T, E>, E> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> SyncResult<T, E> {
        self.and_then(|inner| inner)
    }
}

impl<T, E> From<Result<T, E>> for SyncResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

impl<T, E> From<SyncResult<T, E>> for Result<T, E> {
    fn from(result: SyncResult<T, E>) -> Self {
        result.into_std()
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for SyncResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(v) => write!(f, "Ok({v})"),
            Self::Err(e) => write!(f, "Err({e})"),
        }
    }
}

/// A `SyncResult` is a future that is already settled.
///
/// This lets "a result now", an [`AsyncResult`](crate::AsyncResult) and any
/// future of a result flow through the same `IntoFuture` bound.
impl<T, E> IntoFuture for SyncResult<T, E> {
    type Output = Self;
    type IntoFuture = Ready<Self>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self)
    }
}
