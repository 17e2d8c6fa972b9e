//! Defects: abnormal termination of a deferred computation.
//!
//! A defect is neither a success nor a modeled failure. It is a panic raised
//! while a deferred computation was being driven: a callback passed to a
//! combinator panicked, the wrapped future panicked, or a deferred `unwrap`
//! found the wrong branch. By default a defect unwinds through whoever is
//! awaiting. [`CatchDefect`] turns it into a value instead.
//!
//! Panics raised by this crate still carry a plain string message. The
//! structured [`Defect`] behind them is parked in a thread-local slot for the
//! duration of the unwind, and [`Defect::from_panic`] takes it back when the
//! message matches, so a deferred `unwrap` keeps its [`UnwrapFailure`].

use core::fmt;
use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::UnwrapFailure;
use crate::tracing_compat::warn;

thread_local! {
    /// The defect behind the panic currently unwinding on this thread.
    static RAISED: RefCell<Option<(String, Defect)>> = const { RefCell::new(None) };
}

/// A captured defect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("defect: {message}")]
pub struct Defect {
    message: String,
    #[source]
    unwrap_failure: Option<UnwrapFailure>,
}

impl Defect {
    /// Creates a defect with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unwrap_failure: None,
        }
    }

    pub(crate) fn from_unwrap_failure(failure: UnwrapFailure) -> Self {
        Self {
            message: failure.to_string(),
            unwrap_failure: Some(failure),
        }
    }

    /// Extracts a defect from a panic payload.
    ///
    /// Recovers the full defect when the panic was raised by this crate on
    /// the current thread; otherwise only the message survives.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(defect) = payload.downcast_ref::<Self>() {
            return defect.clone();
        }
        if let Some(failure) = payload.downcast_ref::<UnwrapFailure>() {
            return Self::from_unwrap_failure(failure.clone());
        }
        let message = payload_to_string(payload);
        match RAISED.with(|raised| raised.borrow_mut().take()) {
            Some((raised_message, defect)) if raised_message == message => defect,
            _ => Self::new(message),
        }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the unwrap failure when the defect came from a deferred
    /// `unwrap`/`expect` on the wrong branch.
    #[must_use]
    pub fn unwrap_failure(&self) -> Option<&UnwrapFailure> {
        self.unwrap_failure.as_ref()
    }

    /// Panics with `message`, parking `self` for [`Defect::from_panic`].
    #[track_caller]
    pub(crate) fn raise(self, message: String) -> ! {
        RAISED.with(|raised| *raised.borrow_mut() = Some((message.clone(), self)));
        panic!("{message}")
    }

    /// Continues an unwind that was caught as `self`.
    pub(crate) fn resume(self, payload: Box<dyn Any + Send>) -> ! {
        let message = payload_to_string(payload.as_ref());
        RAISED.with(|raised| *raised.borrow_mut() = Some((message, self)));
        resume_unwind(payload)
    }
}

fn payload_to_string(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Future adapter that captures a panic while polling as a [`Defect`].
#[must_use = "futures do nothing unless polled"]
pub struct CatchDefect<F> {
    inner: Pin<Box<F>>,
}

impl<F: Future> CatchDefect<F> {
    /// Wraps `future`.
    pub fn new(future: F) -> Self {
        Self {
            inner: Box::pin(future),
        }
    }
}

impl<F> fmt::Debug for CatchDefect<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatchDefect").finish_non_exhaustive()
    }
}

impl<F: Future> Future for CatchDefect<F> {
    type Output = Result<F::Output, Defect>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = self.inner.as_mut();
        match catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(v)) => Poll::Ready(Ok(v)),
            Err(payload) => {
                let defect = Defect::from_panic(payload.as_ref());
                warn!(defect = %defect, "deferred computation terminated abnormally");
                Poll::Ready(Err(defect))
            }
        }
    }
}
