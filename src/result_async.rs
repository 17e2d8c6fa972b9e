//! The deferred Result value.
//!
//! [`AsyncResult`] wraps a future whose output is a [`SyncResult`]. It is a
//! future itself, so `.await` yields the settled `SyncResult`: a modeled
//! failure arrives as `Err`, never as a panic.
//!
//! # Semantics
//!
//! Every combinator returns immediately without polling anything. The new
//! `AsyncResult`, once driven, first settles the receiver and then applies
//! the matching [`SyncResult`] combinator. Steps therefore run in the order
//! they were attached, each starting after the previous one settled.
//!
//! `and`, `and_then`, `or` and `or_else` accept anything that is
//! `IntoFuture<Output = SyncResult<..>>`: a `SyncResult`, another
//! `AsyncResult`, or an `async` block. Other combinators take synchronous
//! callbacks, with `*_async` variants for future-returning ones.
//!
//! # Defects
//!
//! A panic inside a callback or inside the wrapped future is a defect. It
//! unwinds through the awaiting caller and is never converted into `Err`.
//! Deferred `unwrap`/`expect` on the wrong branch panics the same way.
//! [`AsyncResult::catch_defect`] captures it as a [`Defect`](crate::Defect).

use core::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::defect::CatchDefect;
use crate::result::SyncResult;
use crate::shared::SharedAsyncResult;

/// Boxed future producing a settled result.
pub(crate) type BoxSettlement<T, E> =
    Pin<Box<dyn Future<Output = SyncResult<T, E>> + Send + 'static>>;

/// The outcome of a fallible computation that settles later.
#[must_use = "futures do nothing unless polled"]
pub struct AsyncResult<T, E> {
    /// `None` once the result has been handed out.
    settlement: Option<BoxSettlement<T, E>>,
}

impl<T, E> AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps anything that settles to a `SyncResult`.
    ///
    /// Nothing is polled until the returned value is driven.
    pub fn new<I>(input: I) -> Self
    where
        I: IntoFuture<Output = SyncResult<T, E>>,
        I::IntoFuture: Send + 'static,
    {
        Self {
            settlement: Some(Box::pin(input.into_future())),
        }
    }

    // =========================================================================
    // Deferred combinators
    // =========================================================================

    /// Maps the success value.
    pub fn map<U, F>(self, f: F) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncResult::new(async move { self.await.map(f) })
    }

    /// Maps the success value with a future-returning callback.
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(v) => SyncResult::Ok(f(v).await),
                SyncResult::Err(e) => SyncResult::Err(e),
            }
        })
    }

    /// Maps the error.
    pub fn map_err<F2, G>(self, g: G) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        G: FnOnce(E) -> F2 + Send + 'static,
    {
        AsyncResult::new(async move { self.await.map_err(g) })
    }

    /// Maps the error with a future-returning callback.
    pub fn map_err_async<F2, G, Fut>(self, g: G) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        G: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = F2> + Send + 'static,
    {
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(v) => SyncResult::Ok(v),
                SyncResult::Err(e) => SyncResult::Err(g(e).await),
            }
        })
    }

    /// Calls `f` with the success value once settled; the result passes through.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::new(async move { self.await.inspect(f) })
    }

    /// Like [`inspect`](Self::inspect), awaiting the future `f` returns.
    pub fn inspect_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::new(async move {
            let result = self.await;
            let pending = match &result {
                SyncResult::Ok(v) => Some(f(v)),
                SyncResult::Err(_) => None,
            };
            if let Some(pending) = pending {
                pending.await;
            }
            result
        })
    }

    /// Calls `f` with the error once settled; the result passes through.
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        Self::new(async move { self.await.inspect_err(f) })
    }

    /// Like [`inspect_err`](Self::inspect_err), awaiting the future `f` returns.
    pub fn inspect_err_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::new(async move {
            let result = self.await;
            let pending = match &result {
                SyncResult::Ok(_) => None,
                SyncResult::Err(e) => Some(f(e)),
            };
            if let Some(pending) = pending {
                pending.await;
            }
            result
        })
    }

    /// Settles to `other` if this settles to `Ok`.
    ///
    /// `other` is only driven when it is needed.
    pub fn and<U, R>(self, other: R) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        R: IntoFuture<Output = SyncResult<U, E>>,
        R::IntoFuture: Send + 'static,
    {
        let other = other.into_future();
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(_) => other.await,
                SyncResult::Err(e) => SyncResult::Err(e),
            }
        })
    }

    /// Chains a step that settles to a result, synchronously or not.
    pub fn and_then<U, F, R>(self, f: F) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoFuture<Output = SyncResult<U, E>>,
        R::IntoFuture: Send + 'static,
    {
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(v) => f(v).await,
                SyncResult::Err(e) => SyncResult::Err(e),
            }
        })
    }

    /// Settles to `other` if this settles to `Err`.
    pub fn or<F2, R>(self, other: R) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        R: IntoFuture<Output = SyncResult<T, F2>>,
        R::IntoFuture: Send + 'static,
    {
        let other = other.into_future();
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(v) => SyncResult::Ok(v),
                SyncResult::Err(_) => other.await,
            }
        })
    }

    /// Recovers from an error with a step that settles to a result.
    pub fn or_else<F2, G, R>(self, g: G) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        G: FnOnce(E) -> R + Send + 'static,
        R: IntoFuture<Output = SyncResult<T, F2>>,
        R::IntoFuture: Send + 'static,
    {
        AsyncResult::new(async move {
            match self.await {
                SyncResult::Ok(v) => SyncResult::Ok(v),
                SyncResult::Err(e) => g(e).await,
            }
        })
    }

    /// Removes one level of nesting when the value itself settles to a result.
    pub fn flatten<U>(self) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        T: IntoFuture<Output = SyncResult<U, E>>,
        T::IntoFuture: Send + 'static,
    {
        self.and_then(|inner| inner)
    }

    // =========================================================================
    // Terminal accessors
    // =========================================================================

    /// Settles and reports whether the result is `Ok`.
    pub async fn is_ok(self) -> bool {
        self.await.is_ok()
    }

    /// Settles and reports whether the result is `Err`.
    pub async fn is_err(self) -> bool {
        self.await.is_err()
    }

    /// Settles and tests the success value with `pred`.
    pub async fn is_ok_and<F: FnOnce(&T) -> bool>(self, pred: F) -> bool {
        self.await.is_ok_and(pred)
    }

    /// Settles and tests the success value with an async predicate.
    pub async fn is_ok_and_async<F, Fut>(self, pred: F) -> bool
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self.await {
            SyncResult::Ok(v) => pred(v).await,
            SyncResult::Err(_) => false,
        }
    }

    /// Settles and tests the error with `pred`.
    pub async fn is_err_and<F: FnOnce(&E) -> bool>(self, pred: F) -> bool {
        self.await.is_err_and(pred)
    }

    /// Settles and tests the error with an async predicate.
    pub async fn is_err_and_async<F, Fut>(self, pred: F) -> bool
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self.await {
            SyncResult::Ok(_) => false,
            SyncResult::Err(e) => pred(e).await,
        }
    }

    /// Settles to the success value, discarding the error.
    pub async fn ok(self) -> Option<T> {
        self.await.ok()
    }

    /// Settles to the error, discarding the success value.
    pub async fn err(self) -> Option<E> {
        self.await.err()
    }

    /// Settles and applies `f`, or yields `default` on `Err`.
    pub async fn map_or<U, F: FnOnce(T) -> U>(self, default: U, f: F) -> U {
        self.await.map_or(default, f)
    }

    /// Like [`map_or`](Self::map_or) with a future-returning callback.
    pub async fn map_or_async<U, F, Fut>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self.await {
            SyncResult::Ok(v) => f(v).await,
            SyncResult::Err(_) => default,
        }
    }

    /// Settles and applies `ok_fn` or `err_fn`.
    pub async fn map_or_else<U, D, F>(self, err_fn: D, ok_fn: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        self.await.map_or_else(err_fn, ok_fn)
    }

    /// Like [`map_or_else`](Self::map_or_else) with future-returning callbacks.
    pub async fn map_or_else_async<U, D, DFut, F, FFut>(self, err_fn: D, ok_fn: F) -> U
    where
        D: FnOnce(E) -> DFut,
        DFut: Future<Output = U>,
        F: FnOnce(T) -> FFut,
        FFut: Future<Output = U>,
    {
        match self.await {
            SyncResult::Ok(v) => ok_fn(v).await,
            SyncResult::Err(e) => err_fn(e).await,
        }
    }

    /// Settles to the success value or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    /// Settles to the success value or one computed from the error.
    pub async fn unwrap_or_else<F: FnOnce(E) -> T>(self, f: F) -> T {
        self.await.unwrap_or_else(f)
    }

    /// Like [`unwrap_or_else`](Self::unwrap_or_else) with a future-returning callback.
    pub async fn unwrap_or_else_async<F, Fut>(self, f: F) -> T
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = T>,
    {
        match self.await {
            SyncResult::Ok(v) => v,
            SyncResult::Err(e) => f(e).await,
        }
    }

    /// Settles to the success value or `T::default()`.
    pub async fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.await.unwrap_or_default()
    }

    /// Settles to the success value without checking the tag.
    ///
    /// See [`SyncResult::unwrap_unchecked`].
    pub async fn unwrap_unchecked(self) -> Option<T> {
        self.await.unwrap_unchecked()
    }

    /// Settles to the error without checking the tag.
    ///
    /// See [`SyncResult::unwrap_err_unchecked`].
    pub async fn unwrap_err_unchecked(self) -> Option<E> {
        self.await.unwrap_err_unchecked()
    }

    /// Settles to the success value.
    ///
    /// # Panics
    ///
    /// Panics while being polled if the result settles to `Err`.
    pub async fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        self.await.unwrap()
    }

    /// Settles to the success value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` while being polled if the result settles to `Err`.
    pub async fn expect(self, msg: &str) -> T
    where
        E: fmt::Debug,
    {
        self.await.expect(msg)
    }

    /// Settles to the error.
    ///
    /// # Panics
    ///
    /// Panics while being polled if the result settles to `Ok`.
    pub async fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        self.await.unwrap_err()
    }

    /// Settles to the error.
    ///
    /// # Panics
    ///
    /// Panics with `msg` while being polled if the result settles to `Ok`.
    pub async fn expect_err(self, msg: &str) -> E
    where
        T: fmt::Debug,
    {
        self.await.expect_err(msg)
    }

    /// Settles into the standard library result.
    pub async fn into_result(self) -> Result<T, E> {
        self.await.into_std()
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Captures a defect raised while settling instead of unwinding.
    pub fn catch_defect(self) -> CatchDefect<Self> {
        CatchDefect::new(self)
    }

    /// Turns this into a cloneable handle that settles at most once.
    pub fn shared(self) -> SharedAsyncResult<T, E>
    where
        T: Clone,
        E: Clone,
    {
        SharedAsyncResult::new(self)
    }
}

impl<T, E> AsyncResult<Option<T>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Settles and transposes; `Ok(None)` becomes `None`.
    pub async fn transpose(self) -> Option<SyncResult<T, E>> {
        self.await.transpose()
    }
}

impl<T, E> Future for AsyncResult<T, E> {
    type Output = SyncResult<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(settlement) = self.settlement.as_mut() else {
            panic!("`AsyncResult` polled after settlement");
        };
        match settlement.as_mut().poll(cx) {
            Poll::Ready(result) => {
                self.settlement = None;
                Poll::Ready(result)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> fmt::Debug for AsyncResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult")
            .field("settled", &self.settlement.is_none())
            .finish()
    }
}

impl<T, E> From<SyncResult<T, E>> for AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn from(result: SyncResult<T, E>) -> Self {
        Self::new(result)
    }
}

/// Bridges from an immediate result into the deferred family.
impl<T, E> SyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Lifts this result into an already-settled [`AsyncResult`].
    pub fn into_async(self) -> AsyncResult<T, E> {
        AsyncResult::new(self)
    }

    /// Maps the success value with a future-returning callback.
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.into_async().map_async(f)
    }

    /// Maps the error with a future-returning callback.
    pub fn map_err_async<F2, G, Fut>(self, g: G) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        G: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = F2> + Send + 'static,
    {
        self.into_async().map_err_async(g)
    }

    /// Chains a step that settles to a result later.
    pub fn and_then_async<U, F, R>(self, f: F) -> AsyncResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoFuture<Output = SyncResult<U, E>>,
        R::IntoFuture: Send + 'static,
    {
        self.into_async().and_then(f)
    }

    /// Recovers from an error with a step that settles to a result later.
    pub fn or_else_async<F2, G, R>(self, g: G) -> AsyncResult<T, F2>
    where
        F2: Send + 'static,
        G: FnOnce(E) -> R + Send + 'static,
        R: IntoFuture<Output = SyncResult<T, F2>>,
        R::IntoFuture: Send + 'static,
    {
        self.into_async().or_else(g)
    }

    /// Awaits the future `f` returns for the success value, then passes through.
    pub fn inspect_async<F, Fut>(self, f: F) -> AsyncResult<T, E>
    where
        F: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.into_async().inspect_async(f)
    }

    /// Awaits the future `f` returns for the error, then passes through.
    pub fn inspect_err_async<F, Fut>(self, f: F) -> AsyncResult<T, E>
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.into_async().inspect_err_async(f)
    }

    /// Tests the success value with an async predicate.
    pub async fn is_ok_and_async<F, Fut>(self, pred: F) -> bool
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.into_async().is_ok_and_async(pred).await
    }

    /// Tests the error with an async predicate.
    pub async fn is_err_and_async<F, Fut>(self, pred: F) -> bool
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.into_async().is_err_and_async(pred).await
    }

    /// Applies an async `f`, or yields `default` on `Err`.
    pub async fn map_or_async<U, F, Fut>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        self.into_async().map_or_async(default, f).await
    }

    /// Applies async `ok_fn` or `err_fn`.
    pub async fn map_or_else_async<U, D, DFut, F, FFut>(self, err_fn: D, ok_fn: F) -> U
    where
        D: FnOnce(E) -> DFut,
        DFut: Future<Output = U>,
        F: FnOnce(T) -> FFut,
        FFut: Future<Output = U>,
    {
        self.into_async().map_or_else_async(err_fn, ok_fn).await
    }

    /// Returns the success value or one computed asynchronously from the error.
    pub async fn unwrap_or_else_async<F, Fut>(self, f: F) -> T
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = T>,
    {
        self.into_async().unwrap_or_else_async(f).await
    }
}
