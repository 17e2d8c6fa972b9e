//! Constructors for both Result families.
//!
//! These are plain functions so call sites read `ok(1)` / `err_async(e)`
//! without naming the enum.

use std::future::{Future, IntoFuture};

use crate::result::SyncResult;
use crate::result_async::AsyncResult;

/// Creates a successful [`SyncResult`].
pub const fn ok<T, E>(value: T) -> SyncResult<T, E> {
    SyncResult::Ok(value)
}

/// Creates a failed [`SyncResult`].
pub const fn err<T, E>(error: E) -> SyncResult<T, E> {
    SyncResult::Err(error)
}

/// Creates an [`AsyncResult`] that settles to `Ok(value)`.
pub fn ok_async<T, E>(value: T) -> AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    AsyncResult::new(SyncResult::Ok(value))
}

/// Creates an [`AsyncResult`] that settles to `Err(error)`.
pub fn err_async<T, E>(error: E) -> AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    AsyncResult::new(SyncResult::Err(error))
}

/// Normalizes anything that settles to a [`SyncResult`] into an
/// [`AsyncResult`].
///
/// Accepts a `SyncResult`, an `AsyncResult`, a
/// [`SharedAsyncResult`](crate::SharedAsyncResult), or any future whose
/// output is a `SyncResult`. A panic in the input stays a defect.
pub fn from_promiseable_result<T, E, I>(input: I) -> AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    I: IntoFuture<Output = SyncResult<T, E>>,
    I::IntoFuture: Send + 'static,
{
    AsyncResult::new(input)
}

/// Adapts a future of a standard [`Result`] into an [`AsyncResult`].
pub fn resultify_future<T, E, Fut>(future: Fut) -> AsyncResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    AsyncResult::new(async move { SyncResult::from(future.await) })
}
