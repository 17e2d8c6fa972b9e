//! Resolute: a typed Result algebra with immediate and deferred forms.
//!
//! # Overview
//!
//! Fallible computations are modeled as values. A [`SyncResult`] is either
//! `Ok(value)` or `Err(error)` and carries the full combinator surface
//! (`map`, `and_then`, `or_else`, `unwrap_or`, ...). An [`AsyncResult`] is
//! the deferred counterpart: the same combinators, each returning a new
//! deferred value without polling anything, and a future of the settled
//! `SyncResult`.
//!
//! # Core Guarantees
//!
//! - **Failures are values**: a modeled failure is an `Err`, never a panic
//! - **Defects stay defects**: a panicking callback unwinds; it is never
//!   converted into `Err` unless [`AsyncResult::catch_defect`] asks for it
//! - **Ordered chaining**: deferred steps run in attachment order, each after
//!   the previous one settled
//! - **Single settlement**: an `AsyncResult` is consumed by observation;
//!   [`SharedAsyncResult`] drives its computation at most once for any number
//!   of observers
//! - **Deep equality**: [`equal`] compares across nested and deferred results
//!
//! # Module Structure
//!
//! - [`result`]: the immediate [`SyncResult`]
//! - [`result_async`]: the deferred [`AsyncResult`] and the bridges into it
//! - [`shared`]: single-settlement, multi-observer [`SharedAsyncResult`]
//! - [`factory`]: `ok`, `err`, `ok_async`, `err_async` and converters
//! - [`equal`](mod@equal): the [`Settle`] trait and deep equality
//! - [`error`]: [`UnwrapFailure`] raised by `unwrap`/`expect`
//! - [`defect`]: [`Defect`] capture for deferred computations
//!
//! # Example
//!
//! ```
//! use resolute::{err, ok, ok_async, SyncResult};
//!
//! let parsed: SyncResult<i32, String> = ok(20);
//! assert_eq!(parsed.map(|v| v + 1).unwrap_or(0), 21);
//!
//! let failed: SyncResult<i32, String> = err("bad input".to_string());
//! assert_eq!(failed.map_or(0, |v| v * 2), 0);
//!
//! let settled = futures_lite::future::block_on(
//!     ok_async::<i32, String>(2).and_then(|v| ok::<i32, String>(v * 10)),
//! );
//! assert_eq!(settled, ok(20));
//! ```
//!
//! # Features
//!
//! - `tracing-integration`: emit `tracing` events on defect capture
//! - `serde`: adjacently tagged (de)serialization of [`SyncResult`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod defect;
pub mod equal;
pub mod error;
pub mod factory;
pub mod result;
pub mod result_async;
pub mod shared;
pub mod tracing_compat;

#[cfg(test)]
mod test_utils;

pub use defect::{CatchDefect, Defect};
pub use equal::{equal, Settle, Settling};
pub use error::{UnwrapFailure, UnwrapKind};
pub use factory::{err, err_async, from_promiseable_result, ok, ok_async, resultify_future};
pub use result::SyncResult;
pub use result_async::AsyncResult;
pub use shared::SharedAsyncResult;
