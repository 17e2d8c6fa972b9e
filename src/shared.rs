//! Single-settlement, multi-observer view of an [`AsyncResult`].
//!
//! [`SharedAsyncResult`] drives its wrapped computation at most once. Every
//! clone observes the same settled [`SyncResult`] (each receives a clone of
//! it) and no observer recomputes anything.
//!
//! # State machine
//!
//! `Pending -> Driving -> Pending` while the computation makes progress, then
//! either `Settled` or `Defect`. Both are terminal. A panic while driving
//! (inside the computation or while cloning its result) moves the slot to
//! `Defect`. The driving observer unwinds with the original panic, and every
//! later observer panics with the recorded [`Defect`] instead of re-polling
//! a broken computation.
//!
//! # Wakeups
//!
//! The wrapped computation is always polled with a fan-out waker. Observers
//! register their own waker on each poll; when the computation wakes, every
//! registered observer is woken, so progress never depends on which observer
//! happened to drive last.

use core::fmt;
use std::future::Future;
use std::mem;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use parking_lot::Mutex;

use crate::defect::Defect;
use crate::result::SyncResult;
use crate::result_async::{AsyncResult, BoxSettlement};
use crate::tracing_compat::debug;

enum Slot<T, E> {
    Pending(BoxSettlement<T, E>),
    /// An observer has taken the computation out to poll it.
    Driving,
    Settled(SyncResult<T, E>),
    Defect(Defect),
}

/// Observers waiting for the next wakeup of the wrapped computation.
#[derive(Default)]
struct Waiters {
    wakers: Mutex<Vec<Waker>>,
}

impl Waiters {
    fn register(&self, waker: &Waker) {
        let mut wakers = self.wakers.lock();
        if !wakers.iter().any(|w| w.will_wake(waker)) {
            wakers.push(waker.clone());
        }
    }

    fn wake_all(&self) {
        let wakers = mem::take(&mut *self.wakers.lock());
        for waker in wakers {
            waker.wake();
        }
    }

    fn len(&self) -> usize {
        self.wakers.lock().len()
    }
}

impl Wake for Waiters {
    fn wake(self: Arc<Self>) {
        self.wake_all();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.wake_all();
    }
}

struct Shared<T, E> {
    slot: Mutex<Slot<T, E>>,
    waiters: Arc<Waiters>,
}

/// Panics with a defect recorded by an earlier observer.
#[track_caller]
fn reraise(defect: Defect) -> ! {
    let message = format!("shared `AsyncResult` observed a defect: {}", defect.message());
    defect.raise(message)
}

/// A cloneable handle to an [`AsyncResult`] that settles at most once.
///
/// Created by [`AsyncResult::shared`]. It is a future of the settled
/// [`SyncResult`], so it can be awaited directly or passed anywhere an
/// `IntoFuture<Output = SyncResult<T, E>>` is accepted.
#[must_use = "futures do nothing unless polled"]
pub struct SharedAsyncResult<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> SharedAsyncResult<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(crate) fn new(source: AsyncResult<T, E>) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::Pending(Box::pin(source))),
                waiters: Arc::new(Waiters::default()),
            }),
        }
    }

    /// Returns the settled result if settlement already happened.
    #[must_use]
    pub fn peek(&self) -> Option<SyncResult<T, E>> {
        match &*self.shared.slot.lock() {
            Slot::Settled(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Returns true once the computation settled or hit a defect.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            &*self.shared.slot.lock(),
            Slot::Settled(_) | Slot::Defect(_)
        )
    }

    /// Returns a fresh [`AsyncResult`] observing this settlement.
    pub fn observe(&self) -> AsyncResult<T, E> {
        AsyncResult::new(self.clone())
    }
}

impl<T, E> Clone for SharedAsyncResult<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Future for SharedAsyncResult<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = SyncResult<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let shared = &*self.shared;
        shared.waiters.register(cx.waker());

        let mut computation = {
            let mut slot = shared.slot.lock();
            match &*slot {
                Slot::Pending(_) => {}
                Slot::Driving => return Poll::Pending,
                Slot::Settled(result) => return Poll::Ready(result.clone()),
                Slot::Defect(defect) => {
                    let defect = defect.clone();
                    drop(slot);
                    reraise(defect);
                }
            }
            let Slot::Pending(computation) = mem::replace(&mut *slot, Slot::Driving) else {
                return Poll::Pending;
            };
            computation
        };

        // The observer's copy is cloned inside the unwind boundary so that a
        // panicking `Clone` poisons the slot instead of leaving it `Driving`.
        let fan_out = Waker::from(Arc::clone(&shared.waiters));
        let polled = catch_unwind(AssertUnwindSafe(|| {
            match computation.as_mut().poll(&mut Context::from_waker(&fan_out)) {
                Poll::Ready(result) => Poll::Ready((result.clone(), result)),
                Poll::Pending => Poll::Pending,
            }
        }));

        match polled {
            Ok(Poll::Ready((out, result))) => {
                *shared.slot.lock() = Slot::Settled(result);
                shared.waiters.wake_all();
                Poll::Ready(out)
            }
            Ok(Poll::Pending) => {
                *shared.slot.lock() = Slot::Pending(computation);
                Poll::Pending
            }
            Err(payload) => {
                let defect = Defect::from_panic(payload.as_ref());
                *shared.slot.lock() = Slot::Defect(defect.clone());
                debug!(
                    defect = %defect,
                    observers = shared.waiters.len(),
                    "shared result poisoned by a defect"
                );
                shared.waiters.wake_all();
                defect.resume(payload)
            }
        }
    }
}

impl<T, E> fmt::Debug for SharedAsyncResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.shared.slot.lock() {
            Slot::Pending(_) => "pending",
            Slot::Driving => "driving",
            Slot::Settled(_) => "settled",
            Slot::Defect(_) => "defect",
        };
        f.debug_struct("SharedAsyncResult")
            .field("state", &state)
            .finish()
    }
}
