//! Deep equality across immediate, nested and deferred results.
//!
//! [`SyncResult`] equality is plain `PartialEq`. Comparing anything that
//! involves an [`AsyncResult`] first needs every deferred layer settled, and
//! a deferred value may hide inside a payload (`Ok(ok_async(1))`). [`Settle`]
//! describes how to reduce a value to a comparable, fully settled form;
//! [`equal`] settles both operands and compares the results.
//!
//! Floats compare with IEEE semantics, so `NaN` payloads are never equal.

use std::future::{ready, Future};
use std::pin::Pin;

use crate::result::SyncResult;
use crate::result_async::AsyncResult;
use crate::shared::SharedAsyncResult;

/// Boxed future of a settled value.
pub type Settling<S> = Pin<Box<dyn Future<Output = S> + Send + 'static>>;

/// Values that can be reduced to a fully settled, comparable form.
pub trait Settle: Send + 'static {
    /// The form with every deferred layer awaited.
    type Settled: PartialEq + Send + 'static;

    /// Settles `self`, awaiting nested deferred results in order.
    fn settle(self) -> Settling<Self::Settled>;
}

macro_rules! settle_as_self {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Settle for $ty {
                type Settled = Self;

                fn settle(self) -> Settling<Self> {
                    Box::pin(ready(self))
                }
            }
        )*
    };
}

settle_as_self!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, (),
    String, &'static str,
);

impl<T: Settle> Settle for Option<T> {
    type Settled = Option<T::Settled>;

    fn settle(self) -> Settling<Self::Settled> {
        match self {
            Some(value) => Box::pin(async move { Some(value.settle().await) }),
            None => Box::pin(ready(None)),
        }
    }
}

impl<T: Settle> Settle for Vec<T> {
    type Settled = Vec<T::Settled>;

    fn settle(self) -> Settling<Self::Settled> {
        Box::pin(async move {
            let mut settled = Vec::with_capacity(self.len());
            for item in self {
                settled.push(item.settle().await);
            }
            settled
        })
    }
}

impl<A: Settle, B: Settle> Settle for (A, B) {
    type Settled = (A::Settled, B::Settled);

    fn settle(self) -> Settling<Self::Settled> {
        Box::pin(async move {
            let first = self.0.settle().await;
            let second = self.1.settle().await;
            (first, second)
        })
    }
}

async fn settle_payload<T: Settle, E: Settle>(
    result: SyncResult<T, E>,
) -> SyncResult<T::Settled, E::Settled> {
    match result {
        SyncResult::Ok(value) => SyncResult::Ok(value.settle().await),
        SyncResult::Err(error) => SyncResult::Err(error.settle().await),
    }
}

impl<T: Settle, E: Settle> Settle for SyncResult<T, E> {
    type Settled = SyncResult<T::Settled, E::Settled>;

    fn settle(self) -> Settling<Self::Settled> {
        Box::pin(settle_payload(self))
    }
}

impl<T: Settle, E: Settle> Settle for AsyncResult<T, E> {
    type Settled = SyncResult<T::Settled, E::Settled>;

    fn settle(self) -> Settling<Self::Settled> {
        Box::pin(async move { settle_payload(self.await).await })
    }
}

impl<T, E> Settle for SharedAsyncResult<T, E>
where
    T: Settle + Clone,
    E: Settle + Clone,
{
    type Settled = SyncResult<T::Settled, E::Settled>;

    fn settle(self) -> Settling<Self::Settled> {
        Box::pin(async move { settle_payload(self.await).await })
    }
}

/// Settles both operands and compares them structurally.
///
/// `a` is settled before `b`. Either operand may be immediate or deferred,
/// so `equal(ok(1), ok_async(1))` holds.
pub async fn equal<A, B>(a: A, b: B) -> bool
where
    A: Settle,
    B: Settle<Settled = A::Settled>,
{
    let left = a.settle().await;
    let right = b.settle().await;
    left == right
}

impl<T: Settle, E: Settle> AsyncResult<T, E> {
    /// Settles both results and compares them structurally.
    pub async fn equal<B>(self, other: B) -> bool
    where
        B: Settle<Settled = SyncResult<T::Settled, E::Settled>>,
    {
        equal(self, other).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{err, err_async, ok, ok_async};
    use crate::test_utils::run_test;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    // =========================================================================
    // Immediate operands
    // =========================================================================

    #[test]
    fn equal_compares_branch_and_payload() {
        init_test("equal_compares_branch_and_payload");
        assert!(run_test(|| equal(ok::<i32, &str>(1), ok::<i32, &str>(1))));
        assert!(!run_test(|| equal(ok::<i32, i32>(1), err::<i32, i32>(1))));
        assert!(!run_test(|| equal(ok::<i32, &str>(1), ok::<i32, &str>(2))));
        assert!(run_test(|| equal(err::<i32, &str>("e"), err::<i32, &str>("e"))));
        crate::test_complete!("equal_compares_branch_and_payload");
    }

    #[test]
    fn equal_recurses_into_nested_results() {
        init_test("equal_recurses_into_nested_results");
        let outer_ok = || ok::<SyncResult<i32, i32>, i32>(ok(1));
        assert!(run_test(|| equal(outer_ok(), outer_ok())));
        assert!(!run_test(|| equal(outer_ok(), ok::<SyncResult<i32, i32>, i32>(err(1)))));
        crate::test_complete!("equal_recurses_into_nested_results");
    }

    #[test]
    fn equal_uses_ieee_float_semantics() {
        assert!(!run_test(|| equal(ok::<f64, ()>(f64::NAN), ok::<f64, ()>(f64::NAN))));
        assert!(run_test(|| equal(ok::<f64, ()>(0.0), ok::<f64, ()>(-0.0))));
    }

    #[test]
    fn equal_settles_collections() {
        let a = ok::<Vec<Option<i32>>, String>(vec![Some(1), None]);
        let b = ok::<Vec<Option<i32>>, String>(vec![Some(1), None]);
        assert!(run_test(|| equal(a, b)));

        let pair = ok::<(i32, String), ()>((1, "x".to_string()));
        assert!(!run_test(|| equal(pair, ok::<(i32, String), ()>((1, "y".to_string())))));
    }

    // =========================================================================
    // Deferred operands
    // =========================================================================

    #[test]
    fn equal_accepts_mixed_sync_and_async_operands() {
        init_test("equal_accepts_mixed_sync_and_async_operands");
        assert!(run_test(|| equal(ok::<i32, &str>(1), ok_async::<i32, &str>(1))));
        assert!(run_test(|| equal(err_async::<i32, &str>("e"), err::<i32, &str>("e"))));
        assert!(!run_test(|| equal(ok_async::<i32, &str>(1), err_async::<i32, &str>("1"))));
        crate::test_complete!("equal_accepts_mixed_sync_and_async_operands");
    }

    #[test]
    fn equal_awaits_async_results_nested_in_payloads() {
        init_test("equal_awaits_async_results_nested_in_payloads");
        let deferred_inside = ok::<AsyncResult<i32, i32>, i32>(ok_async(1));
        let immediate_inside = ok::<SyncResult<i32, i32>, i32>(ok(1));
        assert!(run_test(|| equal(deferred_inside, immediate_inside)));

        let doubly_deferred = ok_async::<AsyncResult<i32, i32>, i32>(err_async(1));
        assert!(!run_test(|| equal(doubly_deferred, ok::<SyncResult<i32, i32>, i32>(ok(1)))));
        crate::test_complete!("equal_awaits_async_results_nested_in_payloads");
    }

    #[test]
    fn equal_settles_left_before_right() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let left_log = Arc::clone(&order);
        let right_log = Arc::clone(&order);
        let left = ok_async::<i32, ()>(1).inspect(move |_| left_log.lock().push("left"));
        let right = ok_async::<i32, ()>(1).inspect(move |_| right_log.lock().push("right"));

        assert!(run_test(|| equal(left, right)));
        assert_eq!(*order.lock(), vec!["left", "right"]);
    }

    #[test]
    fn equal_is_symmetric_for_mixed_operands() {
        let forward = run_test(|| equal(ok::<i32, &str>(3), ok_async::<i32, &str>(3)));
        let backward = run_test(|| equal(ok_async::<i32, &str>(3), ok::<i32, &str>(3)));
        assert_eq!(forward, backward);
    }

    #[test]
    fn async_result_equal_method_and_shared_operands() {
        init_test("async_result_equal_method_and_shared_operands");
        assert!(run_test(|| ok_async::<i32, &str>(5).equal(ok::<i32, &str>(5))));

        let shared = err_async::<i32, &str>("e").shared();
        assert_eq!(run_test(|| shared.clone().settle()), err("e"));
        assert!(run_test(|| err_async::<i32, &str>("e").equal(shared.clone())));
        crate::test_complete!("async_result_equal_method_and_shared_operands");
    }
}
