//! Shared fixtures for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio_util::sync::CancellationToken;

use crate::{FaultFn, FaultHandler, TaskError, TaskFn, TaskRef};

/// Task that faults on its first `failures` attempts and succeeds afterwards.
///
/// Every attempt increments `attempts`.
pub(crate) fn flaky_task(
    name: &'static str,
    failures: usize,
    attempts: Arc<AtomicUsize>,
) -> TaskRef {
    TaskFn::arc(name, move |_ctx: CancellationToken| {
        let attempts = Arc::clone(&attempts);
        async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= failures {
                Err(TaskError::fail(format!("attempt {n} failed")))
            } else {
                Ok(())
            }
        }
    })
}

/// Task that faults on every attempt.
pub(crate) fn failing_task(name: &'static str, attempts: Arc<AtomicUsize>) -> TaskRef {
    flaky_task(name, usize::MAX, attempts)
}

/// Handler that only counts invocations.
pub(crate) fn counting_handler(faults: Arc<AtomicUsize>) -> impl FaultHandler {
    FaultFn::new(move |_fault, _task, _policy| {
        faults.fetch_add(1, Ordering::SeqCst);
    })
}

/// Fresh shared counter.
pub(crate) fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

/// Reads a shared counter.
pub(crate) fn count(c: &AtomicUsize) -> usize {
    c.load(Ordering::SeqCst)
}
