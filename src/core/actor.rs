//! # TaskActor: single-task runner.
//!
//! Supervises execution of one [`Task`] under its effective [`Policy`]:
//! - reports every fault through [`Policy::on_fault`],
//! - retries up to [`Policy::max_retries`] times,
//! - waits [`Policy::restart_delay`] between attempts (see the quirk below),
//! - stops cooperatively when the host cancels the runtime token.
//!
//! ## State machine
//! ```text
//!            ┌────────────────────────────────────────────┐
//!            ▼                                            │
//!   ──► ATTEMPT ── Ok ──────────────────────────► DONE    │
//!            │                                      ▲     │
//!            └─ Err ─► FAULTED ─ on_fault(..)       │     │
//!                         │                         │     │
//!                         ├─ retries >= max ────────┘     │
//!                         └─ retries += 1                 │
//!                              ├─ max > 1 ─► BACKOFF ─────┤ sleep(restart_delay)
//!                              └─ max <= 1 ───────────────┘ (no wait)
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** within one actor (never parallel)
//! - `on_fault` is called **exactly once per faulted attempt**, before the retry decision
//! - Success and exhaustion are both **silent** terminal states
//! - Backoff is only awaited when the retry budget is greater than one;
//!   `MaxRetries::Limited(1)` restarts immediately

use tokio::{select, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    core::runner::run_once,
    policies::{MaxRetries, Policy},
    tasks::TaskRef,
};

/// Decision taken after a fault has been reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AfterFault {
    /// Retry budget exhausted; the task is permanently stopped.
    GiveUp,
    /// Attempt again, optionally sleeping `restart_delay` first.
    Retry { backoff: bool },
}

/// Decides what follows a fault, given the retries already performed.
fn after_fault(retries: u64, max_retries: MaxRetries) -> AfterFault {
    if max_retries.is_exhausted(retries) {
        AfterFault::GiveUp
    } else {
        AfterFault::Retry {
            backoff: max_retries.waits_before_retry(),
        }
    }
}

/// Runs a single task with retries under its effective policy.
///
/// ### Rules
/// - The policy is resolved by the supervisor and **never mutated** here
/// - The retry counter is private to this actor
/// - Cancellation is checked at **safe points** (before an attempt, during backoff)
pub struct TaskActor {
    /// Task to execute.
    pub task: TaskRef,
    /// Effective policy for this task.
    pub policy: Policy,
}

impl TaskActor {
    /// Creates a new task actor.
    pub fn new(task: TaskRef, policy: Policy) -> Self {
        Self { task, policy }
    }

    /// Runs the actor until success, retry exhaustion, or cancellation.
    ///
    /// ### Exit conditions
    /// - The task completes an attempt with `Ok(())`
    /// - The task faults with no retries left (after reporting the fault)
    /// - `runtime_token` is cancelled (host shutdown), including an attempt
    ///   returning [`TaskError::Canceled`](crate::TaskError::Canceled) after it
    ///
    /// A `Canceled` returned while the token is still live is a fault.
    ///
    /// None of these is reported back to the supervisor.
    pub async fn run(self, runtime_token: CancellationToken) {
        let name = self.task.name();
        let mut retries: u64 = 0;

        loop {
            if runtime_token.is_cancelled() {
                break;
            }

            let attempt = retries.saturating_add(1);
            trace!(
                task = name,
                attempt,
                max_attempts = ?self.policy.max_retries.max_attempts(),
                "starting attempt"
            );
            let fault = match run_once(self.task.as_ref(), &runtime_token).await {
                Ok(()) => break,
                Err(e) if e.is_canceled() && runtime_token.is_cancelled() => break,
                Err(e) => e,
            };

            self.policy
                .on_fault
                .on_fault(&fault, self.task.as_ref(), &self.policy);

            match after_fault(retries, self.policy.max_retries) {
                AfterFault::GiveUp => break,
                AfterFault::Retry { backoff } => {
                    retries = retries.saturating_add(1);
                    if !backoff {
                        continue;
                    }

                    let delay = self.policy.restart_delay;
                    debug!(task = name, ?delay, retry = retries, "backoff scheduled");

                    let sleep = time::sleep(delay);
                    tokio::pin!(sleep);
                    select! {
                        _ = &mut sleep => {}
                        _ = runtime_token.cancelled() => { break; }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{count, counter, counting_handler, failing_task, flaky_task};
    use crate::{FaultFn, TaskError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::Instant;

    fn policy(max_retries: MaxRetries, delay: Duration, faults: Arc<AtomicUsize>) -> Policy {
        Policy::default()
            .with_on_fault(counting_handler(faults))
            .with_restart_delay(delay)
            .with_max_retries(max_retries)
    }

    #[test]
    fn test_after_fault_decisions() {
        assert_eq!(after_fault(0, MaxRetries::Limited(0)), AfterFault::GiveUp);
        assert_eq!(
            after_fault(0, MaxRetries::Limited(1)),
            AfterFault::Retry { backoff: false }
        );
        assert_eq!(after_fault(1, MaxRetries::Limited(1)), AfterFault::GiveUp);
        assert_eq!(
            after_fault(0, MaxRetries::Limited(2)),
            AfterFault::Retry { backoff: true }
        );
        assert_eq!(
            after_fault(1, MaxRetries::Limited(2)),
            AfterFault::Retry { backoff: true }
        );
        assert_eq!(after_fault(2, MaxRetries::Limited(2)), AfterFault::GiveUp);
        assert_eq!(
            after_fault(u64::MAX, MaxRetries::Unbounded),
            AfterFault::Retry { backoff: true }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_never_reports() {
        let attempts = counter();
        let faults = counter();
        let actor = TaskActor::new(
            flaky_task("ok", 0, attempts.clone()),
            policy(MaxRetries::Limited(0), Duration::from_secs(1), faults.clone()),
        );

        actor.run(CancellationToken::new()).await;

        assert_eq!(count(&attempts), 1);
        assert_eq!(count(&faults), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_runs_k_plus_one_times() {
        for k in [0u32, 1, 2, 5] {
            let attempts = counter();
            let faults = counter();
            let actor = TaskActor::new(
                failing_task("doomed", attempts.clone()),
                policy(MaxRetries::Limited(k), Duration::ZERO, faults.clone()),
            );

            actor.run(CancellationToken::new()).await;

            let expected = k as usize + 1;
            assert_eq!(count(&attempts), expected, "attempts for k={k}");
            assert_eq!(count(&faults), expected, "faults for k={k}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_retries_until_success() {
        let delay = Duration::from_millis(10);
        let attempts = counter();
        let faults = counter();
        let actor = TaskActor::new(
            flaky_task("flaky", 4, attempts.clone()),
            policy(MaxRetries::Unbounded, delay, faults.clone()),
        );

        let started = Instant::now();
        actor.run(CancellationToken::new()).await;

        let elapsed = started.elapsed();
        assert_eq!(count(&attempts), 5);
        assert_eq!(count(&faults), 4);
        assert!(elapsed >= delay * 4, "expected a wait before each retry, got {elapsed:?}");
        assert!(elapsed < delay * 5, "got {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_retry_skips_backoff() {
        let delay = Duration::from_secs(1);
        let attempts = counter();
        let actor = TaskActor::new(
            failing_task("once-more", attempts.clone()),
            policy(MaxRetries::Limited(1), delay, counter()),
        );

        let started = Instant::now();
        actor.run(CancellationToken::new()).await;

        assert_eq!(count(&attempts), 2);
        let elapsed = started.elapsed();
        assert!(elapsed < delay, "no wait expected, got {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_retries_wait_before_each() {
        let delay = Duration::from_secs(1);
        let attempts = counter();
        let actor = TaskActor::new(
            failing_task("twice-more", attempts.clone()),
            policy(MaxRetries::Limited(2), delay, counter()),
        );

        let started = Instant::now();
        actor.run(CancellationToken::new()).await;

        let elapsed = started.elapsed();
        assert_eq!(count(&attempts), 3);
        assert!(elapsed >= delay * 2, "expected two waits, got {elapsed:?}");
        assert!(elapsed < delay * 3, "expected two waits, got {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_final_fault() {
        let delay = Duration::from_secs(1);
        let actor = TaskActor::new(
            failing_task("final", counter()),
            policy(MaxRetries::Limited(3), delay, counter()),
        );

        let started = Instant::now();
        actor.run(CancellationToken::new()).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= delay * 3 && elapsed < delay * 4, "got {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_handler_sees_fault_task_and_effective_policy() {
        let seen: Arc<Mutex<Vec<(String, String, MaxRetries)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let policy = Policy::default()
            .with_on_fault(FaultFn::new(move |fault, task, policy| {
                if let Ok(mut seen) = sink.lock() {
                    seen.push((
                        task.name().to_string(),
                        fault.to_string(),
                        policy.max_retries,
                    ));
                }
            }))
            .with_restart_delay(Duration::ZERO)
            .with_max_retries(1);

        TaskActor::new(failing_task("reporter", counter()), policy)
            .run(CancellationToken::new())
            .await;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "reporter");
        assert_eq!(seen[0].1, "execution failed: attempt 1 failed");
        assert_eq!(seen[1].1, "execution failed: attempt 2 failed");
        assert!(seen.iter().all(|(_, _, max)| *max == MaxRetries::Limited(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_stops_actor() {
        let attempts = counter();
        let faults = counter();
        let actor = TaskActor::new(
            failing_task("sleepy", attempts.clone()),
            policy(MaxRetries::Unbounded, Duration::from_secs(3600), faults.clone()),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(actor.run(token.clone()));

        while count(&faults) == 0 {
            tokio::task::yield_now().await;
        }
        token.cancel();
        handle.await.expect("actor joined");

        assert_eq!(count(&attempts), 1);
        assert_eq!(count(&faults), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_canceled_after_host_cancel_is_graceful() {
        let attempts = counter();
        let faults = counter();
        let seen = Arc::clone(&attempts);
        let task = crate::TaskFn::arc("listener", move |ctx: CancellationToken| {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                ctx.cancelled().await;
                Err::<(), _>(TaskError::Canceled)
            }
        });
        let token = CancellationToken::new();
        let actor = TaskActor::new(
            task,
            policy(MaxRetries::Unbounded, Duration::ZERO, faults.clone()),
        );
        let handle = tokio::spawn(actor.run(token.clone()));

        while count(&attempts) == 0 {
            tokio::task::yield_now().await;
        }
        token.cancel();
        handle.await.expect("actor joined");

        assert_eq!(count(&attempts), 1);
        assert_eq!(count(&faults), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_canceled_without_host_cancel_is_a_fault() {
        let attempts = counter();
        let faults = counter();
        let seen = Arc::clone(&attempts);
        let task = crate::TaskFn::arc("quitter", move |_ctx: CancellationToken| {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TaskError::Canceled)
            }
        });

        TaskActor::new(task, policy(MaxRetries::Limited(2), Duration::ZERO, faults.clone()))
            .run(CancellationToken::new())
            .await;

        assert_eq!(count(&attempts), 3);
        assert_eq!(count(&faults), 3);
    }
}
