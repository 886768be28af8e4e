//! # Fault handlers
//!
//! [`FaultHandler`] is the extension point invoked by a task runner every time
//! an attempt faults, **before** the retry decision is made. It receives the
//! fault, the task and the task's effective [`Policy`].
//!
//! ## Contract
//! - Called synchronously from the runner; keep it short (log, count, notify).
//! - Its return value is ignored and its panics are **not** caught by the
//!   runner: a panicking handler terminates that task's runner only.
//!
//! ## Built-in handlers
//! - [`LogFaults`] reports the fault at `WARN` via `tracing` (the default).
//! - [`FaultFn`] adapts a closure.

use std::fmt;

use tracing::warn;

use crate::error::TaskError;
use crate::policies::Policy;
use crate::tasks::Task;

/// Callback invoked on every task fault.
pub trait FaultHandler: Send + Sync + 'static {
    /// Handle a single fault of `task`.
    ///
    /// # Parameters
    /// - `fault`: the error raised by the attempt
    /// - `task`: the task that faulted (use [`Task::name`] for reports)
    /// - `policy`: the task's effective policy
    fn on_fault(&self, fault: &TaskError, task: &dyn Task, policy: &Policy);

    /// Human-readable name (for debug output).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Default handler: reports the fault and task name at `WARN`.
///
/// ## Example output (with `tracing_subscriber::fmt`)
/// ```text
/// WARN rootvisor::policies::handler: task has failed task="poller" error=execution failed: connection refused
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFaults;

impl FaultHandler for LogFaults {
    fn on_fault(&self, fault: &TaskError, task: &dyn Task, _policy: &Policy) {
        warn!(task = task.name(), error = %fault, "task has failed");
    }

    fn name(&self) -> &'static str {
        "LogFaults"
    }
}

/// Closure-backed fault handler.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use rootvisor::{FaultFn, Policy};
///
/// let faults = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&faults);
/// let policy = Policy::default().with_on_fault(FaultFn::new(move |_fault, _task, _policy| {
///     seen.fetch_add(1, Ordering::Relaxed);
/// }));
/// assert_eq!(policy.on_fault.name(), "FaultFn");
/// ```
pub struct FaultFn<F> {
    f: F,
}

impl<F> FaultFn<F> {
    /// Wraps `f` as a [`FaultHandler`].
    pub fn new(f: F) -> Self
    where
        F: Fn(&TaskError, &dyn Task, &Policy) + Send + Sync + 'static,
    {
        Self { f }
    }
}

impl<F> FaultHandler for FaultFn<F>
where
    F: Fn(&TaskError, &dyn Task, &Policy) + Send + Sync + 'static,
{
    fn on_fault(&self, fault: &TaskError, task: &dyn Task, policy: &Policy) {
        (self.f)(fault, task, policy)
    }

    fn name(&self) -> &'static str {
        "FaultFn"
    }
}

impl<F> fmt::Debug for FaultFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FaultFn")
    }
}
