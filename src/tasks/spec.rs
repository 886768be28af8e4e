//! # Task descriptor for supervised execution.
//!
//! Defines [`TaskSpec`]: a task paired with an optional set of
//! [`PolicyOverrides`]. Fields left unset in the overrides fall back to the
//! supervisor's global [`Policy`](crate::Policy) when the runner is started.
//!
//! A spec can be created:
//! - **Bare** with [`TaskSpec::new`] (inherits the whole global policy)
//! - **With overrides** via [`TaskSpec::with_overrides`] or the `with_*` setters
//! - **Fluently** with [`TaskSpec::builder`]

use std::sync::Arc;
use std::time::Duration;

use crate::policies::{FaultHandler, MaxRetries, PolicyOverrides};
use crate::tasks::TaskRef;

/// Task descriptor: a task plus its optional partial policy.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use rootvisor::{MaxRetries, TaskError, TaskFn, TaskRef, TaskSpec};
///
/// let sync: TaskRef = TaskFn::arc("sync", |_ctx: CancellationToken| async move {
///     Ok::<(), TaskError>(())
/// });
///
/// // Inherit everything from the global policy:
/// let bare = TaskSpec::new(sync.clone());
/// assert!(bare.overrides().is_none());
///
/// // Override a single field:
/// let spec = TaskSpec::new(sync).with_max_retries(MaxRetries::Limited(3));
/// let overrides = spec.overrides().unwrap();
/// assert_eq!(overrides.max_retries, Some(MaxRetries::Limited(3)));
/// assert_eq!(overrides.restart_delay, None::<Duration>);
/// ```
#[derive(Clone)]
pub struct TaskSpec {
    task: TaskRef,
    overrides: Option<PolicyOverrides>,
}

impl TaskSpec {
    /// Creates a descriptor without overrides.
    pub fn new(task: TaskRef) -> Self {
        Self {
            task,
            overrides: None,
        }
    }

    /// Creates a descriptor with the given partial policy.
    pub fn with_overrides(task: TaskRef, overrides: PolicyOverrides) -> Self {
        Self {
            task,
            overrides: Some(overrides),
        }
    }

    /// Returns reference to the task.
    pub fn task(&self) -> &TaskRef {
        &self.task
    }

    /// Convenience: returns the task name.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// Returns the partial policy, if one was supplied.
    pub fn overrides(&self) -> Option<&PolicyOverrides> {
        self.overrides.as_ref()
    }

    /// Returns a new spec overriding the fault handler.
    pub fn with_on_fault(mut self, handler: impl FaultHandler) -> Self {
        self.overrides_mut().on_fault = Some(Arc::new(handler));
        self
    }

    /// Returns a new spec overriding the restart delay.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.overrides_mut().restart_delay = Some(delay);
        self
    }

    /// Returns a new spec overriding the retry budget.
    pub fn with_max_retries(mut self, max_retries: impl Into<MaxRetries>) -> Self {
        self.overrides_mut().max_retries = Some(max_retries.into());
        self
    }

    fn overrides_mut(&mut self) -> &mut PolicyOverrides {
        self.overrides.get_or_insert_with(PolicyOverrides::default)
    }
}

impl From<TaskRef> for TaskSpec {
    fn from(task: TaskRef) -> Self {
        TaskSpec::new(task)
    }
}

impl std::fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSpec")
            .field("task", &self.task.name())
            .field("overrides", &self.overrides)
            .finish()
    }
}
