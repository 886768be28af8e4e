use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::policies::{FaultHandler, MaxRetries, PolicyOverrides};
use crate::{TaskError, TaskFn, TaskRef, TaskSpec};

/// Builder for [`TaskSpec`] with fluent API.
///
/// Only the fields set on the builder become overrides; everything else is
/// resolved from the supervisor's global policy.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use rootvisor::{TaskError, TaskSpec};
///
/// let spec = TaskSpec::builder("flaky")
///     .max_retries(3)
///     .restart_delay(Duration::from_millis(250))
///     .build(|_ctx: CancellationToken| async move { Err::<(), _>(TaskError::fail("boom")) });
///
/// assert_eq!(spec.name(), "flaky");
/// assert!(spec.overrides().unwrap().on_fault.is_none());
/// ```
#[derive(Clone)]
pub struct TaskSpecBuilder {
    name: Cow<'static, str>,
    overrides: Option<PolicyOverrides>,
}

impl TaskSpecBuilder {
    /// Creates a new builder with the given task name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            overrides: None,
        }
    }

    /// Overrides the fault handler.
    pub fn on_fault(mut self, handler: impl FaultHandler) -> Self {
        self.overrides_mut().on_fault = Some(Arc::new(handler));
        self
    }

    /// Overrides the delay between a fault and the next attempt.
    pub fn restart_delay(mut self, delay: Duration) -> Self {
        self.overrides_mut().restart_delay = Some(delay);
        self
    }

    /// Overrides the retry budget.
    pub fn max_retries(mut self, max_retries: impl Into<MaxRetries>) -> Self {
        self.overrides_mut().max_retries = Some(max_retries.into());
        self
    }

    /// Builds a [`TaskSpec`] from a closure.
    pub fn build<F, Fut>(self, f: F) -> TaskSpec
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let task: TaskRef = TaskFn::arc(self.name.clone(), f);
        self.build_from_task(task)
    }

    /// Builds a [`TaskSpec`] from an existing task.
    ///
    /// The builder's name is ignored; the task reports its own.
    pub fn build_from_task(self, task: TaskRef) -> TaskSpec {
        match self.overrides {
            Some(overrides) => TaskSpec::with_overrides(task, overrides),
            None => TaskSpec::new(task),
        }
    }

    fn overrides_mut(&mut self) -> &mut PolicyOverrides {
        self.overrides.get_or_insert_with(PolicyOverrides::default)
    }
}

impl TaskSpec {
    /// Creates a builder for constructing a [`TaskSpec`] with fluent API.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> TaskSpecBuilder {
        TaskSpecBuilder::new(name)
    }
}
