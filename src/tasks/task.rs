//! # Task abstraction.
//!
//! A [`Task`] is an opaque async operation: each call to [`Task::run`] is one
//! attempt that either completes (`Ok(())`) or raises a fault (`Err`).
//! The common handle type is [`TaskRef`], an `Arc<dyn Task>` shared with the runner.
//!
//! The [`CancellationToken`] passed to every attempt is only cancelled when the
//! host shuts the supervisor down; tasks that never need that may ignore it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous unit supervised by a runner.
///
/// A `Task` has a stable [`name`](Task::name), used in fault reports, and an
/// async [`run`](Task::run) method invoked once per attempt.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use rootvisor::{Task, TaskError};
///
/// struct Poller;
///
/// #[async_trait]
/// impl Task for Poller {
///     fn name(&self) -> &str { "poller" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // poll something...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes one attempt of the task.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
