//! Error types used by the supervisor and tasks.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`] — errors raised by the supervisor itself.
//! - [`TaskError`] — faults raised by individual task attempts.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the supervisor.
///
/// The core never fails on its own; this is only returned when the host asks
/// for a shutdown and some runners do not stop in time.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; the listed runners were aborted.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of the tasks whose runners did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rootvisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck tasks={stuck:?}")
            }
        }
    }
}

/// # Faults raised by a task attempt.
///
/// Every variant is a fault: it is handed to the task's fault handler and
/// counts against its retry budget. The one exception is
/// [`TaskError::Canceled`] returned after the host cancelled the runner, which
/// ends the runner quietly.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {reason}")]
    Fail {
        /// The underlying error message.
        reason: String,
    },

    /// The attempt panicked; the panic was captured by the runner.
    #[error("panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// Arbitrary error payload produced by the task.
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// Task observed cancellation and stopped.
    ///
    /// A graceful stop only once the host has cancelled the runner; returned
    /// at any other time it is a fault like the other variants.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use rootvisor::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Other(_) => "task_error",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { reason } => format!("error: {reason}"),
            TaskError::Panicked { info } => format!("panic: {info}"),
            TaskError::Other(e) => format!("error: {e:#}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }

    /// True for [`TaskError::Canceled`].
    ///
    /// Whether it ends the runner or counts as a fault depends on whether the
    /// host has cancelled the runner.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}
