//! # Global and per-task recovery policy.
//!
//! [`Policy`] is the fully-populated record a runner works from.
//! [`PolicyOverrides`] is its partial counterpart attached to a single task;
//! see [`resolve`](crate::resolve) for how the two are merged.
//!
//! ## Field semantics
//! - `on_fault`: invoked once per faulted attempt (default [`LogFaults`])
//! - `restart_delay`: wait after a fault before the next attempt (default `1000ms`)
//! - `max_retries`: retries allowed after the first attempt (default unbounded)

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::policies::{FaultHandler, LogFaults, MaxRetries};

/// Fully-populated recovery policy.
///
/// Used both as the supervisor's global defaults and as a task's effective
/// policy. Cloning is cheap: the handler is shared behind an `Arc`.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use rootvisor::{MaxRetries, Policy};
///
/// let policy = Policy::default()
///     .with_restart_delay(Duration::from_millis(200))
///     .with_max_retries(5);
///
/// assert_eq!(policy.restart_delay, Duration::from_millis(200));
/// assert_eq!(policy.max_retries, MaxRetries::Limited(5));
/// ```
#[derive(Clone)]
pub struct Policy {
    /// Handler invoked on every fault.
    pub on_fault: Arc<dyn FaultHandler>,
    /// Delay between a fault and the next attempt.
    pub restart_delay: Duration,
    /// Retries allowed after the first attempt.
    pub max_retries: MaxRetries,
}

impl Policy {
    /// Returns a new policy with the given fault handler.
    pub fn with_on_fault(mut self, handler: impl FaultHandler) -> Self {
        self.on_fault = Arc::new(handler);
        self
    }

    /// Returns a new policy with an already shared fault handler.
    pub fn with_shared_on_fault(mut self, handler: Arc<dyn FaultHandler>) -> Self {
        self.on_fault = handler;
        self
    }

    /// Returns a new policy with the given restart delay.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Returns a new policy with the given retry budget.
    pub fn with_max_retries(mut self, max_retries: impl Into<MaxRetries>) -> Self {
        self.max_retries = max_retries.into();
        self
    }
}

impl Default for Policy {
    /// Default policy:
    ///
    /// - `on_fault = LogFaults` (WARN with task name and fault)
    /// - `restart_delay = 1000ms`
    /// - `max_retries = MaxRetries::Unbounded`
    fn default() -> Self {
        Self {
            on_fault: Arc::new(LogFaults),
            restart_delay: Duration::from_millis(1000),
            max_retries: MaxRetries::Unbounded,
        }
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("on_fault", &self.on_fault.name())
            .field("restart_delay", &self.restart_delay)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Partial policy supplied with a single task.
///
/// Every field is optional; `None` means "use the global value".
#[derive(Clone, Default)]
pub struct PolicyOverrides {
    /// Handler override.
    pub on_fault: Option<Arc<dyn FaultHandler>>,
    /// Restart delay override.
    pub restart_delay: Option<Duration>,
    /// Retry budget override.
    pub max_retries: Option<MaxRetries>,
}

impl PolicyOverrides {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fault handler override.
    pub fn with_on_fault(mut self, handler: impl FaultHandler) -> Self {
        self.on_fault = Some(Arc::new(handler));
        self
    }

    /// Sets the restart delay override.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = Some(delay);
        self
    }

    /// Sets the retry budget override.
    pub fn with_max_retries(mut self, max_retries: impl Into<MaxRetries>) -> Self {
        self.max_retries = Some(max_retries.into());
        self
    }

    /// True if no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_fault.is_none() && self.restart_delay.is_none() && self.max_retries.is_none()
    }
}

impl fmt::Debug for PolicyOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyOverrides")
            .field("on_fault", &self.on_fault.as_ref().map(|h| h.name()))
            .field("restart_delay", &self.restart_delay)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
