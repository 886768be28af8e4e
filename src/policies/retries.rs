//! # Retry budget for task runners.
//!
//! [`MaxRetries`] bounds how many times a faulted task is attempted again.
//! The budget counts retries **after** the first attempt:
//!
//! ```text
//! MaxRetries::Limited(0)   → 1 attempt, never retried
//! MaxRetries::Limited(k)   → up to k + 1 attempts
//! MaxRetries::Unbounded    → retried forever (default)
//! ```
//!
//! ## Backoff quirk
//! A runner only waits `restart_delay` before a retry when the budget is
//! greater than one (`Limited(n)` with `n > 1`, or `Unbounded`). A task
//! allowed exactly one retry is restarted immediately. This asymmetry is
//! deliberate and kept stable; see [`MaxRetries::waits_before_retry`].

/// Number of retries allowed after the first attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaxRetries {
    /// At most this many retries.
    Limited(u32),
    /// Retry until the task succeeds (default).
    #[default]
    Unbounded,
}

impl MaxRetries {
    /// Returns `true` once `retries` already performed use up the budget.
    ///
    /// `Unbounded` is never exhausted.
    ///
    /// # Example
    /// ```
    /// use rootvisor::MaxRetries;
    ///
    /// assert!(MaxRetries::Limited(0).is_exhausted(0));
    /// assert!(!MaxRetries::Limited(2).is_exhausted(1));
    /// assert!(MaxRetries::Limited(2).is_exhausted(2));
    /// assert!(!MaxRetries::Unbounded.is_exhausted(u64::MAX));
    /// ```
    #[inline]
    pub fn is_exhausted(self, retries: u64) -> bool {
        match self {
            MaxRetries::Limited(max) => retries >= u64::from(max),
            MaxRetries::Unbounded => false,
        }
    }

    /// Whether the runner sleeps `restart_delay` before each retry.
    ///
    /// Only budgets greater than one wait; `Limited(1)` retries immediately.
    #[inline]
    pub fn waits_before_retry(self) -> bool {
        match self {
            MaxRetries::Limited(max) => max > 1,
            MaxRetries::Unbounded => true,
        }
    }

    /// Total number of attempts allowed, or `None` when unbounded.
    #[inline]
    pub fn max_attempts(self) -> Option<u64> {
        match self {
            MaxRetries::Limited(max) => Some(u64::from(max) + 1),
            MaxRetries::Unbounded => None,
        }
    }
}

impl From<u32> for MaxRetries {
    fn from(max: u32) -> Self {
        MaxRetries::Limited(max)
    }
}

impl From<Option<u32>> for MaxRetries {
    /// `None` means unbounded.
    fn from(max: Option<u32>) -> Self {
        max.map_or(MaxRetries::Unbounded, MaxRetries::Limited)
    }
}
