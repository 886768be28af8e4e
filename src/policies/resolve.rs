//! # Option resolution.
//!
//! Merges a task's [`PolicyOverrides`] into the global [`Policy`] field by field.
//!
//! ```text
//! global:     { on_fault: G, restart_delay: 1s,   max_retries: 2 }
//! overrides:  { on_fault: -, restart_delay: -,    max_retries: 3 }
//! effective:  { on_fault: G, restart_delay: 1s,   max_retries: 3 }
//! ```
//!
//! Unset fields always come from the global policy, never from
//! `Policy::default()`.

use std::sync::Arc;

use crate::policies::{Policy, PolicyOverrides};

/// Computes a task's effective policy.
///
/// Pure and infallible; the supervisor calls it once per task before the
/// runner starts.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rootvisor::{resolve, MaxRetries, Policy, PolicyOverrides};
///
/// let global = Policy::default()
///     .with_restart_delay(Duration::ZERO)
///     .with_max_retries(2);
/// let overrides = PolicyOverrides::new().with_max_retries(3);
///
/// let effective = resolve(&global, Some(&overrides));
/// assert_eq!(effective.max_retries, MaxRetries::Limited(3));
/// assert_eq!(effective.restart_delay, Duration::ZERO);
/// ```
pub fn resolve(global: &Policy, overrides: Option<&PolicyOverrides>) -> Policy {
    let Some(overrides) = overrides else {
        return global.clone();
    };

    Policy {
        on_fault: overrides
            .on_fault
            .as_ref()
            .map_or_else(|| Arc::clone(&global.on_fault), Arc::clone),
        restart_delay: overrides.restart_delay.unwrap_or(global.restart_delay),
        max_retries: overrides.max_retries.unwrap_or(global.max_retries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{FaultFn, MaxRetries};
    use std::time::Duration;

    fn global() -> Policy {
        Policy::default()
            .with_on_fault(FaultFn::new(|_, _, _| {}))
            .with_restart_delay(Duration::from_millis(10))
            .with_max_retries(2)
    }

    #[test]
    fn test_no_overrides_returns_global() {
        let global = global();
        let effective = resolve(&global, None);

        assert!(Arc::ptr_eq(&effective.on_fault, &global.on_fault));
        assert_eq!(effective.restart_delay, global.restart_delay);
        assert_eq!(effective.max_retries, global.max_retries);
    }

    #[test]
    fn test_empty_overrides_fall_back_to_global_not_defaults() {
        let global = global();
        let overrides = PolicyOverrides::new();
        assert!(overrides.is_empty());

        let effective = resolve(&global, Some(&overrides));

        assert!(Arc::ptr_eq(&effective.on_fault, &global.on_fault));
        assert_eq!(effective.restart_delay, Duration::from_millis(10));
        assert_eq!(effective.max_retries, MaxRetries::Limited(2));
    }

    #[test]
    fn test_each_field_overrides_independently() {
        let global = global();

        let only_retries = PolicyOverrides::new().with_max_retries(3);
        let effective = resolve(&global, Some(&only_retries));
        assert_eq!(effective.max_retries, MaxRetries::Limited(3));
        assert_eq!(effective.restart_delay, Duration::from_millis(10));
        assert!(Arc::ptr_eq(&effective.on_fault, &global.on_fault));

        let only_delay = PolicyOverrides::new().with_restart_delay(Duration::ZERO);
        let effective = resolve(&global, Some(&only_delay));
        assert_eq!(effective.restart_delay, Duration::ZERO);
        assert_eq!(effective.max_retries, MaxRetries::Limited(2));

        let only_handler = PolicyOverrides::new().with_on_fault(FaultFn::new(|_, _, _| {}));
        let effective = resolve(&global, Some(&only_handler));
        assert!(!Arc::ptr_eq(&effective.on_fault, &global.on_fault));
        assert_eq!(effective.restart_delay, Duration::from_millis(10));
        assert_eq!(effective.max_retries, MaxRetries::Limited(2));
    }

    #[test]
    fn test_override_can_lift_bound() {
        let global = global();
        let overrides = PolicyOverrides::new().with_max_retries(MaxRetries::Unbounded);
        let effective = resolve(&global, Some(&overrides));
        assert_eq!(effective.max_retries, MaxRetries::Unbounded);
    }
}
