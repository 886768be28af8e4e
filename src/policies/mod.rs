//! Recovery policies.
//!
//! This module groups the knobs that control **what happens** when a task
//! attempt faults: who is told about it, how long to wait, and how many times
//! to try again.
//!
//! ## Contents
//! - [`Policy`] fully-populated policy (global defaults or per-task effective policy)
//! - [`PolicyOverrides`] partial, per-task policy; unset fields fall back to the global one
//! - [`resolve`] merges overrides into the global policy, field by field
//! - [`MaxRetries`] retry budget (limited / unbounded)
//! - [`FaultHandler`] callback invoked on every fault, with [`LogFaults`] and [`FaultFn`]
//!
//! ## Quick wiring
//! ```text
//! Supervisor { global: Policy }
//!      └─► start(Vec<TaskSpec { task, overrides }>)
//!           └─► resolve(&global, overrides) ─► effective Policy
//!                └─► core::actor::TaskActor uses:
//!                     - on_fault to report each fault
//!                     - max_retries to decide retry / give up
//!                     - restart_delay to wait between attempts
//! ```
//!
//! ## Defaults
//! - `on_fault = LogFaults` (WARN with task name and fault).
//! - `restart_delay = 1000ms`.
//! - `max_retries = MaxRetries::Unbounded`.

mod handler;
mod policy;
mod resolve;
mod retries;

pub use handler::{FaultFn, FaultHandler, LogFaults};
pub use policy::{Policy, PolicyOverrides};
pub use resolve::resolve;
pub use retries::MaxRetries;
