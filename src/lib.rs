//! # rootvisor
//!
//! **Rootvisor** starts a fixed set of long-running async tasks and keeps each
//! of them alive under its own recovery policy. One task faulting, or running
//! out of retries, never affects its siblings or the supervisor.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   TaskSpec   │   │   TaskSpec   │   │   TaskSpec   │
//!     │ task (+over- │   │ task (+over- │   │ task (+over- │
//!     │   rides)     │   │   rides)     │   │   rides)     │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor { global: Policy }                                    │
//! │  - resolve(&global, overrides) → effective Policy (once per task) │
//! │  - tokio::spawn one TaskActor per spec (detached)                 │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  TaskActor   │   │  TaskActor   │   │  TaskActor   │
//!     │ (retry loop) │   │ (retry loop) │   │ (retry loop) │
//!     └──────────────┘   └──────────────┘   └──────────────┘
//!            │ faults go to the effective policy's on_fault handler
//!            ▼
//!       FaultHandler (LogFaults by default → tracing WARN)
//! ```
//!
//! ### Lifecycle
//! ```text
//! TaskSpec ──► Supervisor::start() ──► TaskActor::run()
//!
//! retries = 0
//! loop {
//!   ├─► run_once(task)                      (panics are captured as faults)
//!   │       ├─ Ok  ──► exit (silent)
//!   │       └─ Err ──► policy.on_fault(fault, task, policy)
//!   │                  ├─ retries >= max_retries ─► exit (silent, no escalation)
//!   │                  └─ retries += 1
//!   │                       ├─ max_retries > 1  ─► sleep(restart_delay)
//!   │                       └─ max_retries <= 1 ─► retry immediately
//!   └─ also exits when the host cancels via SupervisorHandle::shutdown
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Supervision**   | Launch detached runners and optionally join or cancel them.  | [`Supervisor`], [`SupervisorHandle`]        |
//! | **Policies**      | Global defaults with per-task, field-by-field overrides.     | [`Policy`], [`PolicyOverrides`], [`resolve`]|
//! | **Retries**       | Bounded or unbounded retry budget.                           | [`MaxRetries`]                              |
//! | **Fault reports** | Hook called on every fault.                                  | [`FaultHandler`], [`LogFaults`], [`FaultFn`]|
//! | **Errors**        | Typed errors for task faults and shutdown.                   | [`TaskError`], [`RuntimeError`]             |
//! | **Tasks**         | Define tasks as functions or trait objects.                  | [`Task`], [`TaskFn`], [`TaskRef`], [`TaskSpec`] |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use rootvisor::{MaxRetries, Policy, Supervisor, TaskError, TaskFn, TaskRef, TaskSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // Global policy: at most 2 retries, 10ms apart.
//!     let global = Policy::default()
//!         .with_restart_delay(Duration::from_millis(10))
//!         .with_max_retries(2);
//!
//!     let hello: TaskRef = TaskFn::arc("hello", |_ctx: CancellationToken| async move {
//!         println!("Hello from task!");
//!         Ok::<(), TaskError>(())
//!     });
//!
//!     let broken: TaskRef = TaskFn::arc("broken", |_ctx: CancellationToken| async move {
//!         Err::<(), _>(TaskError::fail("no route to host"))
//!     });
//!
//!     let specs = vec![
//!         TaskSpec::new(hello),
//!         // This one never retries, whatever the global policy says.
//!         TaskSpec::new(broken).with_max_retries(MaxRetries::Limited(0)),
//!     ];
//!
//!     Supervisor::new(global).run(specs).await;
//! }
//! ```
mod core;
mod error;
mod policies;
mod tasks;

#[cfg(test)]
mod test_support;

// ---- Public re-exports ----

pub use crate::core::{Supervisor, SupervisorHandle};
pub use crate::error::{RuntimeError, TaskError};
pub use crate::policies::{
    FaultFn, FaultHandler, LogFaults, MaxRetries, Policy, PolicyOverrides, resolve,
};
pub use crate::tasks::{Task, TaskFn, TaskRef, TaskSpec, TaskSpecBuilder};
