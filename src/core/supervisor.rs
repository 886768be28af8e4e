//! # Supervisor: launches one detached runner per task.
//!
//! The [`Supervisor`] owns the global [`Policy`]. [`Supervisor::start`] resolves
//! each task's effective policy and spawns a [`TaskActor`] for it, then returns
//! a [`SupervisorHandle`] without waiting for any task to run.
//!
//! ## High-level architecture
//! ```text
//! Inputs to start():
//!   Vec<TaskSpec>  ──►  Supervisor { global: Policy }
//!
//! Per spec:
//!   TaskSpec { task, overrides }
//!       └──► resolve(&global, overrides)                  (effective policy, once)
//!             └──► TaskActor::new(task, effective)
//!                   └──► tokio::spawn(actor.run(runtime_token.child_token()))
//!
//! Output:
//!   SupervisorHandle { runners, runtime_token }           (returned immediately)
//! ```
//!
//! - Runners never report back: success, faults and exhaustion stay inside the actor.
//! - A runner that stops (for any reason) does not affect its siblings.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use rootvisor::{Policy, Supervisor, TaskError, TaskFn, TaskRef, TaskSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let global = Policy::default()
//!         .with_restart_delay(Duration::from_millis(10))
//!         .with_max_retries(2);
//!
//!     let hello: TaskRef = TaskFn::arc("hello", |_ctx: CancellationToken| async move {
//!         println!("Hello from task!");
//!         Ok::<(), TaskError>(())
//!     });
//!
//!     let handle = Supervisor::new(global).start(vec![TaskSpec::new(hello)]);
//!     assert_eq!(handle.len(), 1);
//!     handle.join().await;
//! }
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::actor::TaskActor;
use crate::core::handle::{Runner, SupervisorHandle};
use crate::policies::{Policy, resolve};
use crate::tasks::TaskSpec;

/// Launches task runners under a shared global policy.
#[derive(Clone, Debug, Default)]
pub struct Supervisor {
    policy: Policy,
}

impl Supervisor {
    /// Creates a supervisor with the given global policy.
    ///
    /// The policy is read-only from here on; every task resolves against it.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// Returns the global policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Launches one detached runner per task and returns once all are spawned.
    ///
    /// Never waits for task execution. An empty `tasks` launches nothing.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn start(&self, tasks: Vec<TaskSpec>) -> SupervisorHandle {
        let runtime_token = CancellationToken::new();
        let mut runners = Vec::with_capacity(tasks.len());

        for spec in tasks {
            let policy = resolve(&self.policy, spec.overrides());
            let name: Arc<str> = Arc::from(spec.name());
            debug!(task = %name, ?policy, "launching task runner");

            let actor = TaskActor::new(Arc::clone(spec.task()), policy);
            let handle = tokio::spawn(actor.run(runtime_token.child_token()));
            runners.push(Runner { name, handle });
        }

        SupervisorHandle::new(runners, runtime_token)
    }

    /// Launches the tasks and waits until every runner has stopped.
    pub async fn run(&self, tasks: Vec<TaskSpec>) {
        self.start(tasks).join().await;
    }
}
