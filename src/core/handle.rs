//! # Handle to launched task runners.
//!
//! [`SupervisorHandle`] is what [`Supervisor::start`](crate::Supervisor::start)
//! returns once every runner has been spawned. Runners are **detached**: dropping
//! the handle does not stop them, and nothing a runner does is reported through it.
//!
//! The handle only lets the host observe or end the runners from the outside:
//! ```text
//! SupervisorHandle
//!   ├─► is_finished()       poll: have all runners reached DONE?
//!   ├─► join()              wait for every runner to reach DONE
//!   └─► shutdown(grace)
//!         ├─► runtime_token.cancel()  → runners stop at their next safe point
//!         ├─ all joined within grace  → Ok(())
//!         └─ grace exceeded           → abort the rest, Err(GraceExceeded { stuck })
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::error::RuntimeError;

/// One spawned runner.
pub(crate) struct Runner {
    pub(crate) name: Arc<str>,
    pub(crate) handle: JoinHandle<()>,
}

/// Handle to the runners launched by a single `start` call.
pub struct SupervisorHandle {
    runners: Vec<Runner>,
    runtime_token: CancellationToken,
}

impl SupervisorHandle {
    pub(crate) fn new(runners: Vec<Runner>, runtime_token: CancellationToken) -> Self {
        Self {
            runners,
            runtime_token,
        }
    }

    /// Number of launched runners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    /// True if no runner was launched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Names of the supervised tasks, in launch order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.runners.iter().map(|r| r.name.as_ref())
    }

    /// True once every runner has stopped (success, exhaustion or cancellation).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.runners.iter().all(|r| r.handle.is_finished())
    }

    /// Waits until every runner has stopped.
    ///
    /// With unbounded retries and a task that never succeeds this never returns.
    pub async fn join(self) {
        for runner in self.runners {
            let res = runner.handle.await;
            report_join(&runner.name, res);
        }
    }

    /// Cancels all runners and waits up to `grace` for them to stop.
    ///
    /// Runners observe cancellation before each attempt and while waiting
    /// out a restart delay; a running attempt gets a cancelled token and is
    /// expected to return. Runners still alive after `grace` are aborted.
    pub async fn shutdown(mut self, grace: Duration) -> Result<(), RuntimeError> {
        self.runtime_token.cancel();

        let done = async {
            for runner in self.runners.iter_mut() {
                let res = (&mut runner.handle).await;
                report_join(&runner.name, res);
            }
        };
        let timed = time::timeout(grace, done).await;

        match timed {
            Ok(()) => {
                debug!(runners = self.runners.len(), "all runners stopped within grace");
                Ok(())
            }
            Err(_) => {
                let stuck: Vec<String> = self
                    .runners
                    .iter()
                    .filter(|r| !r.handle.is_finished())
                    .map(|r| r.name.to_string())
                    .collect();
                for runner in &self.runners {
                    runner.handle.abort();
                }
                warn!(?grace, ?stuck, "shutdown grace exceeded; aborting runners");
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}

impl std::fmt::Debug for SupervisorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupervisorHandle")
            .field("runners", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Logs a runner that ended by panicking (its fault handler panicked).
fn report_join(name: &str, res: Result<(), JoinError>) {
    if let Err(e) = res {
        if e.is_panic() {
            error!(task = name, "task runner panicked");
        }
    }
}
