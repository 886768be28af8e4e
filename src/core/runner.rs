//! # Run a single attempt of a task.
//!
//! Executes one attempt of a [`Task`] and turns its outcome into a `Result`.
//!
//! - **Execute ONE attempt** of the task with a child cancellation token
//! - **Capture panics** raised while polling the attempt
//!
//! ## Outcomes
//! ```text
//! task.run() → Ok(())            → Ok(())
//! task.run() → Err(e)            → Err(e)
//! task.run() → panic!(..)        → Err(TaskError::Panicked { info })
//! ```
//!
//! ## Rules
//! - Derives a **child token** per attempt; cancelling it does not affect the parent
//! - A panic is a fault like any other; it never unwinds into the runner

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::{error::TaskError, tasks::Task};

/// Executes a single attempt of `task`.
///
/// Panics raised inside the attempt are caught and reported as
/// [`TaskError::Panicked`].
pub async fn run_once<T: Task + ?Sized>(
    task: &T,
    parent: &CancellationToken,
) -> Result<(), TaskError> {
    let child = parent.child_token();

    match AssertUnwindSafe(task.run(child)).catch_unwind().await {
        Ok(res) => res,
        Err(payload) => Err(TaskError::Panicked {
            info: panic_message(payload.as_ref()),
        }),
    }
}

/// Renders a panic payload as text.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
