//! # Example: one_shot
//!
//! Starts a long-running ticker and a one-shot task, then shuts the supervisor
//! down from the outside after a few ticks.
//!
//! `start` returns as soon as both runners are launched; the handle is only
//! used here to cancel them.
//!
//! ## Run
//! ```bash
//! cargo run --example one_shot
//! ```

use std::time::Duration;

use rootvisor::{MaxRetries, Policy, Supervisor, TaskError, TaskFn, TaskRef, TaskSpec};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let ticker: TaskRef = TaskFn::arc("ticker", |ctx: CancellationToken| async move {
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return Err::<(), _>(TaskError::Canceled),
                _ = tokio::time::sleep(Duration::from_millis(250)) => println!("[ticker] tick"),
            }
        }
    });

    let hello: TaskRef = TaskFn::arc("hello", |_ctx: CancellationToken| async move {
        println!("[hello] once");
        Ok::<(), TaskError>(())
    });

    let sup = Supervisor::new(Policy::default().with_max_retries(MaxRetries::Unbounded));
    let handle = sup.start(vec![TaskSpec::new(ticker), TaskSpec::new(hello)]);

    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.shutdown(Duration::from_secs(2)).await?;

    println!("[main] shut down cleanly.");
    Ok(())
}
