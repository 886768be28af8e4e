//! # Example: retry_with_backoff
//!
//! Demonstrates how the supervisor retries faulted tasks according to the
//! global [`Policy`] and per-task overrides.
//!
//! - `flaky` fails twice, then succeeds (global policy: 3 retries, 300ms apart).
//! - `doomed` always fails and overrides the budget to a single retry, which is
//!   attempted immediately (no backoff for a budget of one).
//! - `steady` succeeds on its first attempt and is never reported.
//!
//! ## Flow
//! ```text
//! Supervisor::run()
//!   ├─► flaky:  attempt 1 → Err → WARN → sleep 300ms
//!   │           attempt 2 → Err → WARN → sleep 300ms
//!   │           attempt 3 → Ok  → done
//!   ├─► doomed: attempt 1 → Err → WARN → (no sleep)
//!   │           attempt 2 → Err → WARN → retries exhausted, done
//!   └─► steady: attempt 1 → Ok  → done
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example retry_with_backoff
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rootvisor::{Policy, Supervisor, TaskError, TaskFn, TaskRef, TaskSpec};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Global policy shared by every task
    let global = Policy::default()
        .with_restart_delay(Duration::from_millis(300))
        .with_max_retries(3);

    // 2. A task that fails twice before succeeding
    let calls = Arc::new(AtomicU32::new(0));
    let flaky: TaskRef = TaskFn::arc("flaky", move |_ctx: CancellationToken| {
        let calls = Arc::clone(&calls);
        async move {
            let attempt = calls.fetch_add(1, Ordering::Relaxed) + 1;
            if attempt <= 2 {
                return Err(TaskError::fail(format!("boom #{attempt}")));
            }
            println!("[flaky] success on attempt {attempt}");
            Ok(())
        }
    });

    // 3. A task that never recovers, with its own retry budget
    let doomed = TaskSpec::builder("doomed")
        .max_retries(1)
        .build(|_ctx: CancellationToken| async move {
            Err::<(), _>(TaskError::from(anyhow::anyhow!("upstream unavailable")))
        });

    // 4. A task that just works
    let steady: TaskRef = TaskFn::arc("steady", |_ctx: CancellationToken| async move {
        println!("[steady] done");
        Ok::<(), TaskError>(())
    });

    Supervisor::new(global)
        .run(vec![TaskSpec::new(flaky), doomed, TaskSpec::new(steady)])
        .await;

    println!("[main] all runners stopped.");
}
