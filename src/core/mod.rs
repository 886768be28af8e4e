//! Runtime core: task runners and their launch.
//!
//! The public API from this module is [`Supervisor`], which resolves policies
//! and launches runners, and the [`SupervisorHandle`] it returns.
//!
//! Internal modules:
//! - [`runner`]: executes one attempt, capturing panics as faults;
//! - [`actor`]: runs a single task through its retry state machine;
//! - [`supervisor`]: resolves policies and spawns detached actors;
//! - [`handle`]: observes, joins or cancels launched actors.

mod actor;
mod handle;
mod runner;
mod supervisor;

pub use handle::SupervisorHandle;
pub use supervisor::Supervisor;
