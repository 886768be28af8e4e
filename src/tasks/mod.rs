//! # Task abstractions and descriptors.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async tasks
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskSpec`] - descriptor pairing a task with optional policy overrides
//! - [`TaskSpecBuilder`] - fluent construction of a [`TaskSpec`]

mod spec;
mod spec_builder;
mod task;
mod task_fn;

pub use spec::TaskSpec;
pub use spec_builder::TaskSpecBuilder;
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
