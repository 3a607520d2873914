//! Core domain models: delayed tasks and the batches strategies consume.

pub mod batch;
pub mod task;

pub use batch::TaskBatch;
pub use task::{DelayedTask, TaskCompletion, TaskId};
