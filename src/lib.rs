pub mod bench;
pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod orchestration;
pub mod reporter;
pub mod scenario;

pub use bench::{Benchmark, BenchmarkCase, BenchmarkResult, HarnessFailure, Outcome, RunState};
pub use clock::{Clock, TokioClock};
pub use crate::core::{DelayedTask, TaskBatch, TaskCompletion, TaskId};
pub use error::{Error, Result};
pub use orchestration::{BatchRun, DetachedBatch, Orchestrator, ProgressEvent, Strategy};
pub use reporter::{LogReporter, RecordingReporter, Reporter, StdoutReporter};
pub use scenario::Scenario;
