//! Test fixtures for integration tests.

use std::sync::Arc;
use std::time::Duration;

use taskbench::{Benchmark, Orchestrator, RecordingReporter, Result, TaskBatch};

/// Upper bound on scheduling overhead tolerated by timing assertions.
pub const EPSILON: Duration = Duration::from_millis(50);

/// An orchestrator and a benchmark sharing one recording reporter.
pub struct Harness {
    pub orchestrator: Orchestrator,
    pub benchmark: Benchmark,
    pub reporter: Arc<RecordingReporter>,
}

impl Harness {
    pub fn new() -> Self {
        let reporter = Arc::new(RecordingReporter::new());
        let orchestrator = Orchestrator::with_reporter(reporter.clone());
        let benchmark = Benchmark::new(orchestrator.clock().clone(), reporter.clone());
        Self {
            orchestrator,
            benchmark,
            reporter,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.reporter.messages()
    }
}

/// Three tasks of 1500ms, as in the blocking-await demo.
pub fn blocking_batch() -> TaskBatch {
    TaskBatch::uniform(3, "task", 1500).expect("valid delays")
}

/// Three tasks of 3000ms, as in the fast-promise demo.
pub fn bench_batch(prefix: &str) -> TaskBatch {
    TaskBatch::uniform(3, prefix, 3000).expect("valid delays")
}

/// Assert `actual` lies in `[expected, expected + EPSILON)`.
pub fn assert_near(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + EPSILON,
        "expected {:?} in [{:?}, {:?})",
        actual,
        expected,
        expected + EPSILON
    );
}

/// An operation that always fails after `ms` milliseconds.
pub async fn failing_op(ms: u64) -> Result<()> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Err(taskbench::Error::TaskFailure("simulated".to_string()))
}
