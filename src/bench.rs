//! Benchmark harness.
//!
//! Times a zero-argument asynchronous operation and reports how long it
//! took. The harness is the single recovery boundary of the crate: a failed
//! operation never propagates past it, and the user only ever sees a
//! generic failure notice.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

use crate::clock::{Clock, TokioClock};
use crate::error::Result;
use crate::reporter::Reporter;
use crate::{tlog, tlog_debug};

/// The only line reported for a failed run.
pub const FAILURE_NOTICE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// Lifecycle of one benchmark run. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not started"),
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// A run that has been created but not started.
///
/// Transitions consume the run, so a run can never go back to an earlier
/// state or be settled twice.
#[derive(Debug, Clone)]
pub struct PendingRun {
    label: String,
}

impl PendingRun {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }

    pub fn state(&self) -> RunState {
        RunState::NotStarted
    }

    pub fn begin(self, start: Instant) -> ActiveRun {
        ActiveRun {
            label: self.label,
            start,
            recorded_at: Utc::now(),
        }
    }
}

/// A run whose operation is in flight.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    label: String,
    start: Instant,
    recorded_at: DateTime<Utc>,
}

impl ActiveRun {
    pub fn state(&self) -> RunState {
        RunState::Running
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn settle(self, end: Instant, outcome: Outcome) -> BenchmarkResult {
        let elapsed = end.saturating_duration_since(self.start);
        BenchmarkResult {
            label: self.label,
            outcome,
            elapsed_ms: elapsed.as_millis() as u64,
            recorded_at: self.recorded_at,
            start: self.start,
            end,
        }
    }
}

/// Timing record of a settled run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    pub label: String,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
    /// Wall-clock time at which the run began.
    pub recorded_at: DateTime<Utc>,
    #[serde(skip)]
    pub start: Instant,
    #[serde(skip)]
    pub end: Instant,
}

impl BenchmarkResult {
    pub fn elapsed(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }

    pub fn state(&self) -> RunState {
        match self.outcome {
            Outcome::Success => RunState::Completed,
            Outcome::Failure => RunState::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// A timed operation failed. Deliberately carries no detail about why.
#[derive(Error, Debug, Clone)]
#[error("benchmark run `{}` failed", .result.label)]
pub struct HarnessFailure {
    pub result: BenchmarkResult,
}

impl From<HarnessFailure> for crate::Error {
    fn from(failure: HarnessFailure) -> Self {
        crate::Error::HarnessFailure(failure.result.label)
    }
}

/// Render the single report line for a measured run.
pub fn report_line(measured: &std::result::Result<BenchmarkResult, HarnessFailure>) -> String {
    match measured {
        Ok(result) => format!(
            "{}: time taken in milliseconds: {}",
            result.label, result.elapsed_ms
        ),
        Err(_) => FAILURE_NOTICE.to_string(),
    }
}

type BoxedOp = Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>;

/// A labelled operation to hand to [`Benchmark::run_all`].
pub struct BenchmarkCase {
    pub label: String,
    op: BoxedOp,
}

impl BenchmarkCase {
    pub fn new<F, Fut, T>(label: &str, op: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            label: label.to_string(),
            op: Box::new(move || {
                let fut = op();
                Box::pin(async move { fut.await.map(|_| ()) })
            }),
        }
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

pub struct Benchmark {
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn Reporter>,
}

impl Benchmark {
    pub fn new(clock: Arc<dyn Clock>, reporter: Arc<dyn Reporter>) -> Self {
        Self { clock, reporter }
    }

    /// Benchmark on the tokio clock.
    pub fn with_reporter(reporter: Arc<dyn Reporter>) -> Self {
        Self::new(Arc::new(TokioClock), reporter)
    }

    /// Time `op` without reporting.
    ///
    /// The start is taken immediately before `op` is invoked and the end
    /// when its future settles. The operation's error is swallowed; only
    /// the debug log sees it.
    pub async fn measure<F, Fut, T>(
        &self,
        label: &str,
        op: F,
    ) -> std::result::Result<BenchmarkResult, HarnessFailure>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        tlog!("Starting benchmark for: {}", label);
        let run = PendingRun::new(label).begin(self.clock.now());
        let settled = op().await;
        let end = self.clock.now();

        match settled {
            Ok(_) => {
                let result = run.settle(end, Outcome::Success);
                tlog!("Benchmark {} completed in {}ms", label, result.elapsed_ms);
                Ok(result)
            }
            Err(err) => {
                tlog_debug!("Benchmark {} failed: {}", label, err);
                Err(HarnessFailure {
                    result: run.settle(end, Outcome::Failure),
                })
            }
        }
    }

    /// Time `op` and emit exactly one report: a timing line on success or
    /// [`FAILURE_NOTICE`] on failure.
    pub async fn run<F, Fut, T>(&self, label: &str, op: F) -> BenchmarkResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let measured = self.measure(label, op).await;
        self.reporter.report(&report_line(&measured));
        match measured {
            Ok(result) => result,
            Err(failure) => failure.result,
        }
    }

    /// Run every case without waiting for the previous one to settle.
    ///
    /// Their timers overlap in wall-clock time. Each run is isolated: a
    /// failing case only produces its own failure notice. Results are in
    /// submission order; reports are in settlement order.
    pub async fn run_all(&self, cases: Vec<BenchmarkCase>) -> Vec<BenchmarkResult> {
        let runs = cases
            .into_iter()
            .map(|case| async move { self.run(&case.label, case.op).await });
        join_all(runs).await
    }
}
