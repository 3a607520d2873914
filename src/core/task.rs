//! Delayed task data model.
//!
//! A [`DelayedTask`] is the unit of deferred work that orchestration
//! strategies schedule. Starting one yields a future that resolves with a
//! [`TaskCompletion`] no earlier than the task's delay after the start.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Error, Result};

/// Unique identifier for a delayed task.
///
/// Uses UUID v4 for generation and provides a short form display
/// for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of deferred work with a fixed minimum latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedTask {
    pub id: TaskId,
    pub label: String,
    pub delay: Duration,
}

impl DelayedTask {
    /// Create a task that completes `delay_ms` milliseconds after it starts.
    ///
    /// Negative delays are rejected. A zero delay is allowed and completes
    /// on the next timer tick.
    pub fn new(label: &str, delay_ms: i64) -> Result<Self> {
        let millis = u64::try_from(delay_ms).map_err(|_| Error::InvalidDelay(delay_ms))?;
        Ok(Self::with_delay(label, Duration::from_millis(millis)))
    }

    pub fn with_delay(label: &str, delay: Duration) -> Self {
        Self {
            id: TaskId::new(),
            label: label.to_string(),
            delay,
        }
    }

    /// Start the task.
    ///
    /// The delay begins now, when `start` is called, not when the returned
    /// future is first polled. The future never fails.
    pub fn start(
        &self,
        index: usize,
        clock: &Arc<dyn Clock>,
    ) -> impl Future<Output = TaskCompletion> + Send + 'static {
        let started_at = clock.now();
        let sleep = clock.sleep(self.delay);
        let clock = Arc::clone(clock);
        let task_id = self.id;
        let label = self.label.clone();

        async move {
            sleep.await;
            TaskCompletion {
                index,
                task_id,
                label,
                started_at,
                completed_at: clock.now(),
            }
        }
    }
}

/// Completion signal of a started [`DelayedTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompletion {
    /// Position of the task in the batch it was started from.
    pub index: usize,
    pub task_id: TaskId,
    pub label: String,
    pub started_at: Instant,
    pub completed_at: Instant,
}

impl TaskCompletion {
    pub fn elapsed(&self) -> Duration {
        self.completed_at.saturating_duration_since(self.started_at)
    }
}
