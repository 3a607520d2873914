//! Orchestrator for delayed task batches.
//!
//! The Orchestrator owns the two collaborators every strategy needs, a
//! [`Clock`] and a [`Reporter`], and decides when each task of a batch
//! starts relative to the others and how completions are awaited.
//! All strategies run on a single cooperative scheduler; "concurrent"
//! means several delayed tasks in flight at once, not several threads.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::clock::{Clock, TokioClock};
use crate::core::{TaskBatch, TaskCompletion};
use crate::error::{Error, Result};
use crate::orchestration::strategy::{ProgressEvent, Strategy};
use crate::reporter::Reporter;
use crate::{tlog, tlog_debug, tlog_trace};

/// Outcome of running one batch with [`Orchestrator::run`].
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub strategy: Strategy,
    /// Completions in batch order.
    pub completions: Vec<TaskCompletion>,
    pub elapsed: Duration,
}

impl BatchRun {
    pub fn labels(&self) -> Vec<&str> {
        self.completions.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Tasks spawned by [`Orchestrator::dispatch_detached`] that have not
/// been joined yet.
#[derive(Debug)]
pub struct DetachedBatch {
    handles: Vec<JoinHandle<TaskCompletion>>,
}

impl DetachedBatch {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every spawned task and return completions in batch order.
    pub async fn join(self) -> Result<Vec<TaskCompletion>> {
        join_all(self.handles)
            .await
            .into_iter()
            .map(|joined| joined.map_err(|e| Error::TaskJoin(e.to_string())))
            .collect()
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn Reporter>,
}

impl Orchestrator {
    pub fn new(clock: Arc<dyn Clock>, reporter: Arc<dyn Reporter>) -> Self {
        Self { clock, reporter }
    }

    /// Orchestrator on the tokio clock.
    pub fn with_reporter(reporter: Arc<dyn Reporter>) -> Self {
        Self::new(Arc::new(TokioClock), reporter)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    fn emit(&self, event: ProgressEvent) {
        self.reporter.report(&event.to_string());
    }

    /// Run a batch with the given strategy and time it.
    ///
    /// Detached batches are joined before this returns.
    pub async fn run(&self, strategy: Strategy, batch: TaskBatch) -> Result<BatchRun> {
        let count = batch.len();
        tlog!("Running {} tasks with {} strategy", count, strategy);
        let start = self.clock.now();

        let completions = match strategy {
            Strategy::Sequential => self.run_sequential(batch).await,
            Strategy::Concurrent => self.run_concurrent(batch).await,
            Strategy::Detached => {
                let completions = self.dispatch_detached(batch).join().await?;
                self.emit(ProgressEvent::BatchDone { strategy, count });
                completions
            }
        };

        let elapsed = self.clock.now().saturating_duration_since(start);
        tlog!(
            "{} batch of {} tasks took {}ms",
            strategy,
            count,
            elapsed.as_millis()
        );
        Ok(BatchRun {
            strategy,
            completions,
            elapsed,
        })
    }

    /// Start each task only after the previous one completed.
    ///
    /// A task's completion is reported before the next task's start, and
    /// the total duration is the sum of the delays. Tasks cannot fail; a
    /// fallible task would short-circuit the rest of the batch here.
    pub async fn run_sequential(&self, batch: TaskBatch) -> Vec<TaskCompletion> {
        let count = batch.len();
        let mut completions = Vec::with_capacity(count);

        for (index, task) in batch.into_iter().enumerate() {
            self.emit(ProgressEvent::Started {
                label: task.label.clone(),
            });
            let completion = task.start(index, &self.clock).await;
            tlog_debug!(
                "Task {} ({}) completed after {}ms",
                completion.label,
                completion.task_id.short(),
                completion.elapsed().as_millis()
            );
            self.emit(ProgressEvent::Finished {
                label: completion.label.clone(),
            });
            completions.push(completion);
        }

        self.emit(ProgressEvent::BatchDone {
            strategy: Strategy::Sequential,
            count,
        });
        completions
    }

    /// Start every task before awaiting any, then wait for all of them.
    ///
    /// Completion order is whatever the timers produce; the returned
    /// completions are re-assembled in batch order. The total duration is
    /// the longest delay. An empty batch resolves without suspending.
    pub async fn run_concurrent(&self, batch: TaskBatch) -> Vec<TaskCompletion> {
        let count = batch.len();

        let pending: Vec<_> = batch
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                self.emit(ProgressEvent::Started {
                    label: task.label.clone(),
                });
                let started = task.start(index, &self.clock);
                let reporter = Arc::clone(&self.reporter);
                async move {
                    let completion = started.await;
                    reporter.report(
                        &ProgressEvent::Finished {
                            label: completion.label.clone(),
                        }
                        .to_string(),
                    );
                    completion
                }
            })
            .collect();
        tlog_trace!("Started {} tasks, joining", pending.len());

        let completions = join_all(pending).await;

        self.emit(ProgressEvent::BatchDone {
            strategy: Strategy::Concurrent,
            count,
        });
        completions
    }

    /// Spawn every task onto the runtime and return immediately.
    ///
    /// Start reports are emitted before this returns; completion reports
    /// are emitted by the spawned tasks as their delays elapse. Must be
    /// called from within a tokio runtime.
    pub fn dispatch_detached(&self, batch: TaskBatch) -> DetachedBatch {
        let handles: Vec<_> = batch
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                self.emit(ProgressEvent::Started {
                    label: task.label.clone(),
                });
                let started = task.start(index, &self.clock);
                let reporter = Arc::clone(&self.reporter);
                tokio::spawn(async move {
                    let completion = started.await;
                    reporter.report(
                        &ProgressEvent::Finished {
                            label: completion.label.clone(),
                        }
                        .to_string(),
                    );
                    completion
                })
            })
            .collect();

        self.emit(ProgressEvent::Dispatched {
            count: handles.len(),
        });
        DetachedBatch { handles }
    }
}
