//! Canned demonstrations of the scheduling strategies.
//!
//! Each scenario builds its batches from [`Config`] and prints through the
//! orchestrator's reporter, so the interleaving of start and finish lines
//! shows exactly when each task ran.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bench::{Benchmark, BenchmarkCase, BenchmarkResult};
use crate::config::Config;
use crate::core::TaskBatch;
use crate::error::{Error, Result};
use crate::orchestration::{Orchestrator, Strategy};
use crate::tlog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Await each task before starting the next.
    BlockingAwait,
    /// Start one task, keep going, pick up its completion afterwards.
    NonBlocking,
    /// Start every task, then await them all together.
    NonBlockingAwait,
    /// Spawn every task and only collect them at the very end.
    FireAndForget,
    /// Benchmark slow (sequential) against fast (concurrent) batches.
    FastPromise,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::BlockingAwait,
        Scenario::NonBlocking,
        Scenario::NonBlockingAwait,
        Scenario::FireAndForget,
        Scenario::FastPromise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::BlockingAwait => "blocking-await",
            Scenario::NonBlocking => "non-blocking",
            Scenario::NonBlockingAwait => "non-blocking-await",
            Scenario::FireAndForget => "fire-and-forget",
            Scenario::FastPromise => "fast-promise",
        }
    }

    /// Play the scenario to completion.
    ///
    /// Only [`Scenario::FastPromise`] produces benchmark results.
    pub async fn play(
        &self,
        orchestrator: &Orchestrator,
        config: &Config,
    ) -> Result<Vec<BenchmarkResult>> {
        tlog!("Playing scenario {}", self);

        match self {
            Scenario::BlockingAwait => {
                orchestrator.run_sequential(config.batch()).await;
            }
            Scenario::NonBlocking => {
                let batch = TaskBatch::uniform_delay(
                    1,
                    &config.label_prefix,
                    Duration::from_millis(config.delay_ms),
                );
                let detached = orchestrator.dispatch_detached(batch);
                orchestrator.reporter().report("Caller continues while the task waits");
                detached.join().await?;
            }
            Scenario::NonBlockingAwait => {
                orchestrator.run_concurrent(config.batch()).await;
            }
            Scenario::FireAndForget => {
                orchestrator.run(Strategy::Detached, config.batch()).await?;
            }
            Scenario::FastPromise => {
                let benchmark =
                    Benchmark::new(orchestrator.clock().clone(), orchestrator.reporter().clone());
                let cases = strategy_cases(orchestrator, config, &Strategy::ALL);
                return Ok(benchmark.run_all(cases).await);
            }
        }

        Ok(Vec::new())
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownScenario(s.to_string()))
    }
}

/// One benchmark case per strategy, each over its own uniform batch of
/// `config.task_count` tasks at `config.bench_delay_ms`.
pub fn strategy_cases(
    orchestrator: &Orchestrator,
    config: &Config,
    strategies: &[Strategy],
) -> Vec<BenchmarkCase> {
    strategies
        .iter()
        .map(|&strategy| {
            let batch = config.bench_batch(&format!("{}-{}", config.label_prefix, strategy));
            let orchestrator = orchestrator.clone();
            BenchmarkCase::new(strategy.as_str(), move || async move {
                orchestrator.run(strategy, batch).await
            })
        })
        .collect()
}
