//! Benchmark harness isolation and report shape.

use std::time::Duration;

use taskbench::bench::FAILURE_NOTICE;
use taskbench::{BenchmarkCase, Outcome, RunState, Strategy};

use crate::fixtures::{assert_near, bench_batch, failing_op, Harness};

#[tokio::test(start_paused = true)]
async fn test_slow_and_fast_benchmarks_overlap() {
    let harness = Harness::new();
    let slow = harness.orchestrator.clone();
    let fast = harness.orchestrator.clone();
    let slow_batch = bench_batch("slow");
    let fast_batch = bench_batch("fast");

    let results = harness
        .benchmark
        .run_all(vec![
            BenchmarkCase::new("fast", move || async move {
                fast.run(Strategy::Concurrent, fast_batch).await
            }),
            BenchmarkCase::new("slow", move || async move {
                slow.run(Strategy::Sequential, slow_batch).await
            }),
        ])
        .await;

    assert_near(results[0].elapsed(), Duration::from_millis(3000));
    assert_near(results[1].elapsed(), Duration::from_millis(9000));

    let timing_lines: Vec<_> = harness
        .messages()
        .into_iter()
        .filter(|m| m.contains("time taken in milliseconds"))
        .collect();
    assert_eq!(timing_lines.len(), 2);
    assert!(timing_lines[0].starts_with("fast:"));
    assert!(timing_lines[1].starts_with("slow:"));
}

#[tokio::test(start_paused = true)]
async fn test_failure_isolated_from_success() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator.clone();
    let batch = bench_batch("ok");

    let results = harness
        .benchmark
        .run_all(vec![
            BenchmarkCase::new("broken", || failing_op(10)),
            BenchmarkCase::new("ok", move || async move {
                orchestrator.run(Strategy::Concurrent, batch).await
            }),
        ])
        .await;

    assert_eq!(results[0].state(), RunState::Failed);
    assert_eq!(results[1].state(), RunState::Completed);

    let messages = harness.messages();
    let failures = messages.iter().filter(|m| *m == FAILURE_NOTICE).count();
    let timings = messages
        .iter()
        .filter(|m| m.starts_with("ok: time taken in milliseconds:"))
        .count();
    assert_eq!(failures, 1);
    assert_eq!(timings, 1);
}

#[tokio::test(start_paused = true)]
async fn test_exactly_one_report_per_run() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator.clone();

    harness
        .benchmark
        .run("quiet", || async move {
            orchestrator
                .run(Strategy::Concurrent, taskbench::TaskBatch::new())
                .await
        })
        .await;
    harness.benchmark.run("broken", || failing_op(0)).await;

    // Empty batch: one batch-done line plus one timing line; failure: one notice.
    assert_eq!(
        harness.messages(),
        vec![
            "End of concurrent batch (0 tasks)".to_string(),
            "quiet: time taken in milliseconds: 0".to_string(),
            FAILURE_NOTICE.to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_measure_returns_explicit_failure() {
    let harness = Harness::new();

    let measured = harness.benchmark.measure("broken", || failing_op(25)).await;

    let failure = measured.unwrap_err();
    assert_eq!(failure.result.outcome, Outcome::Failure);
    assert_near(failure.result.elapsed(), Duration::from_millis(25));
    assert!(harness.reporter.is_empty());
}
