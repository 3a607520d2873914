//! Ordering and timing of the scheduling strategies.

use std::time::Duration;

use taskbench::{DelayedTask, Strategy, TaskBatch};

use crate::fixtures::{assert_near, bench_batch, blocking_batch, Harness};

#[tokio::test(start_paused = true)]
async fn test_sequential_three_by_1500() {
    let harness = Harness::new();

    let run = harness
        .orchestrator
        .run(Strategy::Sequential, blocking_batch())
        .await
        .unwrap();

    assert_near(run.elapsed, Duration::from_millis(4500));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_three_by_3000() {
    let harness = Harness::new();

    let run = harness
        .orchestrator
        .run(Strategy::Concurrent, bench_batch("fast"))
        .await
        .unwrap();

    assert_near(run.elapsed, Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_sequential_report_precedes_next_start() {
    let harness = Harness::new();

    harness.orchestrator.run_sequential(blocking_batch()).await;

    let messages = harness.messages();
    for i in 0..2 {
        let finished = messages
            .iter()
            .position(|m| *m == format!("Finish task-{}", i))
            .unwrap();
        let next_started = messages
            .iter()
            .position(|m| *m == format!("Start task-{}", i + 1))
            .unwrap();
        assert!(finished < next_started);
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_starts_all_before_any_finish() {
    let harness = Harness::new();

    harness.orchestrator.run_concurrent(blocking_batch()).await;

    let messages = harness.messages();
    let last_start = messages.iter().rposition(|m| m.starts_with("Start ")).unwrap();
    let first_finish = messages.iter().position(|m| m.starts_with("Finish ")).unwrap();
    assert!(last_start < first_finish);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_preserves_submission_order() {
    let harness = Harness::new();
    let mut batch = TaskBatch::new();
    for (label, delay) in [("slow", 900), ("fast", 100), ("medium", 500)] {
        batch.push(DelayedTask::new(label, delay).unwrap());
    }
    let submitted: Vec<_> = batch.iter().map(|t| t.id).collect();

    let run = harness
        .orchestrator
        .run(Strategy::Concurrent, batch)
        .await
        .unwrap();

    let returned: Vec<_> = run.completions.iter().map(|c| c.task_id).collect();
    assert_eq!(returned, submitted);
    assert_eq!(run.labels(), vec!["slow", "fast", "medium"]);
    assert_near(run.elapsed, Duration::from_millis(900));
}

#[tokio::test(start_paused = true)]
async fn test_empty_batch_resolves_immediately() {
    let harness = Harness::new();

    for strategy in Strategy::ALL {
        let run = harness
            .orchestrator
            .run(strategy, TaskBatch::new())
            .await
            .unwrap();
        assert!(run.completions.is_empty());
        assert_eq!(run.elapsed, Duration::ZERO);
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_delay_tasks_complete() {
    let harness = Harness::new();
    let batch = TaskBatch::uniform(4, "instant", 0).unwrap();

    let run = harness
        .orchestrator
        .run(Strategy::Sequential, batch)
        .await
        .unwrap();

    assert_eq!(run.completions.len(), 4);
    assert_near(run.elapsed, Duration::ZERO);
}

#[test]
fn test_negative_delay_rejected_at_creation() {
    assert!(matches!(
        TaskBatch::uniform(2, "bad", -1500),
        Err(taskbench::Error::InvalidDelay(-1500))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_detached_overlaps_with_caller_work() {
    let harness = Harness::new();

    let detached = harness.orchestrator.dispatch_detached(blocking_batch());
    // Caller keeps working while the spawned tasks wait.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let completions = detached.join().await.unwrap();

    let started = completions[0].started_at;
    let joined = harness.orchestrator.clock().now();
    assert_near(joined - started, Duration::from_millis(1500));
}
