//! Strategy timing on the real clock.
//!
//! Delays are kept short; the upper bounds are generous because CI
//! schedulers add jitter.

use std::time::{Duration, Instant};

use taskbench::{Strategy, TaskBatch};

use crate::fixtures::Harness;

const DELAY_MS: i64 = 40;
const MAX_OVERHEAD: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_sequential_wall_clock_is_sum() {
    let harness = Harness::new();
    let batch = TaskBatch::uniform(3, "task", DELAY_MS).unwrap();

    let start = Instant::now();
    let run = harness
        .orchestrator
        .run(Strategy::Sequential, batch)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    println!("Sequential 3 x {}ms took {:?}", DELAY_MS, elapsed);
    assert!(run.elapsed >= Duration::from_millis(120));
    assert!(elapsed < Duration::from_millis(120) + MAX_OVERHEAD);
}

#[tokio::test]
async fn test_concurrent_wall_clock_is_max() {
    let harness = Harness::new();
    let batch = TaskBatch::uniform(3, "task", DELAY_MS).unwrap();

    let start = Instant::now();
    let run = harness
        .orchestrator
        .run(Strategy::Concurrent, batch)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    println!("Concurrent 3 x {}ms took {:?}", DELAY_MS, elapsed);
    assert!(run.elapsed >= Duration::from_millis(40));
    assert!(elapsed < Duration::from_millis(40) + MAX_OVERHEAD);
}
