//! Integration test suite for taskbench.
//!
//! These tests drive the public API the way the CLI does: batches built
//! from config, run through an orchestrator, timed by the benchmark
//! harness, observed through a recording reporter.
//!
//! # Test Categories
//!
//! - `strategies`: Ordering and timing of each scheduling strategy
//! - `harness`: Benchmark isolation and report shape
//! - `wall_clock`: The same properties on the real, unpaused clock
//!
//! Everything except `wall_clock` runs on tokio's paused clock, so timing
//! assertions are deterministic.

mod fixtures;

mod harness;
mod strategies;
mod wall_clock;
