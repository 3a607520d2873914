//! Time source for delayed tasks and benchmark timing.
//!
//! Orchestrators and the benchmark harness never touch `tokio::time`
//! directly; they go through an injected [`Clock`]. The production clock
//! follows tokio's timer, so tests that pause tokio time get a fully
//! deterministic virtual clock for free.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::Instant;

/// A source of "now" and of delayed completions.
///
/// The deadline of the future returned by [`Clock::sleep`] must be fixed
/// when `sleep` is called, not when the future is first polled. Starting a
/// delayed task means calling `sleep`; awaiting it may happen much later.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Clock backed by the tokio timer of the current runtime.
///
/// Must be used from within a runtime context.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
