//! Progress reporting sinks.
//!
//! A [`Reporter`] receives the user-facing lines produced by orchestrators
//! and the benchmark harness. Reports are fire-and-forget and must be
//! emitted in exactly the order they were issued.

use std::sync::{Mutex, MutexGuard};

pub trait Reporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Prints each report on its own line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }
}

/// Routes reports into the file log at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, message: &str) {
        crate::log::info(message);
    }
}

/// Keeps every report in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the reports received so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Position of the first report equal to `message`.
    pub fn position(&self, message: &str) -> Option<usize> {
        self.lock().iter().position(|m| m == message)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
