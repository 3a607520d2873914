//! Scheduling strategies and the progress events they emit.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the tasks of a batch are started relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Start one task, wait for it, then start the next.
    Sequential,
    /// Start every task, then wait for all of them at once.
    Concurrent,
    /// Spawn every task onto the runtime and return before any completes.
    Detached,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Concurrent, Strategy::Detached];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Concurrent => "concurrent",
            Strategy::Detached => "detached",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Ordering-sensitive progress lines emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { label: String },
    Finished { label: String },
    /// Detached dispatch returned to the caller.
    Dispatched { count: usize },
    BatchDone { strategy: Strategy, count: usize },
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::Started { label } => write!(f, "Start {}", label),
            ProgressEvent::Finished { label } => write!(f, "Finish {}", label),
            ProgressEvent::Dispatched { count } => write!(f, "Dispatched {} tasks", count),
            ProgressEvent::BatchDone { strategy, count } => {
                write!(f, "End of {} batch ({} tasks)", strategy, count)
            }
        }
    }
}
