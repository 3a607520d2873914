//! Ordered batches of delayed tasks.
//!
//! Insertion order is significant: it is the execution order of the
//! sequential strategy and the result order of every strategy.

use std::time::Duration;

use crate::core::task::DelayedTask;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBatch {
    tasks: Vec<DelayedTask>,
}

impl TaskBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `count` tasks labelled `{prefix}-0`, `{prefix}-1`, ... sharing one delay.
    pub fn uniform(count: usize, prefix: &str, delay_ms: i64) -> Result<Self> {
        (0..count)
            .map(|i| DelayedTask::new(&format!("{}-{}", prefix, i), delay_ms))
            .collect()
    }

    /// Like [`TaskBatch::uniform`] for an already validated delay.
    pub fn uniform_delay(count: usize, prefix: &str, delay: Duration) -> Self {
        (0..count)
            .map(|i| DelayedTask::with_delay(&format!("{}-{}", prefix, i), delay))
            .collect()
    }

    /// Build one task per delay, labelled by position.
    pub fn from_delays(prefix: &str, delays_ms: &[i64]) -> Result<Self> {
        delays_ms
            .iter()
            .enumerate()
            .map(|(i, &delay)| DelayedTask::new(&format!("{}-{}", prefix, i), delay))
            .collect()
    }

    pub fn push(&mut self, task: DelayedTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DelayedTask> {
        self.tasks.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.label.as_str()).collect()
    }
}

impl FromIterator<DelayedTask> for TaskBatch {
    fn from_iter<I: IntoIterator<Item = DelayedTask>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TaskBatch {
    type Item = DelayedTask;
    type IntoIter = std::vec::IntoIter<DelayedTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskBatch {
    type Item = &'a DelayedTask;
    type IntoIter = std::slice::Iter<'a, DelayedTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
