use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::TaskBatch;
use crate::{tlog_debug, tlog_warn, Error, Result};

const DEFAULT_TASK_COUNT: usize = 3;
const DEFAULT_DELAY_MS: u64 = 1500;
const DEFAULT_BENCH_DELAY_MS: u64 = 3000;
const DEFAULT_LABEL_PREFIX: &str = "task";

/// Defaults for the batches the CLI builds. Every field can be overridden
/// by a command-line flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_task_count")]
    pub task_count: usize,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_bench_delay_ms")]
    pub bench_delay_ms: u64,
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

fn default_task_count() -> usize {
    DEFAULT_TASK_COUNT
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_bench_delay_ms() -> u64 {
    DEFAULT_BENCH_DELAY_MS
}

fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_count: DEFAULT_TASK_COUNT,
            delay_ms: DEFAULT_DELAY_MS,
            bench_delay_ms: DEFAULT_BENCH_DELAY_MS,
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }
}

impl Config {
    pub fn taskbench_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".taskbench"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::taskbench_dir()?.join("taskbench.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        tlog_debug!(
            "Config loaded: task_count={}, delay_ms={}, bench_delay_ms={}, label_prefix={:?}",
            config.task_count,
            config.delay_ms,
            config.bench_delay_ms,
            config.label_prefix
        );
        if config.task_count == 0 {
            tlog_warn!("Config task_count is 0, every batch will be empty");
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                tlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// The default batch: `task_count` tasks of `delay_ms` each.
    pub fn batch(&self) -> TaskBatch {
        TaskBatch::uniform_delay(
            self.task_count,
            &self.label_prefix,
            Duration::from_millis(self.delay_ms),
        )
    }

    /// A benchmark batch of `task_count` tasks of `bench_delay_ms` each.
    pub fn bench_batch(&self, prefix: &str) -> TaskBatch {
        TaskBatch::uniform_delay(
            self.task_count,
            prefix,
            Duration::from_millis(self.bench_delay_ms),
        )
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, task_count: Option<usize>, delay_ms: Option<u64>) -> Self {
        if let Some(count) = task_count {
            self.task_count = count;
        }
        if let Some(delay) = delay_ms {
            self.delay_ms = delay;
        }
        self
    }
}
