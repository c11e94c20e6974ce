//! Configuration for the concurrent dispatcher

use serde::{Deserialize, Serialize};

use crate::constants::workers;

/// Configuration for the per-application fetch pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Maximum number of fetches in flight at once
    pub worker_count: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

impl DispatcherConfig {
    /// Set the pool size
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("Worker count cannot be zero".to_string());
        }

        if self.worker_count > workers::MAX_WORKER_COUNT {
            return Err(format!(
                "Worker count cannot exceed {}",
                workers::MAX_WORKER_COUNT
            ));
        }

        Ok(())
    }
}
