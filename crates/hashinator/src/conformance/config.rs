//! Conformance harness configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::partition::PartitionCount;

/// Default number of trials per randomized suite.
pub const DEFAULT_TRIALS: usize = 100_000;

/// Default upper bound (inclusive) for random partition counts.
pub const DEFAULT_MAX_PARTITION_COUNT: u32 = 1000;

/// Default partition count the null suite is checked against.
pub const DEFAULT_NULL_PARTITION_COUNT: u32 = 2;

/// Default seed, so an unconfigured run is reproducible.
pub const DEFAULT_SEED: u64 = 0x5eed_1dea_b0a7_c0de;

/// Default number of trials generated from one RNG stream.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Settings for a conformance run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Trials per randomized suite (integer and string).
    pub trials: usize,
    /// Random partition counts are drawn from `1..=max_partition_count`.
    pub max_partition_count: u32,
    /// Partition count used for the typed-null calls.
    pub null_partition_count: u32,
    pub seed: u64,
    /// Worker threads sharing the randomized chunks.
    pub workers: usize,
    pub chunk_size: usize,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            max_partition_count: DEFAULT_MAX_PARTITION_COUNT,
            null_partition_count: DEFAULT_NULL_PARTITION_COUNT,
            seed: DEFAULT_SEED,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ConformanceConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_partition_count(mut self, max: u32) -> Self {
        self.max_partition_count = max;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Checks the settings before a run.
    ///
    /// The integer suite needs at least two trials to hold its fixed
    /// `i64::MIN` and `0` openers.
    pub fn validate(&self) -> Result<()> {
        if self.trials < 2 {
            return Err(Error::Config(format!(
                "trials must be at least 2, got {}",
                self.trials
            )));
        }
        if self.max_partition_count == 0 {
            return Err(Error::Config("max_partition_count must be at least 1".into()));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".into()));
        }
        self.null_count()?;
        Ok(())
    }

    pub(crate) fn null_count(&self) -> Result<PartitionCount> {
        PartitionCount::try_from(self.null_partition_count)
            .map_err(|e| Error::Config(format!("null_partition_count: {}", e)))
    }
}
