//! Configuration for the reference scheduler

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Maximum actions scheduled at once
    pub max_batch_size: usize,
    /// Maximum edges in the dependency graph
    pub max_edge_count: usize,
    /// Fall back to sequential order when conflicting pairs exceed this share
    pub conflict_threshold_percent: u8,
    /// Groups smaller than this run on the calling thread
    pub parallel_threshold: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 1000,
            max_edge_count: 10_000,
            conflict_threshold_percent: 50,
            parallel_threshold: 4,
        }
    }
}
