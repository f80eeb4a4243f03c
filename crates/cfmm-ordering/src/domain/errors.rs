//! Error types for the reference scheduler

use cfmm_state::StateError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("Empty action batch")]
    EmptyBatch,

    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Edge count exceeded limits (anti-DoS)
    #[error("Edge count exceeded: {count} > {max}")]
    TooManyEdges { count: usize, max: usize },

    #[error("Duplicate batch index: {0}")]
    DuplicateIndex(usize),

    #[error("Cycle detected in dependency graph")]
    CycleDetected,

    /// An action hit a state fault; execution stopped after its group.
    #[error("Fatal state fault in action {index}: {source}")]
    Fatal {
        index: usize,
        #[source]
        source: StateError,
    },
}
