//! Value objects for the reference scheduler

use cfmm_actions::{Action, ActionOutput, ExecutionError};
use cfmm_state::{ConflictKind, StateKey};
use shared_types::Address;

/// One submitted action. `index` is its position in submission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchEntry {
    pub index: usize,
    pub actor: Address,
    pub action: Action,
}

impl BatchEntry {
    pub fn new(index: usize, actor: Address, action: impl Into<Action>) -> Self {
        Self {
            index,
            actor,
            action: action.into(),
        }
    }
}

/// Two entries whose declarations overlap on `key`. `first` precedes
/// `second` in submission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub first: usize,
    pub second: usize,
    pub kind: ConflictKind,
    pub key: StateKey,
}

/// Result of one executed entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub index: usize,
    pub actor: Address,
    pub result: Result<ActionOutput, ExecutionError>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
