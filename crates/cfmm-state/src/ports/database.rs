use crate::domain::{ChangeSet, StateError, StateKey};

/// Point lookups against a state snapshot.
pub trait ImmutableState: Send + Sync {
    /// `Ok(None)` when the key holds no value.
    fn get_value(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError>;
}

/// A state view that can also be written.
pub trait MutableState: ImmutableState {
    fn insert(&mut self, key: &StateKey, value: Vec<u8>) -> Result<(), StateError>;
    fn remove(&mut self, key: &StateKey) -> Result<(), StateError>;
}

/// Backing store shared across executors.
///
/// Readers see a consistent view; `commit` applies every change or none.
pub trait StateStore: ImmutableState {
    fn commit(&self, changes: ChangeSet) -> Result<(), StateError>;
}
