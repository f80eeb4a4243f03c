use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::{ChangeSet, StateError, StateKey};
use crate::ports::{ImmutableState, MutableState, StateStore};

/// In-memory implementation of the state ports for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemoryStateDb {
    entries: RwLock<BTreeMap<StateKey, Vec<u8>>>,
}

impl InMemoryStateDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every stored entry, ordered by key.
    pub fn dump(&self) -> BTreeMap<StateKey, Vec<u8>> {
        self.entries.read().clone()
    }
}

impl ImmutableState for InMemoryStateDb {
    fn get_value(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.entries.read().get(key).cloned())
    }
}

impl MutableState for InMemoryStateDb {
    fn insert(&mut self, key: &StateKey, value: Vec<u8>) -> Result<(), StateError> {
        self.entries.get_mut().insert(key.clone(), value);
        Ok(())
    }

    fn remove(&mut self, key: &StateKey) -> Result<(), StateError> {
        self.entries.get_mut().remove(key);
        Ok(())
    }
}

impl StateStore for InMemoryStateDb {
    fn commit(&self, changes: ChangeSet) -> Result<(), StateError> {
        let mut entries = self.entries.write();
        let count = changes.len();
        for (key, value) in changes {
            match value {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        trace!(changes = count, "Committed change set");
        Ok(())
    }
}
