//! State-access declarations.
//!
//! An action names every key it will touch together with the strongest
//! access it needs. Schedulers compare these sets to find conflicts without
//! running anything.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use super::keys::StateKey;

/// Permission an action claims over one key.
///
/// Ordered by strength: `Read < Write < Allocate`. A stronger mode grants
/// everything a weaker one does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessMode {
    /// Inspect only.
    Read,
    /// Read and overwrite an existing value.
    Write,
    /// Read, overwrite, or create the value; the key's chunk hint bounds its size.
    Allocate,
}

impl AccessMode {
    /// Whether holding this mode lets the action change the key.
    pub fn is_mutating(self) -> bool {
        !matches!(self, AccessMode::Read)
    }

    /// Whether `self` grants at least `required`.
    pub fn permits(self, required: AccessMode) -> bool {
        self >= required
    }
}

/// How two declarations overlap on a shared key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Both sides mutate the key.
    WriteWrite,
    /// One side reads what the other mutates.
    ReadWrite,
}

/// Exact key set an action will touch, ordered for determinism.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateKeys {
    keys: BTreeMap<StateKey, AccessMode>,
}

impl StateKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: StateKey, mode: AccessMode) -> Self {
        self.insert(key, mode);
        self
    }

    /// Declare `key`. Declaring the same key twice keeps the stronger mode.
    pub fn insert(&mut self, key: StateKey, mode: AccessMode) {
        self.keys
            .entry(key)
            .and_modify(|existing| *existing = (*existing).max(mode))
            .or_insert(mode);
    }

    pub fn get(&self, key: &StateKey) -> Option<AccessMode> {
        self.keys.get(key).copied()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.keys.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, StateKey, AccessMode> {
        self.keys.iter()
    }

    /// Keys this declaration may mutate.
    pub fn mutated_keys(&self) -> impl Iterator<Item = &StateKey> {
        self.keys
            .iter()
            .filter(|(_, mode)| mode.is_mutating())
            .map(|(key, _)| key)
    }

    /// First conflicting key with `other`, if any.
    ///
    /// Two declarations conflict iff they share a key and at least one side
    /// mutates it. Write-write overlaps are reported in preference to
    /// read-write ones.
    pub fn conflicts_with(&self, other: &StateKeys) -> Option<(StateKey, ConflictKind)> {
        let mut read_write = None;

        for (key, mode) in &self.keys {
            let Some(other_mode) = other.get(key) else {
                continue;
            };
            match (mode.is_mutating(), other_mode.is_mutating()) {
                (true, true) => return Some((key.clone(), ConflictKind::WriteWrite)),
                (true, false) | (false, true) => {
                    if read_write.is_none() {
                        read_write = Some((key.clone(), ConflictKind::ReadWrite));
                    }
                }
                (false, false) => {}
            }
        }

        read_write
    }
}

impl<'a> IntoIterator for &'a StateKeys {
    type Item = (&'a StateKey, &'a AccessMode);
    type IntoIter = btree_map::Iter<'a, StateKey, AccessMode>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl FromIterator<(StateKey, AccessMode)> for StateKeys {
    fn from_iter<T: IntoIterator<Item = (StateKey, AccessMode)>>(iter: T) -> Self {
        let mut keys = StateKeys::new();
        for (key, mode) in iter {
            keys.insert(key, mode);
        }
        keys
    }
}
