use std::collections::btree_map::{self, BTreeMap};

use super::keys::StateKey;

/// Pending mutations captured during one action.
///
/// `None` marks a removal. Applied all-or-nothing by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    writes: BTreeMap<StateKey, Option<Vec<u8>>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: StateKey, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    pub fn delete(&mut self, key: StateKey) {
        self.writes.insert(key, None);
    }

    /// `Some(None)` if the key was removed, `None` if it was never touched.
    pub fn get(&self, key: &StateKey) -> Option<Option<&[u8]>> {
        self.writes.get(key).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, StateKey, Option<Vec<u8>>> {
        self.writes.iter()
    }

    /// Fold `later` on top of `self`; `later` wins on shared keys.
    pub fn merge(&mut self, later: ChangeSet) {
        self.writes.extend(later.writes);
    }
}

impl IntoIterator for ChangeSet {
    type Item = (StateKey, Option<Vec<u8>>);
    type IntoIter = btree_map::IntoIter<StateKey, Option<Vec<u8>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
