//! Execution view restricted to a declared key set.
//!
//! Reads go through a write overlay onto the base snapshot; writes stay in
//! the overlay until the caller takes the [`ChangeSet`] and commits it. An
//! executor that fails simply has its view dropped.

use crate::domain::{AccessMode, ChangeSet, StateError, StateKey, StateKeys};
use crate::ports::{ImmutableState, MutableState};

pub struct ScopedState<'a, S: ImmutableState + ?Sized> {
    base: &'a S,
    declared: &'a StateKeys,
    changes: ChangeSet,
}

impl<'a, S: ImmutableState + ?Sized> ScopedState<'a, S> {
    pub fn new(base: &'a S, declared: &'a StateKeys) -> Self {
        Self {
            base,
            declared,
            changes: ChangeSet::new(),
        }
    }

    pub fn declared(&self) -> &StateKeys {
        self.declared
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn into_changes(self) -> ChangeSet {
        self.changes
    }

    fn require(&self, key: &StateKey, required: AccessMode) -> Result<AccessMode, StateError> {
        let declared = self
            .declared
            .get(key)
            .ok_or_else(|| StateError::UndeclaredKey { key: key.clone() })?;
        if !declared.permits(required) {
            return Err(StateError::PermissionDenied {
                key: key.clone(),
                declared,
                required,
            });
        }
        Ok(declared)
    }

    fn current(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        match self.changes.get(key) {
            Some(overlay) => Ok(overlay.map(<[u8]>::to_vec)),
            None => self.base.get_value(key),
        }
    }
}

impl<S: ImmutableState + ?Sized> ImmutableState for ScopedState<'_, S> {
    fn get_value(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        self.require(key, AccessMode::Read)?;
        self.current(key)
    }
}

impl<S: ImmutableState + ?Sized> MutableState for ScopedState<'_, S> {
    fn insert(&mut self, key: &StateKey, value: Vec<u8>) -> Result<(), StateError> {
        let declared = self.require(key, AccessMode::Write)?;

        // Write only overwrites; creating a value needs Allocate.
        if declared == AccessMode::Write && self.current(key)?.is_none() {
            return Err(StateError::PermissionDenied {
                key: key.clone(),
                declared,
                required: AccessMode::Allocate,
            });
        }

        let max = key.max_value_len();
        if value.len() > max {
            return Err(StateError::ValueTooLarge {
                key: key.clone(),
                len: value.len(),
                max,
            });
        }

        self.changes.put(key.clone(), value);
        Ok(())
    }

    fn remove(&mut self, key: &StateKey) -> Result<(), StateError> {
        self.require(key, AccessMode::Write)?;
        self.changes.delete(key.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateDb;
    use crate::domain::{balance_key, domain_key};
    use shared_types::{Address, AddressKind};

    fn account(b: u8) -> Address {
        Address::create(AddressKind::Ed25519, [b; 32])
    }

    fn seeded() -> InMemoryStateDb {
        let mut db = InMemoryStateDb::new();
        db.insert(&balance_key(&account(1)), vec![0; 8]).unwrap();
        db
    }

    #[test]
    fn test_undeclared_key_rejected() {
        let db = seeded();
        let keys = StateKeys::new();
        let view = ScopedState::new(&db, &keys);

        let err = view.get_value(&balance_key(&account(1))).unwrap_err();
        assert!(matches!(err, StateError::UndeclaredKey { .. }));
    }

    #[test]
    fn test_read_cannot_write() {
        let db = seeded();
        let key = balance_key(&account(1));
        let keys = StateKeys::new().with(key.clone(), AccessMode::Read);
        let mut view = ScopedState::new(&db, &keys);

        assert!(view.get_value(&key).unwrap().is_some());
        let err = view.insert(&key, vec![1; 8]).unwrap_err();
        assert!(matches!(
            err,
            StateError::PermissionDenied {
                declared: AccessMode::Read,
                required: AccessMode::Write,
                ..
            }
        ));
        assert!(view.remove(&key).is_err());
    }

    #[test]
    fn test_write_overwrites_but_cannot_create() {
        let db = seeded();
        let existing = balance_key(&account(1));
        let missing = balance_key(&account(2));
        let keys = StateKeys::new()
            .with(existing.clone(), AccessMode::Write)
            .with(missing.clone(), AccessMode::Write);
        let mut view = ScopedState::new(&db, &keys);

        view.insert(&existing, vec![1; 8]).unwrap();
        let err = view.insert(&missing, vec![1; 8]).unwrap_err();
        assert!(matches!(
            err,
            StateError::PermissionDenied {
                required: AccessMode::Allocate,
                ..
            }
        ));
    }

    #[test]
    fn test_allocate_creates() {
        let db = seeded();
        let key = domain_key("hi");
        let keys = StateKeys::new().with(key.clone(), AccessMode::Allocate);
        let mut view = ScopedState::new(&db, &keys);

        assert_eq!(view.get_value(&key).unwrap(), None);
        view.insert(&key, vec![7; 33]).unwrap();
        assert_eq!(view.get_value(&key).unwrap(), Some(vec![7; 33]));
    }

    #[test]
    fn test_value_bounded_by_chunk_hint() {
        let db = seeded();
        let key = domain_key("hi");
        let keys = StateKeys::new().with(key.clone(), AccessMode::Allocate);
        let mut view = ScopedState::new(&db, &keys);

        let err = view.insert(&key, vec![0; 65]).unwrap_err();
        assert_eq!(
            err,
            StateError::ValueTooLarge {
                key,
                len: 65,
                max: 64
            }
        );
    }

    #[test]
    fn test_overlay_does_not_touch_base() {
        let db = seeded();
        let key = balance_key(&account(1));
        let keys = StateKeys::new().with(key.clone(), AccessMode::Write);
        let mut view = ScopedState::new(&db, &keys);

        view.insert(&key, vec![9; 8]).unwrap();
        assert_eq!(view.get_value(&key).unwrap(), Some(vec![9; 8]));
        assert_eq!(db.get_value(&key).unwrap(), Some(vec![0; 8]));

        view.remove(&key).unwrap();
        assert_eq!(view.get_value(&key).unwrap(), None);

        let changes = view.into_changes();
        assert_eq!(changes.get(&key), Some(None));
    }
}
