//! Persisted state containers.
//!
//! Each piece of storefront state (cart, session, user directory) lives in a
//! [`Store`]. A store is the only way to change its value: [`Store::mutate`]
//! applies a change to a copy, writes the copy to the key/value store, and
//! only then commits it. Subscribers run after every committed mutation.

use std::fmt;

use crate::storage::{KeyValueStore, StorageError};

/// A value that knows how to read and write itself in a [`KeyValueStore`].
pub trait Persist: Sized {
    /// Read the persisted value. Missing or malformed data is `None`.
    fn load(storage: &dyn KeyValueStore) -> Option<Self>;

    /// Write this value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    fn save(&self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError>;
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A persisted value with change notification.
pub struct Store<T> {
    value: T,
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_subscription: u64,
}

impl<T> Store<T> {
    /// Wrap an already-loaded value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Number of committed mutations since load.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Call `subscriber` with the new value after every committed mutation.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Drop a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self, value: T) {
        self.value = value;
        self.revision += 1;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: Persist> Store<T> {
    /// Load from storage, falling back to `T::default()` when absent.
    pub fn load(storage: &dyn KeyValueStore) -> Self
    where
        T: Default,
    {
        Self::new(T::load(storage).unwrap_or_default())
    }

    /// Load from storage; when absent, build the value with `init` and
    /// persist it immediately.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the initial value cannot be written.
    pub fn load_or_else(
        storage: &mut dyn KeyValueStore,
        init: impl FnOnce() -> T,
    ) -> Result<Self, StorageError> {
        if let Some(value) = T::load(storage) {
            return Ok(Self::new(value));
        }
        let value = init();
        value.save(storage)?;
        Ok(Self::new(value))
    }
}

impl<T: Persist + Clone> Store<T> {
    /// Apply `change` and persist the result.
    ///
    /// The change runs against a copy. If the write fails the copy is
    /// discarded, the current value is untouched and subscribers do not run.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the new value cannot be persisted.
    pub fn mutate<R>(
        &mut self,
        storage: &mut dyn KeyValueStore,
        change: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StorageError> {
        let mut next = self.value.clone();
        let output = change(&mut next);
        next.save(storage)?;
        self.commit(next);
        Ok(output)
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::{MemoryStorage, read_json, write_json};

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Counter(u32);

    impl Persist for Counter {
        fn load(storage: &dyn KeyValueStore) -> Option<Self> {
            read_json(storage, "counter").map(Self)
        }

        fn save(&self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
            write_json(storage, "counter", &self.0)
        }
    }

    /// Accepts reads, rejects every write.
    struct ReadOnly(MemoryStorage);

    impl KeyValueStore for ReadOnly {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "read-only".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.set(key, String::new())
        }
    }

    #[test]
    fn test_load_missing_uses_default() {
        let storage = MemoryStorage::new();
        let store = Store::<Counter>::load(&storage);
        assert_eq!(store.get(), &Counter(0));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_load_or_else_persists_initial_value() {
        let mut storage = MemoryStorage::new();
        let store = Store::load_or_else(&mut storage, || Counter(7)).unwrap();

        assert_eq!(store.get(), &Counter(7));
        assert_eq!(storage.get("counter").as_deref(), Some("7"));
    }

    #[test]
    fn test_load_or_else_prefers_stored_value() {
        let mut storage = MemoryStorage::new();
        storage.set("counter", "3".to_owned()).unwrap();

        let store = Store::load_or_else(&mut storage, || Counter(7)).unwrap();
        assert_eq!(store.get(), &Counter(3));
    }

    #[test]
    fn test_mutate_persists_and_bumps_revision() {
        let mut storage = MemoryStorage::new();
        let mut store = Store::<Counter>::load(&storage);

        let returned = store
            .mutate(&mut storage, |counter| {
                counter.0 += 2;
                counter.0
            })
            .unwrap();

        assert_eq!(returned, 2);
        assert_eq!(store.get(), &Counter(2));
        assert_eq!(store.revision(), 1);
        assert_eq!(storage.get("counter").as_deref(), Some("2"));
    }

    #[test]
    fn test_failed_write_leaves_value_and_skips_subscribers() {
        let mut storage = ReadOnly(MemoryStorage::new());
        let mut store = Store::new(Counter(1));
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| *seen.borrow_mut() += 1);

        let result = store.mutate(&mut storage, |counter| counter.0 = 9);

        assert!(result.is_err());
        assert_eq!(store.get(), &Counter(1));
        assert_eq!(store.revision(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_subscribers_see_each_commit_once() {
        let mut storage = MemoryStorage::new();
        let mut store = Store::<Counter>::load(&storage);
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        store.subscribe(move |counter: &Counter| sink.borrow_mut().push(counter.0));

        store.mutate(&mut storage, |counter| counter.0 = 1).unwrap();
        store.mutate(&mut storage, |counter| counter.0 = 5).unwrap();

        assert_eq!(*values.borrow(), [1, 5]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut storage = MemoryStorage::new();
        let mut store = Store::<Counter>::load(&storage);
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        let id = store.subscribe(move |_| *seen.borrow_mut() += 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.mutate(&mut storage, |counter| counter.0 = 1).unwrap();

        assert_eq!(*calls.borrow(), 0);
    }
}
