//! Key/value persistence for storefront state.
//!
//! The storefront mirrors its stores into a string-keyed store after every
//! mutation, the same shape as browser local storage: keys are plain strings,
//! values are JSON documents serialized to strings.
//!
//! # Keys
//!
//! ```text
//! furnishme-users          → JSON array of users
//! furnishme-cart           → JSON array of cart items
//! furnishme-login          → JSON boolean
//! furnishme-current-user   → JSON user
//! ```
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, used by tests and embedders
//! - [`FileStorage`] - one JSON file on disk, used by the CLI

mod file;
mod memory;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A synchronous string-keyed store.
///
/// Reads are infallible: a backend that cannot produce a value reports it as
/// absent. Writes either fully apply or return an error and leave the
/// previous contents in place.
pub trait KeyValueStore {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the write.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and deserialize the JSON value under `key`.
///
/// Missing keys and malformed values both come back as `None`; malformed
/// values are logged and otherwise ignored.
pub fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed persisted value");
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(read_json::<bool>(&storage, "furnishme-login"), None);
    }

    #[test]
    fn test_read_json_malformed_is_absent() {
        let mut storage = MemoryStorage::new();
        storage.set("furnishme-login", "{not json".to_owned()).unwrap();
        assert_eq!(read_json::<bool>(&storage, "furnishme-login"), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut storage = MemoryStorage::new();
        write_json(&mut storage, "furnishme-login", &true).unwrap();
        assert_eq!(storage.get("furnishme-login").as_deref(), Some("true"));
        assert_eq!(read_json::<bool>(&storage, "furnishme-login"), Some(true));
    }
}
