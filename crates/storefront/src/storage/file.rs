//! File-backed storage backend.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every write, through a sibling `.tmp` file
/// that is renamed over the target, so a crash mid-write leaves the previous
/// file intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is logged and treated as empty; it is overwritten on the next
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Storage file is malformed, starting empty"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), StorageError> {
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        next.insert(key.to_owned(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }
}
