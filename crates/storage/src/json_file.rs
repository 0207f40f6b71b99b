use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::warn;

use crate::repository::{KeyValueStore, StorageError};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a flat JSON object on disk.
///
/// Every call re-reads the file, so separate processes sharing a path see
/// each other's writes. A missing file reads as empty. Writes replace the
/// file atomically; a file that no longer parses is overwritten by the next
/// write instead of blocking it.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        // Same directory, so the rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(raw.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Serialization(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding unreadable store file");
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn apply(&self, changes: &[(&str, Option<&str>)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in changes {
                match value {
                    Some(value) => entries.insert((*key).to_owned(), (*value).to_owned()),
                    None => entries.remove(*key),
                };
            }
        })
    }
}
