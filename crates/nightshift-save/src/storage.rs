//! Key-value storage backends for save slots.
//!
//! A slot is a single JSON document addressed by a short key. The file
//! backend keeps one `<key>.json` per slot under a directory; the memory
//! backend is for tests and for embedding hosts that persist elsewhere.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// A place save slots can be read from and written to.
pub trait Storage {
    /// Read the raw document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Slot keys are limited to ASCII letters, digits, `-` and `_`.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// One JSON file per slot under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store slots under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        // Write beside the slot, then rename over it.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

/// In-memory slots.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether no slot has been written.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
