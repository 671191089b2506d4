use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Key under which the editor persists its collection.
pub const STORAGE_KEY: &str = "pointcloud_paths";

/// Minimal string key-value persistence, in the spirit of browser local storage.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Backend failures and invalid keys.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Backend failures and invalid keys.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Backend failures and invalid keys.
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// Volatile in-process store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }
}

/// Directory-backed store: each key is one `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the store directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.file_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.file_for(key)?;
        // Staged write; the rename swaps the value in atomically.
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.file_for(key)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys are non-empty ASCII alphanumerics plus `_`, `-` and `.`, and may not
/// start with a dot.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
        store.set(STORAGE_KEY, "{\"a\":1}").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("{\"a\":1}"));
        store.set(STORAGE_KEY, "[]").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.remove(STORAGE_KEY).unwrap());
        assert!(!store.remove(STORAGE_KEY).unwrap());
    }

    #[test]
    fn memory_store_roundtrip() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("store")).unwrap();
        exercise(&mut store);
        assert!(store.dir().is_dir());
    }

    #[test]
    fn file_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set("k", "v").unwrap();
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let mut store = MemoryStore::new();
        for key in ["", "../escape", ".hidden", "a/b", "sp ace"] {
            assert!(matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))));
        }
    }
}
