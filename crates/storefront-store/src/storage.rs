//! # Key-Value Storage
//!
//! Durable client storage: a tiny string-keyed store that survives restarts.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KeyValueStorage                                   │
//! │             get_item / set_item / remove_item                           │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │        FileStorage           │   │        MemoryStorage         │   │
//! │  │  <data dir>/<key>.json       │   │  Arc<Mutex<HashMap>>         │   │
//! │  │  write tmp ──► rename        │   │  shared between clones       │   │
//! │  │  (a reader never sees half   │   │  (tests, --ephemeral)        │   │
//! │  │   a record)                  │   │                              │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations are synchronous: a cart mutation is persisted before the
//! mutating call returns.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Storage Trait
// =============================================================================

/// A string-keyed persistent store.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// Lets a backend chosen at runtime stand in for a concrete one.
impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// Stores each key as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Platform data directory for the storefront.
    ///
    /// ## Locations
    /// - Linux: `~/.local/share/storefront`
    /// - macOS: `~/Library/Application Support/com.storefront.storefront`
    /// - Windows: `%APPDATA%\storefront\storefront\data`
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Directory the records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(key, err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));

        let write_tmp = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()
        };
        write_tmp().map_err(|e| StoreError::io(key, e))?;

        fs::rename(&tmp_path, &path).map_err(|e| StoreError::io(key, e))?;

        debug!(key = %key, path = %path.display(), bytes = value.len(), "Stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(key, err)),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage. Clones share the same map, so a clone handed to a
/// store can be inspected from a test afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self.items.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self.items.lock().map_err(|_| StoreError::LockPoisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut items = self.items.lock().map_err(|_| StoreError::LockPoisoned)?;
        items.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get_item("cart-storage").unwrap(), None);

        storage.set_item("cart-storage", r#"{"items":[]}"#).unwrap();
        assert_eq!(
            storage.get_item("cart-storage").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
        assert!(dir.path().join("nested/cart-storage.json").exists());

        storage.set_item("cart-storage", "{}").unwrap();
        assert_eq!(storage.get_item("cart-storage").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("cart-storage", "{}").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cart-storage.json".to_string()]);
    }

    #[test]
    fn test_file_storage_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.remove_item("missing").unwrap();

        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.set_item("k", "v").unwrap();
        assert_eq!(view.get_item("k").unwrap().as_deref(), Some("v"));

        view.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
