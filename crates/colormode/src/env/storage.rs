//! Preference storage backends.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use super::PreferenceStorage;

/// In-memory storage for testing.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// A host without persistent storage. Reads nothing, drops writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl PreferenceStorage for NoStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) {
        tracing::trace!(key, "no storage available, dropping write");
    }

    fn remove(&self, _key: &str) {}
}

/// Storage backed by a JSON object on disk.
///
/// The file is read on every access so several processes sharing it see each
/// other's writes. A missing file reads as empty. An unreadable or malformed
/// file also reads as empty, with a warning.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `key`, creating the file and its parent directories if needed.
    pub fn try_set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    /// Removes `key`. A missing file is not an error.
    pub fn try_remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> io::Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read preference store");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.try_set(key, value) {
            tracing::warn!(path = %self.path.display(), error = %err, "cannot write preference store");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.try_remove(key) {
            tracing::warn!(path = %self.path.display(), error = %err, "cannot write preference store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new().with_entry("a", "dark");
        assert_eq!(storage.get("a").as_deref(), Some("dark"));
        storage.set("a", "light");
        assert_eq!(storage.get("a").as_deref(), Some("light"));
        storage.remove("a");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_no_storage_reads_nothing() {
        NoStorage.set("a", "dark");
        assert_eq!(NoStorage.get("a"), None);
    }

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));
        assert_eq!(storage.get("nuxt-color-mode"), None);
    }

    #[test]
    fn test_file_storage_roundtrip_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let storage = FileStorage::new(&path);

        storage.try_set("nuxt-color-mode", "dark").unwrap();
        storage.try_set("other", "x").unwrap();
        assert!(path.exists());
        assert_eq!(storage.get("nuxt-color-mode").as_deref(), Some("dark"));

        storage.try_remove("nuxt-color-mode").unwrap();
        assert_eq!(storage.get("nuxt-color-mode"), None);
        assert_eq!(storage.get("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_file_storage_malformed_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get("nuxt-color-mode"), None);
        assert!(storage.try_set("nuxt-color-mode", "dark").is_err());
    }

    #[test]
    fn test_file_storage_shared_between_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        FileStorage::new(&path).set("k", "light");
        assert_eq!(FileStorage::new(&path).get("k").as_deref(), Some("light"));
    }
}
