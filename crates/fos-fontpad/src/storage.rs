//! Persisted editor state
//!
//! Key/value storage in the manner of `localStorage`: four string keys,
//! read once when the editor opens and all rewritten on every change.
//! Last write wins; nothing expires.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::state::EditorState;

/// Key holding the editor text
pub const TEXT_KEY: &str = "text";
/// Key holding the selected family
pub const FAMILY_KEY: &str = "fontFamily";
/// Key holding the selected weight
pub const WEIGHT_KEY: &str = "fontWeight";
/// Key holding the italic flag (`"true"` / `"false"`)
pub const ITALIC_KEY: &str = "isItalic";

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage document is invalid: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key/value store
pub trait Storage {
    /// Read a value
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several values
    ///
    /// Every entry is attempted even after a failure; the first error is
    /// returned.
    fn save_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut first_error = None;
        for (key, value) in entries {
            if let Err(e) = self.save(key, value) {
                tracing::debug!("Failed to write {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn save_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).save_all(entries)
    }
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an item
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Remove all items
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object file
///
/// The file is read once on open and replaced whole on every save: the
/// document goes to a sibling temporary file which is then renamed over
/// the target, so readers never see a partial write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open a storage file; a missing file starts out empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened storage {} ({} items)", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        let temp = self.temp_path();
        std::fs::write(&temp, json)?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// One rewrite for the whole batch
    fn save_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.items.insert(key.to_string(), value.to_string());
        }
        self.flush()
    }
}

/// Raw values read back from storage
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub text: Option<String>,
    pub family: Option<String>,
    pub weight: Option<String>,
    pub italic: bool,
}

impl PersistedState {
    /// Read all keys; unreadable keys are treated as absent
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let read = |key: &str| match storage.load(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read {} from storage: {}", key, e);
                None
            }
        };

        Self {
            text: read(TEXT_KEY),
            family: read(FAMILY_KEY),
            weight: read(WEIGHT_KEY),
            italic: read(ITALIC_KEY).as_deref() == Some("true"),
        }
    }

    /// Write all four keys for the given state
    ///
    /// A key that fails to write does not stop the others.
    pub fn save<S: Storage + ?Sized>(storage: &mut S, state: &EditorState) -> Result<(), StorageError> {
        let weight = state.weight.to_string();
        storage.save_all(&[
            (TEXT_KEY, state.text.as_str()),
            (FAMILY_KEY, state.family.as_str()),
            (WEIGHT_KEY, weight.as_str()),
            (ITALIC_KEY, if state.italic { "true" } else { "false" }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_fonts::FontWeight;

    fn sample_state() -> EditorState {
        EditorState {
            text: "Hello World".to_string(),
            family: "ABeeZee".to_string(),
            weight: FontWeight::BOLD,
            italic: true,
        }
    }

    /// Memory storage that fails reads and writes of chosen keys
    struct FailingStorage {
        inner: MemoryStorage,
        failing: Vec<&'static str>,
    }

    impl FailingStorage {
        fn failing(keys: &[&'static str]) -> Self {
            Self {
                inner: MemoryStorage::new(),
                failing: keys.to_vec(),
            }
        }

        fn check(&self, key: &str) -> Result<(), StorageError> {
            if self.failing.iter().any(|failing| *failing == key) {
                Err(std::io::Error::new(ErrorKind::PermissionDenied, "quota exceeded").into())
            } else {
                Ok(())
            }
        }
    }

    impl Storage for FailingStorage {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.check(key)?;
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.save(key, value)
        }
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.save("key", "value").unwrap();
        assert_eq!(storage.get("key"), Some("value"));
        assert_eq!(storage.load("missing").unwrap(), None);

        storage.clear();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_save_writes_all_keys() {
        let mut storage = MemoryStorage::new();
        PersistedState::save(&mut storage, &sample_state()).unwrap();

        assert_eq!(storage.len(), 4);
        assert_eq!(storage.get(TEXT_KEY), Some("Hello World"));
        assert_eq!(storage.get(FAMILY_KEY), Some("ABeeZee"));
        assert_eq!(storage.get(WEIGHT_KEY), Some("700"));
        assert_eq!(storage.get(ITALIC_KEY), Some("true"));
    }

    #[test]
    fn test_save_continues_past_failed_key() {
        let mut storage = FailingStorage::failing(&[TEXT_KEY]);
        let result = PersistedState::save(&mut storage, &sample_state());

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(storage.inner.get(TEXT_KEY), None);
        assert_eq!(storage.inner.get(FAMILY_KEY), Some("ABeeZee"));
        assert_eq!(storage.inner.get(WEIGHT_KEY), Some("700"));
        assert_eq!(storage.inner.get(ITALIC_KEY), Some("true"));
    }

    #[test]
    fn test_save_reports_first_error() {
        let mut storage = FailingStorage::failing(&[FAMILY_KEY, ITALIC_KEY]);
        let err = PersistedState::save(&mut storage, &sample_state()).unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(storage.inner.len(), 2);
    }

    #[test]
    fn test_load_failures_read_as_defaults() {
        let mut storage = FailingStorage::failing(&[]);
        PersistedState::save(&mut storage, &sample_state()).unwrap();
        storage.failing = vec![TEXT_KEY, FAMILY_KEY, WEIGHT_KEY, ITALIC_KEY];

        assert_eq!(PersistedState::load(&storage), PersistedState::default());

        storage.failing = vec![WEIGHT_KEY];
        let persisted = PersistedState::load(&storage);
        assert_eq!(persisted.text.as_deref(), Some("Hello World"));
        assert_eq!(persisted.weight, None);
        assert!(persisted.italic);
    }

    #[test]
    fn test_load_treats_empty_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.save(TEXT_KEY, "").unwrap();
        storage.save(WEIGHT_KEY, "300").unwrap();
        storage.save(ITALIC_KEY, "yes").unwrap();

        let persisted = PersistedState::load(&storage);
        assert_eq!(persisted.text, None);
        assert_eq!(persisted.family, None);
        assert_eq!(persisted.weight.as_deref(), Some("300"));
        assert!(!persisted.italic);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpad.json");

        let mut storage = FileStorage::open(&path).unwrap();
        PersistedState::save(&mut storage, &sample_state()).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        let persisted = PersistedState::load(&reopened);
        assert_eq!(persisted.text.as_deref(), Some("Hello World"));
        assert_eq!(persisted.weight.as_deref(), Some("700"));
        assert!(persisted.italic);
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpad.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStorage::open(&path), Err(StorageError::Serialize(_))));
    }

    #[test]
    fn test_file_storage_replaces_file_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpad.json");

        let mut storage = FileStorage::open(&path).unwrap();
        PersistedState::save(&mut storage, &sample_state()).unwrap();
        storage.save(TEXT_KEY, "second").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, ["fontpad.json"]);

        let raw: BTreeMap<String, String> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[TEXT_KEY], "second");
    }

    #[test]
    fn test_file_storage_write_failure_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpad.json");

        let mut storage = FileStorage::open(&path).unwrap();
        PersistedState::save(&mut storage, &sample_state()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // A directory in the way of the temporary file makes the write fail
        std::fs::create_dir(dir.path().join("fontpad.json.tmp")).unwrap();
        assert!(matches!(storage.save(TEXT_KEY, "lost"), Err(StorageError::Io(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
