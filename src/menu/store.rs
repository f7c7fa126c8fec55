//! Key-value stores backing the menu cache.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Mutex,
    RwLock,
};

use serde_json::{
    Map,
    Value,
};

use super::StoreError;

/// String key → string value store, like browser `localStorage`.
///
/// Reads and writes are not coordinated across calls: the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

/// Store living for the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored values
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().map_or(0, |items| items.len())
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as one JSON object file.
///
/// The file is read on every lookup and rewritten on every write, so several
/// processes sharing it see each other's last write. A missing file is an
/// empty store. Keys written by others keep their value even when it is not a
/// string; such values read back as their JSON text.
#[derive(Debug)]
pub struct FileStore {
    /// Backing JSON file
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// A store backed by `path`. The file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry. A missing or blank file is empty; anything but a
    /// JSON object is corrupt.
    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    /// Replace the file with `items`.
    fn write_all(&self, items: &Map<String, Value>) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })?;

        // Readers never see a half-written file.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).map_err(io_error)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_error)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key).map(|value| match value {
            Value::String(text) => text,
            other => other.to_string(),
        }))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        // A corrupt file is replaced by the new content.
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), "Replacing corrupt store file: {source}");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&items)?;

        tracing::debug!(path = %self.path.display(), key, "Stored item");
        Ok(())
    }
}
