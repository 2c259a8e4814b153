//! Persisted key-value store for the small slice of session state that
//! survives restarts: chosen body/heading font specs and the catalog
//! credential.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::TheroError;

pub const KEY_FONT_BODY: &str = "thero.googleFontBody";
pub const KEY_FONT_HEADING: &str = "thero.googleFontHeading";
pub const KEY_CREDENTIAL: &str = "thero.googleApiKey";

/// Plain string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, TheroError>;
    fn set(&self, key: &str, value: &str) -> Result<(), TheroError>;
    fn remove(&self, key: &str) -> Result<(), TheroError>;
}

/// Read a key, treating failures as absent.
pub fn get_or_default(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!("Failed to read {key}: {e}");
            None
        }
    }
}

/// Write a key. Errors are logged but not propagated.
pub fn set_or_warn(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!("Failed to persist {key}: {e}");
    }
}

/// Remove a key. Errors are logged but not propagated.
pub fn remove_or_warn(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!("Failed to remove {key}: {e}");
    }
}

/// TOML table on disk. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, TheroError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| TheroError::Storage(e.to_string()))
    }

    fn write_table(&self, table: &BTreeMap<String, String>) -> Result<(), TheroError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(table).map_err(|e| TheroError::Storage(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(
        &self,
        edit: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), TheroError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| TheroError::Storage("store lock poisoned".into()))?;
        let mut table = self.read_table()?;
        edit(&mut table);
        self.write_table(&table)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TheroError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TheroError> {
        self.update(|table| {
            table.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), TheroError> {
        self.update(|table| {
            table.remove(key);
        })
    }
}

/// In-process store. `failing()` builds one whose every call errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, TheroError> {
        if self.failing {
            return Err(TheroError::Storage("store unavailable".into()));
        }
        self.entries
            .lock()
            .map_err(|_| TheroError::Storage("store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TheroError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TheroError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TheroError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Body/heading font specs as last persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedFonts {
    pub body: Option<String>,
    pub heading: Option<String>,
}

impl PersistedFonts {
    /// Load from the store; unreadable keys count as absent.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            body: get_or_default(store, KEY_FONT_BODY),
            heading: get_or_default(store, KEY_FONT_HEADING),
        }
    }
}
