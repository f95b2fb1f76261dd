//! Credential store implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use insightgen_error::{StoreError, StoreErrorKind};
use insightgen_interface::CredentialStore;
use tracing::{debug, instrument};

fn poisoned<T>(_: T) -> StoreError {
    StoreError::new(StoreErrorKind::Corrupt("store lock poisoned".to_string()))
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file and its parent directories are created on the first write. A
/// missing or empty file reads as an empty store.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCredentialStore {
    /// Store at `path`. No I/O happens until the first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// `<config_dir>/insightgen/publish.json`.
    ///
    /// # Errors
    ///
    /// Fails when the platform has no per-user configuration directory.
    pub fn default_location() -> Result<PathBuf, StoreError> {
        dirs::config_dir()
            .map(|dir| dir.join("insightgen").join("publish.json"))
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::InvalidConfig(
                    "no user configuration directory".to_string(),
                ))
            })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::new(StoreErrorKind::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::new(StoreErrorKind::Corrupt(e.to_string())))?;
        std::fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Store written");
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.guard.lock().map_err(poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.guard.lock().map_err(poisoned)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.guard.lock().map_err(poisoned)?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
