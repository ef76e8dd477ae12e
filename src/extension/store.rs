//! Client-local persisted state.
//!
//! `ClientStore` is loaded once at startup and saved after every mutation.
//! Keys other than `summaryHistory` and `settings` are carried through
//! untouched.

use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::history::{HISTORY_CAP, HistoryEntry, push_entry};
use super::settings::Settings;

pub const HISTORY_KEY: &str = "summaryHistory";
pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access client store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client store is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Client store root must be a JSON object")]
    NotAnObject,
}

/// Key-value persistence behind the client store.
pub trait StorageBackend {
    /// # Errors
    ///
    /// Backend-specific read or decode failures.
    fn load(&self) -> Result<Map<String, Value>, StoreError>;

    /// # Errors
    ///
    /// Backend-specific write or encode failures.
    fn save(&mut self, data: &Map<String, Value>) -> Result<(), StoreError>;
}

/// File name of the client store inside the per-user data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Per-user location of the client store, e.g.
/// `~/.local/share/quicksum/store.json` on Linux.
#[must_use]
pub fn default_store_path() -> PathBuf {
    ProjectDirs::from("com", "quicksum", "quicksum")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".quicksum"))
        .join(STORE_FILE_NAME)
}

/// JSON file on disk. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject),
        }
    }

    fn save(&mut self, data: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(data)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "Client store saved");
        Ok(())
    }
}

/// In-memory store, counting saves.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    pub data: Map<String, Value>,
    pub saves: usize,
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &Map<String, Value>) -> Result<(), StoreError> {
        self.data = data.clone();
        self.saves += 1;
        Ok(())
    }
}

/// History and settings, owned explicitly by the client.
pub struct ClientStore<B: StorageBackend> {
    backend: B,
    history: Vec<HistoryEntry>,
    settings: Settings,
    extra: Map<String, Value>,
}

impl<B: StorageBackend> ClientStore<B> {
    /// Reads the backend. When no settings exist yet, defaults are written
    /// back immediately with an empty history.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and malformed stored values.
    pub fn load(backend: B) -> Result<Self, StoreError> {
        let mut extra = backend.load()?;

        let mut history: Vec<HistoryEntry> = match extra.remove(HISTORY_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        history.truncate(HISTORY_CAP);
        let stored_settings = extra.remove(SETTINGS_KEY);
        let first_run = stored_settings.is_none();
        let settings = match stored_settings {
            Some(value) => serde_json::from_value(value)?,
            None => Settings::default(),
        };

        let mut store = Self {
            backend,
            history,
            settings,
            extra,
        };

        if first_run {
            info!("Initializing client store with default settings");
            store.save()?;
        }

        Ok(store)
    }

    /// Most-recent-first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// # Errors
    ///
    /// Propagates save failures.
    pub fn record_summary(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        push_entry(&mut self.history, entry);
        self.save()
    }

    /// # Errors
    ///
    /// Propagates save failures.
    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.history.clear();
        self.save()
    }

    /// # Errors
    ///
    /// Propagates save failures.
    pub fn update_settings<F>(&mut self, update: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings),
    {
        update(&mut self.settings);
        self.save()
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let mut data = self.extra.clone();
        data.insert(HISTORY_KEY.to_string(), serde_json::to_value(&self.history)?);
        data.insert(SETTINGS_KEY.to_string(), serde_json::to_value(&self.settings)?);
        self.backend.save(&data)
    }
}
