//! File-backed storage for desktop builds.
//!
//! Keys live in a single JSON map on disk:
//! - Linux: `~/.config/lorebook/storage.json`
//! - macOS: `~/Library/Application Support/io.lorebook.client/storage.json`
//! - Windows: `%APPDATA%\lorebook\client\storage.json`

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use directories::ProjectDirs;

use crate::ports::outbound::StorageProvider;

/// Storage provider persisting every `save` straight to a JSON file.
pub struct DesktopStorageProvider {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl DesktopStorageProvider {
    /// Open storage at the platform config directory, loading existing data.
    pub fn new() -> Self {
        let path = ProjectDirs::from("io", "lorebook", "client")
            .map(|dirs| dirs.config_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("lorebook_storage.json"));
        Self::at_path(path)
    }

    /// Open storage at an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to parse storage file: {e}");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        tracing::debug!(path = %path.display(), "desktop storage initialized");
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn write_through(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("failed to create storage directory: {e}");
                return;
            }
        }
        let serialized = match self.entries.read() {
            Ok(entries) => serde_json::to_string_pretty(&*entries),
            Err(e) => {
                tracing::error!("storage lock poisoned: {e}");
                return;
            }
        };
        match serialized {
            Ok(data) => {
                if let Err(e) = fs::write(&self.path, data) {
                    tracing::error!(path = %self.path.display(), "failed to write storage file: {e}");
                }
            }
            Err(e) => tracing::error!("failed to serialize storage entries: {e}"),
        }
    }
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Err(e) => {
                tracing::error!("storage lock poisoned: {e}");
                return;
            }
        }
        self.write_through();
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                tracing::error!("storage lock poisoned: {e}");
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(key);
            }
            Err(e) => {
                tracing::error!("storage lock poisoned: {e}");
                return;
            }
        }
        self.write_through();
    }
}
