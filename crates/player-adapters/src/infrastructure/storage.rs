//! File-backed session storage
//!
//! Keeps the player's key/value pairs (credential, cached character) in one
//! JSON object on disk. Default location:
//! - Linux: ~/.config/errant/player/session.json
//! - macOS: ~/Library/Application Support/io.errant.player/session.json
//! - Windows: C:\Users\<User>\AppData\Roaming\errant\player\config\session.json

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;
use errant_player_ports::outbound::StorageProvider;

/// `StorageProvider` persisting to a JSON file, with an in-memory copy for reads
pub struct FileStorageProvider {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorageProvider {
    /// Open the store at `path`, starting empty if the file is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {:?}: {}", path, e);
                HashMap::new()
            }
        };
        tracing::debug!("Session storage at {:?} ({} entries)", path, entries.len());

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Platform config directory, or the working directory if there is none
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("io", "errant", "player")
            .map(|dirs| dirs.config_dir().join("session.json"))
            .unwrap_or_else(|| PathBuf::from("errant_session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a change and persist it. The file is written under the write
    /// lock so disk order matches memory order.
    fn update(&self, apply: impl FnOnce(&mut HashMap<String, String>)) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut entries);
        if let Err(e) = write_entries(&self.path, &entries) {
            tracing::error!("Failed to persist session file {:?}: {}", self.path, e);
        }
    }
}

fn read_entries(path: &Path) -> io::Result<HashMap<String, String>> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write through a sibling temp file so a crash never leaves half a file.
fn write_entries(path: &Path, entries: &HashMap<String, String>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(entries)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}
