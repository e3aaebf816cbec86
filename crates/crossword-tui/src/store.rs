use crossword_core::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding where progress and logs are kept
pub const DATA_DIR_ENV: &str = "CROSSWORD_DATA_DIR";

const SAVE_FILE: &str = "progress.json";

/// Directory holding the save file and the log
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crossword-ladder")
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Key/value store persisted as a small JSON file, rewritten on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: SaveFile,
}

impl FileStore {
    /// Open the save file in `dir`. A missing or unreadable file starts empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SAVE_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                warn!(%err, path = %path.display(), "ignoring unreadable save file");
                SaveFile::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => SaveFile::default(),
            Err(err) => {
                warn!(%err, path = %path.display(), "could not read save file");
                SaveFile::default()
            }
        };
        debug!(path = %path.display(), keys = data.entries.len(), "opened save file");
        Self { path, data }
    }

    /// Forget everything, on disk too
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.data.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}
