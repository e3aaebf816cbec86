//! Durable key/value storage for progress between runs

use crate::error::StoreError;
use crate::types::Difficulty;
use std::collections::HashMap;
use tracing::warn;

/// Key holding the last active difficulty (`Easy`, `Normal` or `Hard`)
pub const DIFFICULTY_KEY: &str = "difficulty";
/// Key holding the running score as a decimal integer
pub const SCORE_KEY: &str = "score";

/// Synchronous string store with last-writer-wins semantics
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and when nothing should persist
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `(key, value)` pairs
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saved difficulty; unreadable values are logged and ignored
pub fn read_difficulty(store: &dyn KeyValueStore) -> Option<Difficulty> {
    let raw = store.get(DIFFICULTY_KEY)?;
    match raw.parse() {
        Ok(difficulty) => Some(difficulty),
        Err(err) => {
            warn!(%err, "ignoring stored difficulty");
            None
        }
    }
}

/// Saved score; unreadable values are logged and ignored
pub fn read_score(store: &dyn KeyValueStore) -> Option<u32> {
    let raw = store.get(SCORE_KEY)?;
    match raw.trim().parse() {
        Ok(score) => Some(score),
        Err(err) => {
            warn!(%err, value = %raw, "ignoring stored score");
            None
        }
    }
}
