use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub label: String,
    pub timestamp: String,
}

/// Where the score list lives between runs.
pub trait ScoreStorage {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreError>;
    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreError>;
}

/// Score list stored as YAML. A missing file reads as an empty list.
pub struct YamlFileStorage {
    path: PathBuf,
}

impl YamlFileStorage {
    pub fn new(path: PathBuf) -> Self {
        YamlFileStorage { path }
    }
}

impl ScoreStorage for YamlFileStorage {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        serde_yaml_ng::from_str(&content).map_err(ScoreError::Deserialize)
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreError> {
        let content = serde_yaml_ng::to_string(entries).map_err(ScoreError::Serialize)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Keeps scores for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Vec<ScoreEntry>,
}

impl ScoreStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

/// Best results, highest first, at most [`MAX_ENTRIES`].
///
/// Loaded once on construction and written back after every `record`.
/// Storage failures are logged and kept as a warning; the in-memory list
/// stays authoritative.
pub struct ScoreStore {
    storage: Box<dyn ScoreStorage>,
    entries: Vec<ScoreEntry>,
    warning: Option<String>,
}

impl ScoreStore {
    pub fn new(storage: Box<dyn ScoreStorage>) -> Self {
        let (entries, warning) = match storage.load() {
            Ok(entries) => (entries, None),
            Err(e) => {
                log::warn!("Could not load scores: {}", e);
                (vec![], Some(e.to_string()))
            }
        };

        let mut store = ScoreStore { storage, entries, warning };
        store.normalize();
        store
    }

    pub fn record(&mut self, score: u32, label: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.entries.push(ScoreEntry { score, label: label.to_string(), timestamp });
        self.normalize();

        self.warning = match self.storage.save(&self.entries) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Could not save scores: {}", e);
                Some(e.to_string())
            }
        };
    }

    pub fn is_new_high(&self, score: u32) -> bool {
        self.entries.first().map_or(true, |best| score > best.score)
    }

    pub fn top_n(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Last storage failure, cleared by the next successful save.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    fn normalize(&mut self) {
        // Stable sort keeps the older entry first on ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}
