//! File-backed card persistence
//!
//! Layout: one JSON array per category under the base directory, named by
//! the normalized category string:
//!
//! ```text
//! <base>/
//! ├── German.json
//! ├── Basic_words.json
//! └── ...
//! ```
//!
//! Reads are forgiving: a missing or unparsable partition yields an empty
//! list (logged, never fatal), so a corrupt file degrades to "no cards"
//! instead of blocking startup. Writes report their failures.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::flashcards::Card;

use super::CardStorage;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Format a category name for use as a partition filename.
///
/// Trims, replaces spaces with underscores, and capitalizes the first
/// letter; an empty category maps to "Default".
pub fn format_category_filename(category: &str) -> String {
    let formatted = category.trim().replace(' ', "_");
    let mut chars = formatted.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Default".to_string(),
    }
}

pub struct FileCardStorage {
    base_path: PathBuf,
}

impl FileCardStorage {
    /// Open storage at `base_path`, creating the directory if needed
    pub fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn partition_path(&self, category: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.json", format_category_filename(category)))
    }
}

impl CardStorage for FileCardStorage {
    fn load_partition(&self, category: &str) -> Vec<Card> {
        let path = self.partition_path(category);
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Failed to read {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(cards) => cards,
            Err(err) => {
                log::warn!("Unparsable partition {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    fn save_partition(&self, category: &str, cards: &[Card]) -> Result<()> {
        let path = self.partition_path(category);
        fs::write(&path, serde_json::to_string_pretty(cards)?)?;
        log::debug!("Wrote {} cards to {}", cards.len(), path.display());
        Ok(())
    }

    fn list_partitions(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Failed to list {}: {}", self.base_path.display(), err);
                return Vec::new();
            }
        };

        let mut partitions = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    partitions.push(stem.to_string());
                }
            }
        }

        partitions.sort();
        partitions
    }
}
