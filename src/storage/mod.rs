// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extractors::dedupe_entries;
use crate::register::models::{Entry, ExtractionResult};
use crate::utils::error::StorageError;

/// On-disk form of one register date's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSnapshot {
    pub date: String,
    pub count: usize,
    pub entries: Vec<Entry>,
    pub extracted_at: String,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn snapshot_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir.join(format!("register_{}.json", date.format("%Y-%m-%d")))
    }

    pub fn load_snapshot(&self, date: NaiveDate) -> Result<Option<RegisterSnapshot>, StorageError> {
        let path = self.snapshot_path(date);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&raw)
            .map_err(|e| StorageError::SerializationError(format!("{}: {}", path.display(), e)))?;
        Ok(Some(snapshot))
    }

    /// Saves `result` as the snapshot for `date`.
    ///
    /// If a snapshot for that date already exists its entries are kept first
    /// and the new ones appended, then the whole list is deduplicated, so a
    /// re-published register never repeats a record.
    pub fn save_result(&self, date: NaiveDate, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let mut entries = match self.load_snapshot(date)? {
            Some(previous) => {
                tracing::info!("Merging with {} previously stored entries for {}", previous.entries.len(), date);
                previous.entries
            }
            None => Vec::new(),
        };
        entries.extend(result.entries.iter().cloned());
        let entries = dedupe_entries(entries);

        let snapshot = RegisterSnapshot {
            date: result.source_date.clone(),
            count: entries.len(),
            entries,
            extracted_at: chrono::Utc::now().to_rfc3339(),
        };

        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let file_path = self.snapshot_path(date);
        fs::write(&file_path, body)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved {} entries to {}", snapshot.count, file_path.display());

        Ok(file_path)
    }
}
