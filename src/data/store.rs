use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::SchoolData;

pub const DEFAULT_DATA_PATH: &str = "db.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize school data: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Whole-document access to the school data. Callers fetch, change the
/// document in memory and replace it; there is no partial update and no
/// conflict detection.
pub trait DocumentStore {
    fn fetch(&self) -> Result<SchoolData, StoreError>;

    fn replace(&self, data: &SchoolData) -> Result<(), StoreError>;

    /// Fetch, apply `change`, replace. Returns whatever `change` returned.
    fn update<T>(&self, change: impl FnOnce(&mut SchoolData) -> T) -> Result<T, StoreError>
    where
        Self: Sized,
    {
        let mut data = self.fetch()?;
        let out = change(&mut data);
        self.replace(&data)?;
        Ok(out)
    }

    /// Clear all results and passed-test ticks.
    fn reset_stats(&self) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.update(SchoolData::reset_stats)
    }
}

/// The school document kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl DocumentStore for JsonFileStore {
    fn fetch(&self) -> Result<SchoolData, StoreError> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "data file missing, starting empty");
            let data = SchoolData::default();
            self.replace(&data)?;
            return Ok(data);
        }

        let json_content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let data: SchoolData =
            serde_json::from_str(&json_content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            tests = data.tests.len(),
            results = data.results.len(),
            "loaded school data"
        );
        Ok(data)
    }

    fn replace(&self, data: &SchoolData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data).map_err(StoreError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved school data");
        Ok(())
    }
}
