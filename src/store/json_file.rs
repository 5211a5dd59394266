use super::{CatalogStore, StoreError};
use crate::models::Movie;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Catalog snapshot kept on disk as one pretty-printed JSON array.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileStore {
    /// A missing snapshot is an empty catalog. Snapshots that cannot
    /// be read or decoded also load as empty, with a warning, so the
    /// next import rebuilds them.
    fn load(&self) -> Result<Vec<Movie>, StoreError> {
        if !self.path.exists() {
            debug!("No catalog snapshot at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) => {
                warn!(
                    "Could not read {}: {error}, starting with an empty catalog",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&content) {
            Ok(movies) => Ok(movies),
            Err(error) => {
                warn!(
                    "Corrupt catalog snapshot at {}: {error}, starting with an empty catalog",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(movies).map_err(|e| StoreError::Write(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|e| StoreError::Write(e.to_string()))
    }
}
