//! Catalog persistence port.
//!
//! The catalog only needs two operations from its backing store, so
//! the port stays small and synchronous. [`JsonFileStore`] is the
//! production adapter; [`MemoryStore`] backs tests and dry runs.

pub mod json_file;
pub use json_file::JsonFileStore;

use crate::models::Movie;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read the catalog: {0}")]
    Read(String),

    #[error("Failed to write the catalog: {0}")]
    Write(String),
}

pub trait CatalogStore: Send + Sync {
    fn load(&self) -> Result<Vec<Movie>, StoreError>;

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = self
            .movies
            .lock()
            .map_err(|e| StoreError::Read(e.to_string()))?;
        Ok(movies.clone())
    }

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError> {
        let mut stored = self
            .movies
            .lock()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        *stored = movies.to_vec();
        Ok(())
    }
}
