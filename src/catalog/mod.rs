//! The movie catalog: merge semantics plus the persisted collection.

pub mod view;
pub use view::{categories, filter, Category, ALL_GROUP_TITLE};

use crate::models::Movie;
use crate::store::{CatalogStore, StoreError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Merge newly imported movies into an existing catalog.
///
/// Identity is the lowercased title. An incoming movie whose title is
/// already in the catalog, or appeared earlier in the same batch, is
/// dropped. Survivors go in front, newest first; existing entries keep
/// their order and their data.
#[must_use]
pub fn merge(existing: &[Movie], incoming: Vec<Movie>) -> Vec<Movie> {
    let mut titles: HashSet<String> = existing
        .iter()
        .map(|movie| movie.title.to_lowercase())
        .collect();

    let mut merged: Vec<Movie> = incoming
        .into_iter()
        .filter(|movie| titles.insert(movie.title.to_lowercase()))
        .collect();

    merged.extend(existing.iter().cloned());
    merged
}

#[derive(Debug, Clone, Copy)]
pub struct MergeStats {
    pub added: usize,
    pub duplicates: usize,
}

/// The persisted collection. Loaded once at open, saved after every
/// sync; the in-memory copy only changes once the save went through.
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn open(store: Arc<dyn CatalogStore>) -> Result<Self, StoreError> {
        let movies = store.load()?;
        Ok(Self { store, movies })
    }

    pub fn sync(&mut self, incoming: Vec<Movie>) -> Result<MergeStats, StoreError> {
        let incoming_count = incoming.len();
        let merged = merge(&self.movies, incoming);
        let added = merged.len() - self.movies.len();

        self.store.save(&merged)?;
        self.movies = merged;

        let duplicates = incoming_count - added;
        info!("Catalog sync: {added} added, {duplicates} duplicates skipped");

        Ok(MergeStats { added, duplicates })
    }

    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }
}
