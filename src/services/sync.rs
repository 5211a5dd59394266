//! End-to-end import pipeline: normalize, enrich, assemble.
//!
//! The service is store-agnostic on purpose; merging the outcome into
//! a catalog is the caller's move.

use crate::models::Movie;
use crate::parser::{self, ParsedImport};
use crate::services::assembler;
use crate::services::enrichment::{EnrichmentError, EnrichmentService};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No usable text found in the input")]
    EmptyInput,

    #[error("The enrichment model did not recognize any movies")]
    NoMoviesRecognized,

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
}

/// What one sync run produced, before any catalog merge.
#[derive(Debug)]
pub struct SyncOutcome {
    pub movies: Vec<Movie>,

    /// Records the model returned, before validation.
    pub identified: usize,

    /// Movies that resolved to a Telegram permalink.
    pub linked: usize,
}

pub struct SyncService {
    enrichment: Arc<dyn EnrichmentService>,
}

impl SyncService {
    #[must_use]
    pub fn new(enrichment: Arc<dyn EnrichmentService>) -> Self {
        Self { enrichment }
    }

    pub async fn run(
        &self,
        raw: &str,
        channel_handle: Option<&str>,
    ) -> Result<SyncOutcome, SyncError> {
        if raw.trim().is_empty() {
            return Err(SyncError::EmptyInput);
        }

        let ParsedImport { text, links } = parser::parse_import(raw, channel_handle);

        if text.trim().is_empty() {
            return Err(SyncError::EmptyInput);
        }

        info!(
            "Normalized input to {} chars, {} linkable messages",
            text.chars().count(),
            links.len()
        );

        let records = self.enrichment.identify_movies(&text).await?;
        let identified = records.len();

        if records.is_empty() {
            return Err(SyncError::NoMoviesRecognized);
        }

        let movies = assembler::assemble(records, &links);

        if movies.is_empty() {
            return Err(SyncError::NoMoviesRecognized);
        }

        let linked = movies
            .iter()
            .filter(|movie| movie.telegram_link.is_some())
            .count();

        info!(
            "Identified {identified} records, assembled {} movies ({linked} linked)",
            movies.len()
        );

        Ok(SyncOutcome {
            movies,
            identified,
            linked,
        })
    }
}
