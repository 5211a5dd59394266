//! Import command handler

use crate::catalog::Catalog;
use crate::config::Config;
use crate::services::{EnrichmentError, GeminiEnrichment, SyncError, SyncService};
use crate::store::JsonFileStore;
use std::sync::Arc;

pub async fn cmd_import(
    config: &Config,
    file: Option<&str>,
    handle: Option<&str>,
) -> anyhow::Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read {path}: {e}"))?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    // An explicit --handle wins over the config, and an explicitly
    // blank one disables permalinks by handle entirely.
    let handle = match handle {
        Some(value) => {
            let value = value.replacen('@', "", 1);
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        None => config.telegram.normalized_handle(),
    };

    let enrichment = match GeminiEnrichment::from_config(config) {
        Ok(enrichment) => enrichment,
        Err(EnrichmentError::MissingApiKey) => {
            println!("No Gemini API key configured.");
            println!("Set gemini.api_key in config.toml or export GEMINI_API_KEY.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Importing... this can take a moment while the export is analyzed.");

    let sync = SyncService::new(Arc::new(enrichment));
    let outcome = match sync.run(&raw, handle.as_deref()).await {
        Ok(outcome) => outcome,
        Err(SyncError::EmptyInput) => {
            println!("Nothing to import: the input has no usable text.");
            return Ok(());
        }
        Err(SyncError::NoMoviesRecognized) => {
            println!("No movies were recognized in the input.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let store = Arc::new(JsonFileStore::new(&config.general.catalog_path));
    let mut catalog = Catalog::open(store)?;
    let stats = catalog.sync(outcome.movies)?;

    println!("✓ Import complete");
    println!("{:-<60}", "");
    println!("Identified: {} records", outcome.identified);
    println!("Linked:     {} with Telegram permalinks", outcome.linked);
    println!("Added:      {}", stats.added);
    println!("Duplicates: {}", stats.duplicates);
    println!("Catalog:    {} movies total", catalog.len());

    Ok(())
}
