//! Search command handler

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::store::JsonFileStore;
use std::sync::Arc;

pub fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::new(&config.general.catalog_path));
    let catalog = Catalog::open(store)?;

    let hits = catalog::filter(catalog.movies(), query);

    if hits.is_empty() {
        println!("No movies matching \"{query}\".");
        return Ok(());
    }

    println!("Movies matching \"{query}\" ({} found)", hits.len());
    println!("{:-<70}", "");

    for movie in hits {
        println!(
            "  {} ({}) [{:.1}] - {}",
            movie.title, movie.year, movie.rating, movie.genre
        );
        println!("    ID: {}", movie.id);
    }

    Ok(())
}
