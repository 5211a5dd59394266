//! List command handler

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::store::JsonFileStore;
use std::sync::Arc;

pub fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::new(&config.general.catalog_path));
    let catalog = Catalog::open(store)?;

    if catalog.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Import a chat export with: yoriflix import result.json");
        return Ok(());
    }

    println!("Catalog ({} movies)", catalog.len());

    for category in catalog::categories(catalog.movies()) {
        println!();
        println!("{} ({})", category.title, category.movies.len());
        println!("{:-<70}", "");

        for movie in category.movies {
            println!(
                "  • {} ({}) [{:.1}] {}",
                movie.title, movie.year, movie.rating, movie.id
            );
        }
    }

    Ok(())
}
