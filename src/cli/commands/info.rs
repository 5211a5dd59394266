//! Info command handler

use crate::catalog::Catalog;
use crate::config::Config;
use crate::store::JsonFileStore;
use std::sync::Arc;

pub fn cmd_info(config: &Config, id: &str) -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::new(&config.general.catalog_path));
    let catalog = Catalog::open(store)?;

    let Some(movie) = catalog.find(id) else {
        println!("No movie with ID {id} in the catalog.");
        return Ok(());
    };

    println!("Movie Info");
    println!("{:-<60}", "");
    println!("Title:    {}", movie.title);
    println!("Genre:    {}", movie.genre);
    println!("Year:     {}", movie.year);
    println!("Rating:   {:.1}/10", movie.rating);
    if let Some(duration) = &movie.duration {
        println!("Duration: {duration}");
    }
    println!("ID:       {}", movie.id);

    if !movie.description.is_empty() {
        println!();
        println!("{}", movie.description);
    }

    println!();
    if let Some(link) = &movie.telegram_link {
        println!("Telegram: {link}");
    }
    if let Some(deep_link) = movie.deep_link() {
        println!("In-app:   {deep_link}");
    }
    if let Some(trailer) = &movie.trailer_url {
        println!("Trailer:  {trailer}");
    }

    Ok(())
}
