use crate::models::Movie;
use std::collections::HashSet;

/// Title of the synthetic row that carries the whole catalog.
pub const ALL_GROUP_TITLE: &str = "Novidades no YoriDPA";

/// One shelf of the catalog: the all-movies row or a single genre.
#[derive(Debug)]
pub struct Category<'a> {
    pub id: String,
    pub title: String,
    pub movies: Vec<&'a Movie>,
}

/// Case-insensitive substring match on title or genre.
#[must_use]
pub fn filter<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    let query = query.to_lowercase();

    movies
        .iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&query)
                || movie.genre.to_lowercase().contains(&query)
        })
        .collect()
}

/// Group the catalog into rows: the all-movies row first, then one row
/// per genre in order of first appearance. An empty catalog has no
/// rows at all.
#[must_use]
pub fn categories(movies: &[Movie]) -> Vec<Category<'_>> {
    if movies.is_empty() {
        return Vec::new();
    }

    let mut rows = vec![Category {
        id: "all".to_string(),
        title: ALL_GROUP_TITLE.to_string(),
        movies: movies.iter().collect(),
    }];

    let mut seen = HashSet::new();

    for movie in movies {
        if seen.insert(movie.genre.as_str()) {
            rows.push(Category {
                id: movie.genre.clone(),
                title: movie.genre.clone(),
                movies: movies.iter().filter(|m| m.genre == movie.genre).collect(),
            });
        }
    }

    rows
}
