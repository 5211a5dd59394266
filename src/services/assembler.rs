//! Builds catalog-ready [`Movie`] records out of enrichment output.
//!
//! This is the validation boundary: records missing the fields that
//! identity depends on are dropped here, and every derived URL is
//! computed here so the rest of the pipeline only sees finished movies.

use crate::models::{EnrichedMovie, Movie, ReferenceMap};
use tracing::warn;

#[must_use]
pub fn assemble(records: Vec<EnrichedMovie>, links: &ReferenceMap) -> Vec<Movie> {
    records
        .into_iter()
        .filter_map(|record| build_movie(record, links))
        .collect()
}

fn build_movie(record: EnrichedMovie, links: &ReferenceMap) -> Option<Movie> {
    let ref_id = record.ref_id.trim();
    let title = record.title.trim();

    if ref_id.is_empty() || title.is_empty() {
        warn!("Dropping enrichment record without a ref ID or title: {record:?}");
        return None;
    }

    let trailer_url = trailer_url(title, record.trailer_url.as_deref());

    Some(Movie {
        id: ref_id.to_string(),
        title: title.to_string(),
        description: record.description,
        genre: record.genre,
        rating: record.rating.clamp(0.0, 10.0),
        year: record.year,
        duration: non_blank(record.duration),
        thumbnail: thumbnail_url(title),
        backdrop: backdrop_url(title),
        trailer_url: Some(trailer_url),
        telegram_link: links.get(ref_id).cloned(),
    })
}

fn thumbnail_url(title: &str) -> String {
    format!(
        "https://images.weserv.nl/?url=https://source.unsplash.com/featured/?movie,poster,{}&w=400&h=600",
        urlencoding::encode(title)
    )
}

fn backdrop_url(title: &str) -> String {
    format!(
        "https://images.weserv.nl/?url=https://source.unsplash.com/featured/?cinema,scenery,{}&w=1280&h=720",
        urlencoding::encode(title)
    )
}

/// A hint that already points at YouTube is kept verbatim. Anything
/// else (usually a bare video ID, possibly nothing) becomes an embed
/// URL that falls back to a YouTube search for the official trailer.
fn trailer_url(title: &str, hint: Option<&str>) -> String {
    let hint = hint.unwrap_or_default().trim();

    if hint.contains("youtube.com") {
        return hint.to_string();
    }

    format!(
        "https://www.youtube.com/embed/{hint}?listType=search&list={}",
        urlencoding::encode(&format!("{title} trailer oficial português"))
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ref_id: &str, title: &str) -> EnrichedMovie {
        EnrichedMovie {
            ref_id: ref_id.to_string(),
            title: title.to_string(),
            description: "Uma sinopse envolvente.".to_string(),
            genre: "Drama".to_string(),
            rating: 7.5,
            year: 2001,
            duration: Some("2h10".to_string()),
            trailer_url: None,
        }
    }

    #[test]
    fn test_assemble_builds_links_and_artwork() {
        let mut links = ReferenceMap::new();
        links.insert("ID_42".to_string(), "https://t.me/movies/42".to_string());

        let movies = assemble(vec![record("ID_42", "Matrix")], &links);

        assert_eq!(movies.len(), 1);
        let movie = &movies[0];
        assert_eq!(movie.id, "ID_42");
        assert_eq!(
            movie.telegram_link.as_deref(),
            Some("https://t.me/movies/42")
        );
        assert_eq!(
            movie.thumbnail,
            "https://images.weserv.nl/?url=https://source.unsplash.com/featured/?movie,poster,Matrix&w=400&h=600"
        );
        assert_eq!(
            movie.backdrop,
            "https://images.weserv.nl/?url=https://source.unsplash.com/featured/?cinema,scenery,Matrix&w=1280&h=720"
        );
    }

    #[test]
    fn test_unmatched_ref_has_no_telegram_link() {
        let movies = assemble(vec![record("ID_7", "Matrix")], &ReferenceMap::new());
        assert_eq!(movies[0].telegram_link, None);
    }

    #[test]
    fn test_trailer_hint_with_youtube_url_is_kept() {
        let mut rec = record("ID_1", "Matrix");
        rec.trailer_url = Some("https://www.youtube.com/watch?v=vKQi3bBA1y8".to_string());

        let movies = assemble(vec![rec], &ReferenceMap::new());

        assert_eq!(
            movies[0].trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=vKQi3bBA1y8")
        );
    }

    #[test]
    fn test_trailer_hint_with_video_id_becomes_embed() {
        let mut rec = record("ID_7", "Matrix");
        rec.trailer_url = Some("abc123".to_string());

        let movies = assemble(vec![rec], &ReferenceMap::new());

        assert_eq!(
            movies[0].trailer_url.as_deref(),
            Some(
                "https://www.youtube.com/embed/abc123?listType=search&list=Matrix%20trailer%20oficial%20portugu%C3%AAs"
            )
        );
    }

    #[test]
    fn test_trailer_without_hint_becomes_search_embed() {
        let movies = assemble(vec![record("ID_7", "Matrix")], &ReferenceMap::new());

        assert_eq!(
            movies[0].trailer_url.as_deref(),
            Some(
                "https://www.youtube.com/embed/?listType=search&list=Matrix%20trailer%20oficial%20portugu%C3%AAs"
            )
        );
    }

    #[test]
    fn test_records_without_title_or_ref_id_are_dropped() {
        let movies = assemble(
            vec![
                record("ID_1", "   "),
                record("", "Matrix"),
                record("ID_3", "Seven"),
            ],
            &ReferenceMap::new(),
        );

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Seven");
    }

    #[test]
    fn test_ref_id_and_title_are_trimmed() {
        let mut links = ReferenceMap::new();
        links.insert("ID_5".to_string(), "https://t.me/movies/5".to_string());

        let movies = assemble(vec![record(" ID_5 ", " Matrix ")], &links);

        assert_eq!(movies[0].id, "ID_5");
        assert_eq!(movies[0].title, "Matrix");
        assert_eq!(movies[0].telegram_link.as_deref(), Some("https://t.me/movies/5"));
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut high = record("ID_1", "Alta");
        high.rating = 11.2;
        let mut low = record("ID_2", "Baixa");
        low.rating = -3.0;

        let movies = assemble(vec![high, low], &ReferenceMap::new());

        assert!((movies[0].rating - 10.0).abs() < f32::EPSILON);
        assert!(movies[1].rating.abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_duration_becomes_none() {
        let mut rec = record("ID_1", "Matrix");
        rec.duration = Some("   ".to_string());

        let movies = assemble(vec![rec], &ReferenceMap::new());

        assert_eq!(movies[0].duration, None);
    }
}
