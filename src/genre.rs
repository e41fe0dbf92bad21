use serde::Serialize;

/// Title given to genre ids that are missing from the lookup table
pub const UNKNOWN_GENRE_TITLE: &str = "Unknown";

/// A podcast genre with its display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: u32,
    pub title: String,
}

/// Genres known to the podcast API, in id order
pub const GENRES: &[(u32, &str)] = &[
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

/// Look up the display title of a genre id
pub fn genre_title(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, title)| *title)
}

/// Resolve a raw genre id, falling back to an "Unknown" placeholder
pub fn resolve_genre(id: u32) -> Genre {
    Genre {
        id,
        title: genre_title(id).unwrap_or(UNKNOWN_GENRE_TITLE).to_string(),
    }
}

/// Resolve a list of raw genre ids, preserving order and length
pub fn resolve_genres(ids: &[u32]) -> Vec<Genre> {
    ids.iter().copied().map(resolve_genre).collect()
}

/// All known genres, for populating a genre selector
pub fn all_genres() -> Vec<Genre> {
    GENRES.iter().map(|(id, _)| resolve_genre(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_genre() {
        let genre = resolve_genre(4);
        assert_eq!(genre.id, 4);
        assert_eq!(genre.title, "Comedy");
    }

    #[test]
    fn unknown_genre_yields_placeholder() {
        let genre = resolve_genre(42);
        assert_eq!(genre.id, 42);
        assert_eq!(genre.title, UNKNOWN_GENRE_TITLE);
    }

    #[test]
    fn resolve_genres_never_drops_ids() {
        let genres = resolve_genres(&[1, 99, 2]);

        assert_eq!(genres.len(), 3);
        assert_eq!(genres[0].title, "Personal Growth");
        assert_eq!(genres[1].title, "Unknown");
        assert_eq!(genres[2].title, "Investigative Journalism");
    }

    #[test]
    fn all_genres_lists_table_in_order() {
        let genres = all_genres();
        assert_eq!(genres.len(), GENRES.len());
        assert!(genres.windows(2).all(|w| w[0].id < w[1].id));
    }
}
