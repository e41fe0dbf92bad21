use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::genre::Genre;

/// Shown for episodes the API sends without a description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Shown for podcasts without any genre
pub const NO_GENRES: &str = "No genres available";

/// A podcast from the catalog, enriched for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastSummary {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    /// Resolved genres, one per raw genre id
    pub genres: Vec<Genre>,
    /// Parsed update timestamp, used for date ordering
    pub updated_at: DateTime<FixedOffset>,
    /// Human-formatted update date
    pub updated: String,
    /// Number of seasons
    pub seasons: u32,
}

impl PodcastSummary {
    /// Whether any resolved genre carries the given id
    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genres.iter().any(|genre| genre.id == genre_id)
    }

    /// Comma-separated genre titles
    pub fn genre_list(&self) -> String {
        if self.genres.is_empty() {
            return NO_GENRES.to_string();
        }

        self.genres
            .iter()
            .map(|genre| genre.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Season count label such as "1 season" or "3 seasons"
    pub fn seasons_label(&self) -> String {
        match self.seasons {
            0 => "No seasons available".to_string(),
            1 => "1 season".to_string(),
            n => format!("{n} seasons"),
        }
    }
}

/// A season of a podcast with its episodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonDetail {
    pub number: u32,
    pub title: String,
    pub image: String,
    pub episodes: Vec<Episode>,
}

impl SeasonDetail {
    /// Episode count label such as "1 episode" or "12 episodes"
    pub fn episodes_label(&self) -> String {
        match self.episodes.len() {
            1 => "1 episode".to_string(),
            n => format!("{n} episodes"),
        }
    }
}

/// A single episode of a season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub number: u32,
    pub title: String,
    pub description: Option<String>,
    /// Audio file URL
    pub file: String,
}

impl Episode {
    /// The description, or a placeholder when the API sent none
    pub fn description_or_placeholder(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::genre::resolve_genres;

    fn make_podcast(genres: &[u32], seasons: u32) -> PodcastSummary {
        PodcastSummary {
            id: "1".to_string(),
            title: "Test".to_string(),
            image: String::new(),
            description: String::new(),
            genres: resolve_genres(genres),
            updated_at: DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z").unwrap(),
            updated: "January 1, 2023".to_string(),
            seasons,
        }
    }

    #[test]
    fn seasons_label_pluralizes() {
        assert_eq!(make_podcast(&[], 0).seasons_label(), "No seasons available");
        assert_eq!(make_podcast(&[], 1).seasons_label(), "1 season");
        assert_eq!(make_podcast(&[], 4).seasons_label(), "4 seasons");
    }

    #[test]
    fn genre_list_joins_titles() {
        assert_eq!(make_podcast(&[3, 4], 1).genre_list(), "History, Comedy");
        assert_eq!(make_podcast(&[], 1).genre_list(), NO_GENRES);
    }

    #[test]
    fn has_genre_checks_resolved_ids() {
        let podcast = make_podcast(&[2, 77], 1);
        assert!(podcast.has_genre(2));
        assert!(podcast.has_genre(77));
        assert!(!podcast.has_genre(1));
    }

    #[test]
    fn episode_description_falls_back() {
        let mut episode = Episode {
            number: 1,
            title: "Pilot".to_string(),
            description: None,
            file: "https://example.com/1.mp3".to_string(),
        };
        assert_eq!(episode.description_or_placeholder(), NO_DESCRIPTION);

        episode.description = Some("  ".to_string());
        assert_eq!(episode.description_or_placeholder(), NO_DESCRIPTION);

        episode.description = Some("Intro".to_string());
        assert_eq!(episode.description_or_placeholder(), "Intro");
    }

    #[test]
    fn episodes_label_pluralizes() {
        let season = SeasonDetail {
            number: 1,
            title: "Season 1".to_string(),
            image: String::new(),
            episodes: vec![],
        };
        assert_eq!(season.episodes_label(), "0 episodes");
    }
}
