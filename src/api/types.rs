//! Wire types for the podcast API.
//!
//! These mirror the JSON returned by the catalog and detail endpoints.
//! Fields the directory does not use are ignored during deserialization.

use serde::Deserialize;

/// A single entry of the catalog endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawPodcast {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Genre ids, resolved against the genre table at ingestion
    pub genres: Vec<u32>,
    /// Last update timestamp as sent by the API
    pub updated: String,
    /// Number of seasons
    pub seasons: u32,
}

/// The detail endpoint response for one podcast
#[derive(Debug, Clone, Deserialize)]
pub struct RawPodcastDetail {
    pub seasons: Vec<RawSeason>,
}

/// A season inside a detail response
#[derive(Debug, Clone, Deserialize)]
pub struct RawSeason {
    /// Season number
    pub season: u32,
    pub title: String,
    pub image: String,
    pub episodes: Vec<RawEpisode>,
}

/// An episode inside a season
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    /// Episode number within the season
    pub episode: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Audio file URL
    pub file: String,
}
