mod fetch;
mod types;

pub use fetch::{DEFAULT_API_BASE, catalog_url, detail_url, fetch_catalog, fetch_detail};
pub use types::{RawEpisode, RawPodcast, RawPodcastDetail, RawSeason};
