mod ingest;
mod model;

pub use ingest::{
    format_date, ingest_catalog, ingest_detail, ingest_podcast, load_catalog, load_seasons,
    parse_updated,
};
pub use model::{Episode, NO_DESCRIPTION, NO_GENRES, PodcastSummary, SeasonDetail};
