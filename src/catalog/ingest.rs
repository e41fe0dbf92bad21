// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::debug;
use url::Url;

use crate::api::{RawPodcast, RawPodcastDetail, fetch_catalog, fetch_detail};
use crate::error::{CatalogError, DetailError};
use crate::genre::resolve_genres;
use crate::http::HttpClient;

use super::model::{Episode, PodcastSummary, SeasonDetail};

/// Fetch the catalog and enrich every entry
///
/// The response is accepted or rejected as a whole: one entry with an
/// unparseable date fails the load.
pub async fn load_catalog<C: HttpClient>(
    client: &C,
    base: &Url,
) -> Result<Vec<PodcastSummary>, CatalogError> {
    let raw = fetch_catalog(client, base).await?;
    debug!(count = raw.len(), "catalog fetched");
    ingest_catalog(raw)
}

/// Fetch the seasons of one podcast
pub async fn load_seasons<C: HttpClient>(
    client: &C,
    base: &Url,
    podcast_id: &str,
) -> Result<Vec<SeasonDetail>, DetailError> {
    let raw = fetch_detail(client, base, podcast_id).await?;
    Ok(ingest_detail(raw))
}

/// Enrich raw catalog entries, keeping their order
pub fn ingest_catalog(raw: Vec<RawPodcast>) -> Result<Vec<PodcastSummary>, CatalogError> {
    raw.into_iter().map(ingest_podcast).collect()
}

/// Resolve genres and format the update date of one entry
pub fn ingest_podcast(raw: RawPodcast) -> Result<PodcastSummary, CatalogError> {
    let updated_at = parse_updated(&raw.updated)?;

    Ok(PodcastSummary {
        id: raw.id,
        title: raw.title,
        image: raw.image,
        description: html_escape::decode_html_entities(&raw.description).into_owned(),
        genres: resolve_genres(&raw.genres),
        updated: format_date(&updated_at),
        updated_at,
        seasons: raw.seasons,
    })
}

/// Convert a detail response into seasons, keeping API order
pub fn ingest_detail(raw: RawPodcastDetail) -> Vec<SeasonDetail> {
    raw.seasons
        .into_iter()
        .map(|season| SeasonDetail {
            number: season.season,
            title: season.title,
            image: season.image,
            episodes: season
                .episodes
                .into_iter()
                .map(|episode| Episode {
                    number: episode.episode,
                    title: episode.title,
                    description: episode
                        .description
                        .map(|d| html_escape::decode_html_entities(&d).into_owned()),
                    file: episode.file,
                })
                .collect(),
        })
        .collect()
}

/// Parse an API update timestamp
///
/// Accepts RFC 3339, zone-less date-times and bare dates. Values without an
/// offset are taken as UTC.
pub fn parse_updated(date_str: &str) -> Result<DateTime<FixedOffset>, CatalogError> {
    let trimmed = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().fixed_offset());
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CatalogError::InvalidDate {
                date_str: date_str.to_string(),
                reason: "date out of range".to_string(),
            })?
            .and_utc()
            .fixed_offset()),
        Err(e) => Err(CatalogError::InvalidDate {
            date_str: date_str.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Format a timestamp as a long date, e.g. "November 3, 2022"
pub fn format_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%B %-d, %Y").to_string()
}
