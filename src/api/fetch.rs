// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::http::HttpClient;

use super::types::{RawPodcast, RawPodcastDetail};

/// Base URL of the public podcast API
pub const DEFAULT_API_BASE: &str = "https://podcast-api.netlify.app";

/// URL of the catalog endpoint for an API base
///
/// The base path is treated as a directory, so `https://host/api` and
/// `https://host/api/` both yield `https://host/api/`.
pub fn catalog_url(base: &Url) -> Url {
    let mut url = base.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// URL of the detail endpoint for one podcast
pub fn detail_url(base: &Url, podcast_id: &str) -> Result<Url, ApiError> {
    let mut url = catalog_url(base);
    url.path_segments_mut()
        .map_err(|_| ApiError::NotABaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .push("id")
        .push(podcast_id);
    Ok(url)
}

/// Fetch a URL and decode its body as JSON
async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &Url,
) -> Result<T, ApiError> {
    debug!(%url, "requesting");

    let bytes = client
        .get_bytes(url.as_str())
        .await
        .map_err(|e| ApiError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    debug!(%url, bytes = bytes.len(), "response received");

    serde_json::from_slice(&bytes).map_err(|e| ApiError::DecodeFailed {
        url: url.to_string(),
        source: e,
    })
}

/// Fetch the full podcast catalog
pub async fn fetch_catalog<C: HttpClient>(
    client: &C,
    base: &Url,
) -> Result<Vec<RawPodcast>, ApiError> {
    fetch_json(client, &catalog_url(base)).await
}

/// Fetch season and episode detail for one podcast
pub async fn fetch_detail<C: HttpClient>(
    client: &C,
    base: &Url,
    podcast_id: &str,
) -> Result<RawPodcastDetail, ApiError> {
    let url = detail_url(base, podcast_id)?;
    fetch_json(client, &url).await
}
