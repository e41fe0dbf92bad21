// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use crate::catalog::SeasonDetail;
use crate::error::DetailError;

/// Shown when seasons cannot be loaded
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load seasons data. Please try again later.";

/// Identifies one detail load
///
/// Only the most recently started request may commit its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    token: u64,
    podcast_id: String,
}

impl DetailRequest {
    pub fn podcast_id(&self) -> &str {
        &self.podcast_id
    }
}

/// What happened to a completed detail load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The result was stored
    Applied,
    /// A newer request or a closed overlay superseded this one
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<SeasonDetail>),
    Failed(String),
}

/// Season and episode detail for the podcast in the full overlay
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    podcast_id: Option<String>,
    status: DetailStatus,
    expanded: Option<u32>,
    last_token: u64,
    pending: Option<u64>,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Podcast the detail belongs to
    pub fn podcast_id(&self) -> Option<&str> {
        self.podcast_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == DetailStatus::Loading
    }

    /// User-facing error message of the last load
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            DetailStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Loaded seasons, empty while loading or after a failure
    pub fn seasons(&self) -> &[SeasonDetail] {
        match &self.status {
            DetailStatus::Loaded(seasons) => seasons,
            _ => &[],
        }
    }

    /// Start loading detail for a podcast, superseding any pending load
    pub fn begin(&mut self, podcast_id: &str) -> DetailRequest {
        if self.podcast_id.as_deref() != Some(podcast_id) {
            self.expanded = None;
            self.podcast_id = Some(podcast_id.to_string());
        }

        self.last_token += 1;
        self.pending = Some(self.last_token);
        self.status = DetailStatus::Loading;

        DetailRequest {
            token: self.last_token,
            podcast_id: podcast_id.to_string(),
        }
    }

    /// Commit the result of a load if it is still the current one
    pub fn complete(
        &mut self,
        request: &DetailRequest,
        result: Result<Vec<SeasonDetail>, DetailError>,
    ) -> DetailOutcome {
        let current = self.pending == Some(request.token)
            && self.podcast_id.as_deref() == Some(request.podcast_id.as_str());
        if !current {
            debug!(podcast_id = %request.podcast_id, "discarding stale detail result");
            return DetailOutcome::Stale;
        }

        self.pending = None;
        self.status = match result {
            Ok(seasons) => {
                if self
                    .expanded
                    .is_some_and(|n| !seasons.iter().any(|s| s.number == n))
                {
                    self.expanded = None;
                }
                DetailStatus::Loaded(seasons)
            }
            Err(_) => DetailStatus::Failed(DETAIL_ERROR_MESSAGE.to_string()),
        };
        DetailOutcome::Applied
    }

    /// Forget the current podcast; pending loads become stale
    pub fn clear(&mut self) {
        self.podcast_id = None;
        self.status = DetailStatus::Idle;
        self.expanded = None;
        self.pending = None;
    }

    /// Expand a season, or collapse it when it is already expanded
    ///
    /// Returns whether the season is expanded afterwards. Unknown seasons
    /// are ignored.
    pub fn toggle_season(&mut self, number: u32) -> bool {
        if !self.seasons().iter().any(|s| s.number == number) {
            return false;
        }

        if self.expanded == Some(number) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(number);
            true
        }
    }

    /// Number of the expanded season
    pub fn expanded(&self) -> Option<u32> {
        self.expanded
    }

    pub fn expanded_season(&self) -> Option<&SeasonDetail> {
        let number = self.expanded?;
        self.seasons().iter().find(|s| s.number == number)
    }
}
