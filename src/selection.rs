// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Which podcast is open, and how deep.
//!
//! A [`Selection`] moves between three states. Choosing a podcast from the
//! list opens its summary, "view more" opens the full detail, and closing
//! either returns to the list and resets the route. A [`Route`] carrying a
//! podcast id opens the full detail directly once the catalog contains that
//! id; until then it stays pending and is re-checked by [`Selection::resolve`].

use std::fmt;
use std::str::FromStr;

use crate::catalog::PodcastSummary;
use crate::error::RouteError;

const PODCAST_ROUTE_PREFIX: &str = "/podcast/";

/// The shareable location of the directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// The podcast list
    #[default]
    Home,
    /// Full detail of one podcast
    Podcast(String),
}

impl Route {
    pub fn podcast_id(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Podcast(id) => Some(id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Podcast(id) => write!(f, "{PODCAST_ROUTE_PREFIX}{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        if path.is_empty() || path == "/" {
            return Ok(Route::Home);
        }

        match path.strip_prefix(PODCAST_ROUTE_PREFIX) {
            Some(rest) => {
                let id = rest.strip_suffix('/').unwrap_or(rest);
                if id.is_empty() || id.contains('/') {
                    Err(RouteError::Invalid(s.to_string()))
                } else {
                    Ok(Route::Podcast(id.to_string()))
                }
            }
            None => Err(RouteError::Invalid(s.to_string())),
        }
    }
}

/// Selection depth for the open podcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected
    #[default]
    Closed,
    /// Summary modal open for a podcast
    SummarySelected(String),
    /// Full detail overlay open for a podcast
    FullOpen(String),
}

/// Selection state machine synchronized with the route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
    route: Route,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Id of the selected podcast at either depth
    pub fn selected_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Closed => None,
            SelectionState::SummarySelected(id) | SelectionState::FullOpen(id) => Some(id),
        }
    }

    pub fn is_full_open(&self) -> bool {
        matches!(self.state, SelectionState::FullOpen(_))
    }

    /// Open the summary of a podcast chosen from the list
    ///
    /// Replaces an open summary. Ignored while the full detail is open.
    pub fn select(&mut self, podcast_id: &str) -> bool {
        match self.state {
            SelectionState::FullOpen(_) => false,
            _ => {
                self.state = SelectionState::SummarySelected(podcast_id.to_string());
                true
            }
        }
    }

    /// Move from the summary to the full detail
    ///
    /// The route follows so the detail can be shared.
    pub fn view_more(&mut self) -> bool {
        match &self.state {
            SelectionState::SummarySelected(id) => {
                let id = id.clone();
                self.route = Route::Podcast(id.clone());
                self.state = SelectionState::FullOpen(id);
                true
            }
            _ => false,
        }
    }

    /// Close the summary modal and return to the list
    pub fn close_summary(&mut self) -> bool {
        match self.state {
            SelectionState::SummarySelected(_) => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Close the full detail overlay and return to the list
    pub fn close_full(&mut self) -> bool {
        match self.state {
            SelectionState::FullOpen(_) => {
                self.close();
                true
            }
            _ => false,
        }
    }

    fn close(&mut self) {
        self.state = SelectionState::Closed;
        self.route = Route::Home;
    }

    /// Record a route change; call [`Selection::resolve`] afterwards
    pub fn navigate(&mut self, route: Route) {
        self.route = route;
    }

    /// Open the podcast named by the route if the catalog has it
    ///
    /// Returns whether the state changed. A missing catalog or unknown id
    /// leaves everything as is so a later call can succeed.
    pub fn resolve(&mut self, catalog: Option<&[PodcastSummary]>) -> bool {
        let Some(id) = self.route.podcast_id() else {
            return false;
        };
        let Some(catalog) = catalog else {
            return false;
        };
        if !catalog.iter().any(|p| p.id == id) {
            return false;
        }
        if matches!(&self.state, SelectionState::FullOpen(open) if open == id) {
            return false;
        }

        self.state = SelectionState::FullOpen(id.to_string());
        true
    }
}
