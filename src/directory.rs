// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Range;

use tracing::{debug, info, warn};
use url::Url;

use crate::api::{DEFAULT_API_BASE, catalog_url};
use crate::catalog::{PodcastSummary, SeasonDetail, load_catalog, load_seasons};
use crate::detail::{DetailOutcome, DetailRequest, DetailView};
use crate::error::{CatalogError, DetailError};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::selection::{Route, Selection, SelectionState};
use crate::view::{
    DEFAULT_PAGE_SIZE, FilteredView, ViewAction, ViewState, filter_and_sort, page_count,
    page_range, reduce,
};

/// Shown when the catalog cannot be loaded
pub const CATALOG_ERROR_MESSAGE: &str = "Failed to load podcasts. Please try again later.";

/// Options for the podcast directory
#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    /// Base URL of the podcast API
    pub api_base: Url,
    /// Podcasts per page
    pub page_size: usize,
    /// Jump back to page 1 whenever search, genre or sort change
    pub reset_page_on_filter: bool,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("valid default API URL"),
            page_size: DEFAULT_PAGE_SIZE,
            reset_page_on_filter: false,
        }
    }
}

/// Load state of the catalog
#[derive(Debug, Clone, Default)]
struct CatalogState {
    loading: bool,
    error: Option<String>,
    podcasts: Option<Vec<PodcastSummary>>,
}

/// The podcast directory: catalog, view inputs, derived lists, selection
/// and detail, kept consistent with each other.
///
/// Every mutation re-derives what depends on it. Filter inputs and the
/// catalog re-run the filter and sort, page inputs re-run the page window,
/// and catalog or route changes re-run the route resolution.
pub struct Directory<C: HttpClient> {
    client: C,
    options: DirectoryOptions,
    reporter: SharedProgressReporter,
    catalog: CatalogState,
    view: ViewState,
    filtered: FilteredView,
    displayed: Range<usize>,
    selection: Selection,
    detail: DetailView,
}

impl<C: HttpClient> Directory<C> {
    pub fn new(client: C, options: DirectoryOptions, reporter: SharedProgressReporter) -> Self {
        let view = ViewState::with_page_size(options.page_size);
        Self {
            client,
            options,
            reporter,
            catalog: CatalogState::default(),
            view,
            filtered: FilteredView::default(),
            displayed: 0..0,
            selection: Selection::new(),
            detail: DetailView::new(),
        }
    }

    /// Mark the catalog as loading and announce the fetch
    ///
    /// Returns the URL to fetch. Pair with [`Directory::complete_load`].
    pub fn begin_load(&mut self) -> Url {
        let url = catalog_url(&self.options.api_base);
        self.catalog.loading = true;
        self.reporter.report(ProgressEvent::FetchingCatalog {
            url: url.to_string(),
        });
        url
    }

    /// Store a catalog result, then re-derive the view and the route
    ///
    /// A failure keeps any previously loaded catalog. Returns whether the
    /// catalog is available afterwards.
    pub async fn complete_load(
        &mut self,
        result: Result<Vec<PodcastSummary>, CatalogError>,
    ) -> bool {
        match result {
            Ok(podcasts) => {
                info!(count = podcasts.len(), "catalog loaded");
                self.reporter.report(ProgressEvent::CatalogLoaded {
                    podcast_count: podcasts.len(),
                });
                self.catalog.podcasts = Some(podcasts);
                self.catalog.error = None;
            }
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                self.reporter.report(ProgressEvent::CatalogFailed {
                    error: e.to_string(),
                });
                self.catalog.error = Some(CATALOG_ERROR_MESSAGE.to_string());
            }
        }
        self.catalog.loading = false;

        self.refilter();
        self.sync_route().await;
        self.catalog.podcasts.is_some()
    }

    /// Fetch the catalog, replacing any previous one on success
    ///
    /// Returns whether the catalog is available afterwards.
    pub async fn load(&mut self) -> bool {
        self.begin_load();
        let result = load_catalog(&self.client, &self.options.api_base).await;
        self.complete_load(result).await
    }

    /// Repeat the catalog fetch after a failure
    pub async fn retry(&mut self) -> bool {
        self.load().await
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.loading
    }

    /// User-facing catalog error
    pub fn error(&self) -> Option<&str> {
        self.catalog.error.as_deref()
    }

    /// The full catalog, once loaded
    pub fn catalog(&self) -> Option<&[PodcastSummary]> {
        self.catalog.podcasts.as_deref()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Apply a control change and re-derive the affected lists
    pub fn dispatch(&mut self, action: ViewAction) {
        let changes_filter = action.changes_filter();
        self.view = reduce(&self.view, action);

        if changes_filter {
            if self.options.reset_page_on_filter {
                self.view.current_page = 1;
            }
            self.refilter();
        } else {
            self.repage();
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_and_sort(self.catalog().unwrap_or(&[]), &self.view);
        debug!(matches = self.filtered.len(), "filtered catalog");
        self.repage();
    }

    fn repage(&mut self) {
        self.displayed = page_range(
            self.filtered.len(),
            self.view.current_page,
            self.view.page_size,
        );
    }

    /// Podcasts matching the current search and genre, in sort order
    pub fn filtered_podcasts(&self) -> Vec<&PodcastSummary> {
        self.filtered.podcasts(self.catalog().unwrap_or(&[])).collect()
    }

    /// Podcasts on the current page
    pub fn displayed_podcasts(&self) -> Vec<&PodcastSummary> {
        let catalog = self.catalog().unwrap_or(&[]);
        self.filtered.indices[self.displayed.clone()]
            .iter()
            .filter_map(|&i| catalog.get(i))
            .collect()
    }

    /// Set when the catalog is loaded but nothing matches
    pub fn no_results_message(&self) -> Option<&'static str> {
        self.catalog
            .podcasts
            .as_ref()
            .and(self.filtered.no_results_message)
    }

    /// Number of pages for the filtered podcasts
    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.view.page_size)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn route(&self) -> &Route {
        self.selection.route()
    }

    /// The podcast open at either depth
    pub fn selected_podcast(&self) -> Option<&PodcastSummary> {
        let id = self.selection.selected_id()?;
        self.catalog()?.iter().find(|p| p.id == id)
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    /// Open the summary of a podcast from the catalog
    pub fn select(&mut self, podcast_id: &str) -> bool {
        let known = self
            .catalog()
            .is_some_and(|catalog| catalog.iter().any(|p| p.id == podcast_id));
        known && self.selection.select(podcast_id)
    }

    /// Move from the summary to the full detail and load its seasons
    pub async fn view_more(&mut self) -> bool {
        if !self.selection.view_more() {
            return false;
        }
        self.load_detail().await;
        true
    }

    pub fn close_summary(&mut self) -> bool {
        self.selection.close_summary()
    }

    pub fn close_full(&mut self) -> bool {
        let closed = self.selection.close_full();
        if closed {
            self.detail.clear();
        }
        closed
    }

    /// Follow a route, opening the podcast it names when possible
    pub async fn navigate(&mut self, route: Route) {
        self.selection.navigate(route);
        self.sync_route().await;
    }

    async fn sync_route(&mut self) {
        let catalog = self.catalog.podcasts.as_deref();
        if self.selection.resolve(catalog) {
            debug!(route = %self.selection.route(), "route opened podcast");
            self.load_detail().await;
        }
    }

    /// Start a detail load for the podcast in the full overlay
    pub fn begin_detail(&mut self) -> Option<DetailRequest> {
        let SelectionState::FullOpen(id) = self.selection.state() else {
            return None;
        };
        let request = self.detail.begin(id);
        self.reporter.report(ProgressEvent::FetchingDetail {
            podcast_id: request.podcast_id().to_string(),
        });
        Some(request)
    }

    /// Commit a detail result if it still belongs to the open podcast
    pub fn complete_detail(
        &mut self,
        request: &DetailRequest,
        result: Result<Vec<SeasonDetail>, DetailError>,
    ) -> DetailOutcome {
        let podcast_id = request.podcast_id().to_string();

        let still_open = matches!(
            self.selection.state(),
            SelectionState::FullOpen(id) if *id == podcast_id
        );
        if !still_open {
            self.reporter
                .report(ProgressEvent::DetailDiscarded { podcast_id });
            return DetailOutcome::Stale;
        }

        let failure = result.as_ref().err().map(|e| e.to_string());
        let season_count = result.as_ref().map_or(0, Vec::len);

        let outcome = self.detail.complete(request, result);
        match (outcome, failure) {
            (DetailOutcome::Stale, _) => {
                self.reporter
                    .report(ProgressEvent::DetailDiscarded { podcast_id });
            }
            (DetailOutcome::Applied, Some(error)) => {
                warn!(%podcast_id, %error, "detail load failed");
                self.reporter
                    .report(ProgressEvent::DetailFailed { podcast_id, error });
            }
            (DetailOutcome::Applied, None) => {
                self.reporter.report(ProgressEvent::DetailLoaded {
                    podcast_id,
                    season_count,
                });
            }
        }
        outcome
    }

    /// Load seasons for the podcast in the full overlay
    pub async fn load_detail(&mut self) -> Option<DetailOutcome> {
        let request = self.begin_detail()?;
        let result = load_seasons(&self.client, &self.options.api_base, request.podcast_id()).await;
        Some(self.complete_detail(&request, result))
    }

    /// Repeat a failed detail load
    pub async fn retry_detail(&mut self) -> Option<DetailOutcome> {
        self.load_detail().await
    }

    /// Expand or collapse a season of the open podcast
    pub fn toggle_season(&mut self, number: u32) -> bool {
        self.detail.toggle_season(number)
    }
}
