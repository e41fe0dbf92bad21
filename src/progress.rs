use std::sync::Arc;

/// Events emitted while the directory loads data, for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The catalog is being fetched
    FetchingCatalog { url: String },

    /// The catalog was fetched and enriched
    CatalogLoaded { podcast_count: usize },

    /// The catalog could not be loaded
    CatalogFailed { error: String },

    /// Season detail is being fetched for a podcast
    FetchingDetail { podcast_id: String },

    /// Season detail was stored
    DetailLoaded {
        podcast_id: String,
        season_count: usize,
    },

    /// Season detail could not be loaded
    DetailFailed { podcast_id: String, error: String },

    /// A detail result arrived for a podcast that is no longer open
    DetailDiscarded { podcast_id: String },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
