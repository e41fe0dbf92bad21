pub mod api;
pub mod catalog;
pub mod detail;
pub mod directory;
pub mod error;
pub mod genre;
pub mod http;
pub mod progress;
pub mod selection;
pub mod view;

// Re-export main types for convenience
pub use catalog::{Episode, PodcastSummary, SeasonDetail};
pub use detail::{DetailOutcome, DetailView};
pub use directory::{Directory, DirectoryOptions};
pub use error::{ApiError, CatalogError, DetailError, ParseSortError, RouteError};
pub use genre::{Genre, all_genres, resolve_genre};
pub use http::{HttpClient, ReqwestClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use selection::{Route, Selection, SelectionState};
pub use view::{SortOption, ViewAction, ViewState};
