use thiserror::Error;

/// Errors that can occur when talking to the podcast API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API URL '{url}' cannot be used as a base for endpoint paths")]
    NotABaseUrl { url: String },

    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while loading the podcast catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to parse date '{date_str}': {reason}")]
    InvalidDate { date_str: String, reason: String },
}

/// Errors that can occur while loading a podcast's seasons
#[derive(Error, Debug)]
pub enum DetailError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Errors that can occur when parsing a route
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route '{0}', expected '/' or '/podcast/<id>'")]
    Invalid(String),
}

/// Error returned when a sort option name is not recognized
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown sort option '{0}', expected one of: latest, oldest, title-asc, title-desc")]
pub struct ParseSortError(pub String);
