//! Error types shared by the data sources, the window finder, and the API.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure to obtain generation-mix records from a data source.
///
/// The HTTP layer collapses every variant into a single generic 500 response;
/// the variants exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid timestamp {value:?} in upstream record: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Rejected `hours` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("hours parameter is missing")]
    Missing,

    #[error("hours parameter {0:?} is not an integer")]
    NotInteger(String),

    #[error("hours parameter {0} is outside 1..=6")]
    OutOfRange(i64),

    #[error("hours parameter given {0} times")]
    Repeated(usize),

    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// The sliding-window scan could not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window needs {needed} records but only {available} are available")]
    Infeasible { needed: usize, available: usize },

    #[error("records are not contiguous at index {index}: expected start {expected}, found {found}")]
    Gap {
        index: usize,
        expected: DateTime<Utc>,
        found: DateTime<Utc>,
    },
}

/// Failure while planning a charging window: either the fetch or the scan.
#[derive(Debug, Error)]
pub enum ChargingError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Window(#[from] WindowError),
}
