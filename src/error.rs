//! Error types for market-data queries.
//!
//! `QueryError` is what every fetcher returns. Its `Display` output is the
//! exact text shown to the user, so the services layer can turn any failure
//! into a result string without matching on it.
use thiserror::Error;

/// Failure of a single quote, series or news query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Transport-level failure (DNS, refused connection, broken body).
    #[error("Query failed. Please check your network connection and try again.")]
    Connectivity(#[from] reqwest::Error),

    /// Well-formed response that carries no price or series for the requested key.
    #[error("No data for {0}")]
    NoData(String),

    /// The provider answered with an explicit error envelope.
    #[error("{0}")]
    Upstream(String),

    /// The ticker directory could not be loaded at startup.
    #[error("Ticker directory unavailable")]
    DirectoryUnavailable,

    /// Response body was JSON but did not have the expected shape.
    #[error("Unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure while combining series into a `SeriesTable`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SeriesError {
    #[error("{0} is already on the chart")]
    DuplicateSymbol(String),
}
