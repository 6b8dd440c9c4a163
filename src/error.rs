//! Error types for the feed ingestion pipeline.

use thiserror::Error;

/// Everything that can go wrong in one fetch-parse cycle.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed request timed out after {0}s")]
    Timeout(u64),

    #[error("feed host answered with HTTP {0}")]
    Status(u16),

    #[error("calendar data could not be parsed: {0}")]
    Parse(String),

    #[error("no feed URL configured")]
    NotConfigured,

    #[error("a refresh is already in flight")]
    RefreshInFlight,
}

pub type FeedResult<T> = Result<T, FeedError>;
