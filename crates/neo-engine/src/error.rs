use thiserror::Error;

/// Failures of the data fetch adapters.
/// A malformed body is reported like any other failed poll and retried on the next interval.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),

    #[error("feed returned HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("malformed feed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("feed has no entry for {0}")]
    MissingDate(String),
}

/// Initial load failure. Fatal for the session: the host shows a persistent message.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not load planets: {0}")]
    Planets(#[source] FeedError),

    #[error("could not load asteroids: {0}")]
    Asteroids(#[source] FeedError),
}

impl InitError {
    /// Text shown in place of the loading indicator.
    pub fn user_message(&self) -> &'static str {
        "Error loading data. Please refresh."
    }
}
