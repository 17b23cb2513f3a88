use thiserror::Error;

/// Errors raised while talking to the search endpoint
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured endpoint is not a valid URL
    #[error("invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The HTTP request failed, returned a non-success status, or the
    /// response body could not be decoded
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Batch-level fetch errors
///
/// Per-URL failures are not errors at this level; they are reported inside
/// the individual `FetchOutcome`s. A `FetchError` means the batch as a whole
/// was aborted and no outcomes are available.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No WebDriver session could be established during batch setup
    #[error("failed to reach WebDriver at {url}: {source}")]
    WebDriverConnect {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    /// A fetch worker disappeared without reporting its outcome
    #[error("a fetch worker exited without reporting a result for {url}")]
    WorkerLost { url: String },
}

/// Top-level error for a scrape run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
