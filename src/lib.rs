//! Search the web, scrape the result pages, and keep the markdown that
//! matters.
//!
//! The crate wires two external capabilities together: a [`SearchProvider`]
//! that turns a query into ranked result URLs, and a [`PageFetcher`] that
//! renders each page and converts it to filtered markdown. The [`Scraper`]
//! orchestrator sequences the two and shapes the outcomes into
//! [`ScrapeRecord`]s ready for serialization.

// Re-export modules
pub mod config;
pub mod error;
pub mod fetch;
pub mod markdown;
pub mod results;
pub mod scrape;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{FetchError, ScrapeError, SearchError};
pub use fetch::{FetchOutcome, PageFetcher, WebFetcher};
pub use markdown::{MarkdownGenerator, PageMarkdown};
pub use results::ScrapeRecord;
pub use scrape::Scraper;
pub use search::{SearchHit, SearchProvider, SearchResponse, SearxClient};
