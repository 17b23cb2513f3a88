use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::fetch::{PageFetcher, WebFetcher};
use crate::results::ScrapeRecord;
use crate::search::{SearchProvider, SearxClient};

/// Orchestrates one search-and-scrape run
///
/// Wires the search provider and the page fetcher together and shapes their
/// outputs into [`ScrapeRecord`]s. Both collaborators sit behind capability
/// traits so the orchestration can be exercised against stubs.
pub struct Scraper {
    search: Box<dyn SearchProvider>,
    fetcher: Box<dyn PageFetcher>,
    config: ScraperConfig,
}

impl Scraper {
    /// Create a scraper backed by the concrete providers: a SearxNG search
    /// client and a WebDriver page fetcher
    pub fn new(config: ScraperConfig) -> Self {
        let search = Box::new(SearxClient::new(&config.search));
        Self::with_providers(config, search, Box::new(WebFetcher::new()))
    }

    /// Create a scraper with explicit provider implementations
    pub fn with_providers(
        config: ScraperConfig,
        search: Box<dyn SearchProvider>,
        fetcher: Box<dyn PageFetcher>,
    ) -> Self {
        Self {
            search,
            fetcher,
            config,
        }
    }

    /// Fetch every URL in one batch and collect the successful pages
    ///
    /// Failed URLs are logged and dropped from the result; their relative
    /// order is otherwise preserved. A batch-level failure (fetcher setup,
    /// lost worker) aborts the whole call with an error and no partial
    /// results.
    pub async fn scrape_urls(&self, urls: &[String]) -> Result<Vec<ScrapeRecord>, ScrapeError> {
        let outcomes = match self.fetcher.fetch_many(urls, &self.config.fetch).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                ::log::error!("Error scraping {:?}: {}", urls, e);
                return Err(e.into());
            }
        };

        let mut records = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome.markdown {
                Some(markdown) => {
                    records.push(ScrapeRecord::new(outcome.url, markdown.fit_markdown));
                }
                None => {
                    ::log::warn!(
                        "Failed to scrape {}: {}",
                        outcome.url,
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        Ok(records)
    }

    /// Search for the query and scrape the result pages
    ///
    /// Passes the provider's result links to [`Self::scrape_urls`] in
    /// provider order, without retries or deduplication.
    pub async fn search_and_scrape(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ScrapeRecord>, ScrapeError> {
        let response = self
            .search
            .response(&self.config.search.category, query, max_results)
            .await?;

        let urls: Vec<String> = response
            .results
            .into_iter()
            .map(|hit| hit.link)
            .collect();

        ::log::info!("Search for {:?} produced {} urls", query, urls.len());

        self.scrape_urls(&urls).await
    }
}
