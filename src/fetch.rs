use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::markdown::{MarkdownGenerator, PageMarkdown};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::timeout;

/// Per-URL result of a batched fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The URL that was fetched
    pub url: String,

    /// Extracted markdown on success
    pub markdown: Option<PageMarkdown>,

    /// Failure description when the page could not be fetched
    pub error: Option<String>,
}

impl FetchOutcome {
    /// Build a successful outcome
    pub fn ok(url: String, markdown: PageMarkdown) -> Self {
        Self {
            url,
            markdown: Some(markdown),
            error: None,
        }
    }

    /// Build a failed outcome with an error description
    pub fn failed(url: String, error: impl Into<String>) -> Self {
        Self {
            url,
            markdown: None,
            error: Some(error.into()),
        }
    }

    /// Whether the page was fetched and converted successfully
    pub fn success(&self) -> bool {
        self.markdown.is_some()
    }
}

/// Capability interface for batched page fetching
///
/// Implementations handle their own concurrency and per-page error capture.
/// An `Err` means the batch as a whole was aborted (e.g. setup failed) and
/// no per-URL outcomes exist; individual page failures are reported inside
/// the returned outcomes instead.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch every URL under one shared configuration, returning outcomes
    /// in input order
    async fn fetch_many(
        &self,
        urls: &[String],
        config: &FetchConfig,
    ) -> Result<Vec<FetchOutcome>, FetchError>;
}

/// Page fetcher backed by WebDriver-rendered sessions
///
/// Each in-flight page gets its own WebDriver session; concurrency is
/// bounded by `FetchConfig::max_concurrency`.
#[derive(Debug, Default)]
pub struct WebFetcher;

impl WebFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageFetcher for WebFetcher {
    async fn fetch_many(
        &self,
        urls: &[String],
        config: &FetchConfig,
    ) -> Result<Vec<FetchOutcome>, FetchError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        ::log::info!(
            "Fetching {} urls via WebDriver at {}",
            urls.len(),
            config.webdriver_url
        );

        // Setup probe: if no session can be established at all, the batch
        // fails as a whole rather than producing N identical per-URL errors.
        let probe = ClientBuilder::native()
            .connect(&config.webdriver_url)
            .await
            .map_err(|source| FetchError::WebDriverConnect {
                url: config.webdriver_url.clone(),
                source,
            })?;
        if let Err(e) = probe.close().await {
            ::log::warn!("Failed to close probe session: {}", e);
        }

        let generator = Arc::new(MarkdownGenerator::new(config.markdown.clone()));
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        let page_timeout = Duration::from_secs(config.page_timeout_secs);
        let (tx, mut rx) = mpsc::channel::<(usize, FetchOutcome)>(urls.len());

        for (index, url) in urls.iter().cloned().enumerate() {
            let webdriver_url = config.webdriver_url.clone();
            let generator = Arc::clone(&generator);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                ::log::debug!("Fetching: {}", url);

                let outcome =
                    fetch_page(&webdriver_url, &url, generator.as_ref(), page_timeout).await;

                // Receiver only drops on batch abort; nothing to do then
                let _ = tx.send((index, outcome)).await;
            });
        }
        drop(tx);

        // Reassemble outcomes in input order
        let mut slots: Vec<Option<FetchOutcome>> = vec![None; urls.len()];
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        let mut outcomes = Vec::with_capacity(urls.len());
        for (slot, url) in slots.into_iter().zip(urls) {
            match slot {
                Some(outcome) => outcomes.push(outcome),
                // A worker panicked before reporting; treat as batch failure
                None => return Err(FetchError::WorkerLost { url: url.clone() }),
            }
        }

        Ok(outcomes)
    }
}

/// Render one page and convert it to markdown
///
/// The timeout covers navigation and extraction only: the session is opened
/// before it and closed after it on every branch. Timing out the whole fetch
/// would drop the future with the session still live, and a dropped client
/// never sends the WebDriver session delete.
async fn fetch_page(
    webdriver_url: &str,
    url: &str,
    generator: &MarkdownGenerator,
    page_timeout: Duration,
) -> FetchOutcome {
    let start = std::time::Instant::now();

    let client = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => client,
        Err(e) => {
            return FetchOutcome::failed(url.to_string(), format!("WebDriver session: {}", e));
        }
    };

    let outcome = match timeout(page_timeout, navigate_and_extract(&client, url, generator)).await
    {
        Ok(Ok(markdown)) => {
            ::log::debug!(
                "Fetched {} ({:?}) in {:.2} seconds",
                url,
                markdown.title,
                start.elapsed().as_secs_f64()
            );
            FetchOutcome::ok(url.to_string(), markdown)
        }
        Ok(Err(e)) => FetchOutcome::failed(url.to_string(), e),
        Err(_) => {
            ::log::error!("Timeout fetching: {}", url);
            FetchOutcome::failed(url.to_string(), "timed out")
        }
    };

    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close session for {}: {}", url, e);
    }

    outcome
}

/// Navigate to the URL, pull the rendered source, and run markdown generation
async fn navigate_and_extract(
    client: &Client,
    url: &str,
    generator: &MarkdownGenerator,
) -> Result<PageMarkdown, String> {
    client
        .goto(url)
        .await
        .map_err(|e| format!("navigation: {}", e))?;

    let html = client
        .source()
        .await
        .map_err(|e| format!("page source: {}", e))?;

    Ok(generator.generate(&html, url))
}
