use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the search provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of a SearxNG-compatible search instance
    #[serde(default = "default_search_url")]
    pub base_url: String,

    /// Search category passed with every query
    #[serde(default = "default_category")]
    pub category: String,
}

/// How the content filter interprets its pruning threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdType {
    /// Apply the word-count cutoff uniformly to every content block
    Fixed,
    /// Exempt structural blocks (headings, list items, code fences) from
    /// the word-count cutoff
    Dynamic,
}

/// Options for the content filter that prunes low-value nodes before
/// markdown generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFilterConfig {
    /// Pruning threshold in [0, 1]; lower retains more content
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Threshold interpretation mode
    #[serde(default = "default_threshold_type")]
    pub threshold_type: ThresholdType,

    /// Blocks with fewer words than this are dropped from the fit markdown
    #[serde(default = "default_min_word_threshold")]
    pub min_word_threshold: usize,
}

/// Configuration for markdown generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Content filter applied when producing the fit markdown
    #[serde(default)]
    pub filter: ContentFilterConfig,
}

/// Configuration for the page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL for the WebDriver instance used to render pages
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum number of pages fetched concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-page timeout in seconds covering navigation plus extraction
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Markdown generation options shared by every page in a batch
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

/// Top-level configuration for a scrape run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Search provider settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Page fetcher settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override endpoints from the environment
    ///
    /// `WEBDRIVER_URL` and `SEARX_URL` take precedence over the file and
    /// built-in defaults when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.fetch.webdriver_url = webdriver_url;
            }
        }
        if let Ok(searx_url) = std::env::var("SEARX_URL") {
            if !searx_url.is_empty() {
                self.search.base_url = searx_url;
            }
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            category: default_category(),
        }
    }
}

impl Default for ContentFilterConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            threshold_type: default_threshold_type(),
            min_word_threshold: default_min_word_threshold(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            max_concurrency: default_max_concurrency(),
            page_timeout_secs: default_page_timeout_secs(),
            markdown: MarkdownConfig::default(),
        }
    }
}

/// Default search endpoint
fn default_search_url() -> String {
    "http://localhost:8888".to_string()
}

/// Default search category
fn default_category() -> String {
    "web".to_string()
}

/// Default pruning threshold; low so most content is retained
fn default_threshold() -> f64 {
    0.05
}

/// Default threshold interpretation mode
fn default_threshold_type() -> ThresholdType {
    ThresholdType::Dynamic
}

/// Default minimum words per retained block
fn default_min_word_threshold() -> usize {
    5
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}

/// Default per-page timeout
fn default_page_timeout_secs() -> u64 {
    45
}
