use crate::config::SearchConfig;
use crate::error::SearchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// One search result returned by the provider
///
/// Only `link` is consumed downstream; title and snippet are carried for
/// diagnostics. SearxNG emits the link under `url`, so that key is accepted
/// as an alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// URL of the result page
    #[serde(alias = "url")]
    pub link: String,

    /// Result title (may be empty)
    #[serde(default)]
    pub title: String,

    /// Short text snippet for the result (SearxNG calls this `content`)
    #[serde(default, alias = "content")]
    pub snippet: String,
}

/// Response envelope from the search provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked results, best first
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// Capability interface for web search
///
/// Abstracting the provider keeps the orchestration testable against stub
/// implementations, independent of the concrete backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query in the given category and return at most `max_results`
    /// ranked results
    async fn response(
        &self,
        category: &str,
        query: &str,
        max_results: usize,
    ) -> Result<SearchResponse, SearchError>;
}

/// Search provider backed by a SearxNG-compatible JSON endpoint
pub struct SearxClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearxClient {
    /// Create a client for the configured search instance
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for SearxClient {
    async fn response(
        &self,
        category: &str,
        query: &str,
        max_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        let endpoint = search_endpoint(&self.base_url)?;

        ::log::debug!("Searching {} for: {}", endpoint, query);

        let mut response: SearchResponse = self
            .http
            .get(endpoint)
            .query(&[("q", query), ("categories", category), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // The endpoint has no result-count parameter; the bound is applied here
        response.results.truncate(max_results);

        ::log::info!(
            "Search returned {} results for: {}",
            response.results.len(),
            query
        );

        Ok(response)
    }
}

/// Resolve the `/search` endpoint under the configured base URL
///
/// `Url::join` replaces a trailing path segment, so a base like
/// `https://host/searx` needs its slash restored before joining or the
/// instance path would be lost.
fn search_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }

    base.join("search")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_endpoint_keeps_instance_path() {
        assert_eq!(
            search_endpoint("https://host.example/searx").unwrap().as_str(),
            "https://host.example/searx/search"
        );
        assert_eq!(
            search_endpoint("https://host.example/searx/").unwrap().as_str(),
            "https://host.example/searx/search"
        );
        assert_eq!(
            search_endpoint("http://localhost:8888").unwrap().as_str(),
            "http://localhost:8888/search"
        );
    }

    #[test]
    fn test_hit_accepts_url_alias() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"url": "https://a.example", "title": "A", "content": "snippet text"}"#,
        )
        .unwrap();

        assert_eq!(hit.link, "https://a.example");
        assert_eq!(hit.title, "A");
        assert_eq!(hit.snippet, "snippet text");
    }

    #[test]
    fn test_hit_accepts_link_field() {
        let hit: SearchHit = serde_json::from_str(r#"{"link": "https://b.example"}"#).unwrap();

        assert_eq!(hit.link, "https://b.example");
        assert!(hit.title.is_empty());
        assert!(hit.snippet.is_empty());
    }

    #[test]
    fn test_response_preserves_provider_order() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [
                {"url": "https://first.example"},
                {"url": "https://second.example"},
                {"url": "https://third.example"}
            ]}"#,
        )
        .unwrap();

        let links: Vec<&str> = response.results.iter().map(|h| h.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://first.example",
                "https://second.example",
                "https://third.example"
            ]
        );
    }

    #[test]
    fn test_response_tolerates_missing_results() {
        let response: SearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
