//! Met collection API client
//!
//! Builds upstream URLs and runs every call through the timeout guard.

use super::fetcher::{JsonFetcher, UpstreamError};
use super::records::{ObjectRecord, SearchResponse};
use super::timeout::with_timeout;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Parameters of one `/search` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub has_images: bool,
    pub artist_or_culture: bool,
}

impl SearchQuery {
    /// Image-bearing objects whose artist or culture matches `text`
    pub fn artist_or_culture(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_images: true,
            artist_or_culture: true,
        }
    }

    /// Image-bearing objects matching `text` in any field
    pub fn with_images(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_images: true,
            artist_or_culture: false,
        }
    }
}

pub struct MetClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
}

impl MetClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, base_url: &str) -> Result<Self, UpstreamError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| UpstreamError::Transport(format!("invalid base URL {}: {}", base_url, e)))?;

        Ok(Self { fetcher, base_url })
    }

    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, UpstreamError> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
        if query.has_images {
            params.push(("hasImages", "true"));
        }
        if query.artist_or_culture {
            params.push(("artistOrCulture", "true"));
        }
        params.push(("q", query.text.as_str()));

        Url::parse_with_params(&format!("{}/search", self.base_url), params)
            .map_err(|e| UpstreamError::Transport(e.to_string()))
    }

    pub fn object_url(&self, object_id: u64) -> Result<Url, UpstreamError> {
        Url::parse(&format!("{}/objects/{}", self.base_url, object_id))
            .map_err(|e| UpstreamError::Transport(e.to_string()))
    }

    /// Run one search and return the matching object IDs (possibly empty)
    pub async fn search(
        &self,
        query: &SearchQuery,
        limit: Duration,
    ) -> Result<Vec<u64>, UpstreamError> {
        let url = self.search_url(query)?;
        let value = with_timeout(self.fetcher.fetch_json(&url), limit).await?;
        let response: SearchResponse =
            serde_json::from_value(value).map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(response.into_ids())
    }

    /// Fetch one object's detail record
    pub async fn object(
        &self,
        object_id: u64,
        limit: Duration,
    ) -> Result<ObjectRecord, UpstreamError> {
        let url = self.object_url(object_id)?;
        let value = with_timeout(self.fetcher.fetch_json(&url), limit).await?;

        serde_json::from_value(value).map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::met::test_support::ScriptedFetcher;
    use serde_json::json;

    const BASE: &str = "https://collectionapi.metmuseum.org/public/collection/v1/";

    fn client(fetcher: ScriptedFetcher) -> MetClient {
        MetClient::new(Arc::new(fetcher), BASE).unwrap()
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = MetClient::new(Arc::new(ScriptedFetcher::empty()), "not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = client(ScriptedFetcher::empty());
        let url = client
            .search_url(&SearchQuery::artist_or_culture("Rembrandt van Rijn & co"))
            .unwrap();

        assert_eq!(url.path(), "/public/collection/v1/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("hasImages".to_string(), "true".to_string()),
                ("artistOrCulture".to_string(), "true".to_string()),
                ("q".to_string(), "Rembrandt van Rijn & co".to_string()),
            ]
        );
    }

    #[test]
    fn test_object_url() {
        let client = client(ScriptedFetcher::empty());
        assert_eq!(
            client.object_url(436535).unwrap().as_str(),
            "https://collectionapi.metmuseum.org/public/collection/v1/objects/436535"
        );
    }

    #[tokio::test]
    async fn test_search_returns_ids() {
        let fetcher = ScriptedFetcher::new(|url| match url.path() {
            p if p.ends_with("/search") => Ok(json!({"total": 3, "objectIDs": [3, 1, 2]})),
            _ => Err(UpstreamError::Status(404)),
        });
        let client = client(fetcher);

        let ids = client
            .search(&SearchQuery::with_images("*"), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_search_with_wrong_shape_is_parse_error() {
        let client = client(ScriptedFetcher::new(|_| Ok(json!({"objectIDs": "many"}))));

        let result = client
            .search(&SearchQuery::with_images("*"), Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(UpstreamError::Parse(_))));
    }

    #[tokio::test]
    async fn test_slow_object_times_out() {
        let fetcher = ScriptedFetcher::new(|_| Ok(json!({"objectID": 1}))).with_delay(Duration::from_millis(300));
        let client = client(fetcher);

        let result = client.object(1, Duration::from_millis(20)).await;
        assert!(matches!(result, Err(UpstreamError::Timeout(_))));
    }
}
