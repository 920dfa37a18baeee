//! In-memory upstream for unit tests

use super::fetcher::{JsonFetcher, UpstreamError};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&Url) -> Result<Value, UpstreamError> + Send + Sync>;

/// Fetcher answering from a closure and recording every URL requested
pub struct ScriptedFetcher {
    respond: Responder,
    delay: Option<Duration>,
    calls: Mutex<Vec<Url>>,
}

impl ScriptedFetcher {
    pub fn new(
        respond: impl Fn(&Url) -> Result<Value, UpstreamError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with 404
    pub fn empty() -> Self {
        Self::new(|_| Err(UpstreamError::Status(404)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|u| u.path().ends_with("/search"))
            .count()
    }

    pub fn object_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|u| u.path().contains("/objects/"))
            .count()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(url.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(url)
    }
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Declarative fake of the Met search and object endpoints
#[derive(Debug, Clone, Default)]
pub struct FakeMet {
    searches: HashMap<String, Vec<u64>>,
    failing_searches: HashSet<String>,
    objects: HashMap<u64, Value>,
    failing_objects: HashSet<u64>,
}

impl FakeMet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, q: &str, ids: impl IntoIterator<Item = u64>) -> Self {
        self.searches.insert(q.to_string(), ids.into_iter().collect());
        self
    }

    pub fn failing_search(mut self, q: &str) -> Self {
        self.failing_searches.insert(q.to_string());
        self
    }

    /// Object with an image and the given artist
    pub fn work(mut self, id: u64, artist: &str) -> Self {
        self.objects.insert(
            id,
            json!({
                "objectID": id,
                "title": format!("Work {}", id),
                "artistDisplayName": artist,
                "objectDate": "1900",
                "primaryImage": format!("https://images.example/{}.jpg", id),
                "primaryImageSmall": format!("https://images.example/{}-small.jpg", id),
            }),
        );
        self
    }

    pub fn imageless_work(mut self, id: u64, artist: &str) -> Self {
        self.objects.insert(
            id,
            json!({
                "objectID": id,
                "title": format!("Work {}", id),
                "artistDisplayName": artist,
                "primaryImage": "",
                "primaryImageSmall": "",
            }),
        );
        self
    }

    pub fn failing_object(mut self, id: u64) -> Self {
        self.failing_objects.insert(id);
        self
    }

    pub fn respond(&self, url: &Url) -> Result<Value, UpstreamError> {
        if url.path().ends_with("/search") {
            let q = query_param(url, "q").unwrap_or_default();
            if self.failing_searches.contains(&q) {
                return Err(UpstreamError::Transport("connection reset".into()));
            }
            return Ok(match self.searches.get(&q) {
                Some(ids) => json!({"total": ids.len(), "objectIDs": ids}),
                None => json!({"total": 0, "objectIDs": null}),
            });
        }

        let id = url
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<u64>().ok())
            .ok_or(UpstreamError::Status(404))?;

        if self.failing_objects.contains(&id) {
            return Err(UpstreamError::Transport("connection reset".into()));
        }
        self.objects
            .get(&id)
            .cloned()
            .ok_or(UpstreamError::Status(404))
    }

    pub fn into_fetcher(self) -> ScriptedFetcher {
        ScriptedFetcher::new(move |url| self.respond(url))
    }
}
