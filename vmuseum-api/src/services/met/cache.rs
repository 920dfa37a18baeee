//! Artist cache
//!
//! Holds one generation of the artist list at a time. A generation is never
//! mutated: a successful recompute builds a new one and swaps the pointer, so a
//! reader sees either the old list or the new list, never a mix.
//!
//! States: `Empty` → `Fresh` on first success; `Fresh` → `Stale` when the
//! validity window elapses; `Stale` → `Fresh` on a successful recompute. A failed
//! recompute keeps the previous generation and serves it. With no previous
//! generation the failure reaches the caller.

use super::artists::ArtistSource;
use super::fetcher::UpstreamError;
use super::records::ArtistEntry;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Observable cache state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

/// One immutable artist list
#[derive(Debug)]
pub struct ArtistGeneration {
    pub entries: Vec<ArtistEntry>,
    pub computed_at: Instant,
    expires_at: Instant,
}

impl ArtistGeneration {
    fn new(entries: Vec<ArtistEntry>, validity: Duration) -> Self {
        let computed_at = Instant::now();
        Self {
            entries,
            computed_at,
            expires_at: computed_at + validity,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub struct ArtistCache {
    source: Arc<dyn ArtistSource>,
    validity: Duration,
    current: RwLock<Option<Arc<ArtistGeneration>>>,
    /// Serializes recomputes and holds the error of the last failed one;
    /// readers of a fresh generation never take it
    refresh: Mutex<Option<UpstreamError>>,
    /// Completed recompute attempts, successful or not
    attempts: AtomicU64,
}

impl ArtistCache {
    pub fn new(source: Arc<dyn ArtistSource>, validity: Duration) -> Self {
        Self {
            source,
            validity,
            current: RwLock::new(None),
            refresh: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> CacheState {
        match self.current.read().await.as_ref() {
            None => CacheState::Empty,
            Some(generation) if generation.is_fresh(Instant::now()) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// Current generation, fresh or not
    pub async fn snapshot(&self) -> Option<Arc<ArtistGeneration>> {
        self.current.read().await.clone()
    }

    async fn fresh_generation(&self) -> Option<Arc<ArtistGeneration>> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|generation| generation.is_fresh(Instant::now()))
            .cloned()
    }

    /// Cached artists, recomputing when the window has elapsed
    pub async fn get_artists(&self) -> Result<Vec<ArtistEntry>, UpstreamError> {
        if let Some(generation) = self.fresh_generation().await {
            debug!(artists = generation.entries.len(), "Serving artists from cache");
            return Ok(generation.entries.clone());
        }

        let attempts_seen = self.attempts.load(Ordering::SeqCst);
        let mut last_error = self.refresh.lock().await;

        if let Some(generation) = self.fresh_generation().await {
            return Ok(generation.entries.clone());
        }

        // A recompute finished while we waited: share its outcome
        if self.attempts.load(Ordering::SeqCst) != attempts_seen {
            return match (self.snapshot().await, last_error.as_ref()) {
                (Some(previous), _) => {
                    debug!("Recompute just failed, serving previous generation");
                    Ok(previous.entries.clone())
                }
                (None, Some(e)) => Err(e.clone()),
                (None, None) => Err(UpstreamError::Unavailable(
                    "artist list not available".to_string(),
                )),
            };
        }

        info!("Artist cache empty or stale, recomputing");
        let outcome = self.source.resolve().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match outcome {
            Ok(entries) => {
                *last_error = None;
                let generation = Arc::new(ArtistGeneration::new(entries, self.validity));
                *self.current.write().await = Some(Arc::clone(&generation));
                info!(artists = generation.entries.len(), "Artist cache refreshed");
                Ok(generation.entries.clone())
            }
            Err(e) => match self.snapshot().await {
                Some(previous) => {
                    *last_error = Some(e.clone());
                    warn!(
                        error = %e,
                        artists = previous.entries.len(),
                        "Artist recompute failed, serving previous generation"
                    );
                    Ok(previous.entries.clone())
                }
                None => {
                    error!(error = %e, "Artist recompute failed and nothing is cached");
                    *last_error = Some(e.clone());
                    Err(e)
                }
            },
        }
    }

    /// Mark the current generation stale; its entries stay available as fallback
    pub async fn invalidate(&self) {
        let mut current = self.current.write().await;
        if let Some(generation) = current.as_ref() {
            *current = Some(Arc::new(ArtistGeneration {
                entries: generation.entries.clone(),
                computed_at: generation.computed_at,
                expires_at: generation.computed_at,
            }));
        }
    }
}
