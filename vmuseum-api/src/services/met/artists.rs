//! Artist resolver
//!
//! Turns a free-text seed query into a validated, sorted list of artists:
//! 1. Seed search (images + artist/culture filter), capped
//! 2. Detail records fetched in parallel, failures excluded
//! 3. Display names extracted, trimmed, deduplicated (first occurrence wins)
//! 4. Each candidate checked for at least one matching work
//! 5. Sorted, capped, tokenized

use super::client::{MetClient, SearchQuery};
use super::fetcher::UpstreamError;
use super::records::{ArtistEntry, ObjectRecord};
use async_trait::async_trait;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can produce a fresh artist list
#[async_trait]
pub trait ArtistSource: Send + Sync {
    async fn resolve(&self) -> Result<Vec<ArtistEntry>, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub seed_query: String,
    pub seed_candidate_cap: usize,
    pub artist_list_cap: usize,
    pub search_timeout: Duration,
    pub object_timeout: Duration,
    pub validation_timeout: Duration,
    pub validation_concurrency: usize,
}

pub struct ArtistResolver {
    client: Arc<MetClient>,
    settings: ResolverSettings,
}

impl ArtistResolver {
    pub fn new(client: Arc<MetClient>, settings: ResolverSettings) -> Self {
        Self { client, settings }
    }

    /// Resolve artists for `seed_query`
    ///
    /// Fails with [`UpstreamError::Unavailable`] only when the seed search fails;
    /// per-object and per-candidate failures just shrink the result.
    pub async fn search_artists(&self, seed_query: &str) -> Result<Vec<ArtistEntry>, UpstreamError> {
        let ids = self
            .client
            .search(
                &SearchQuery::artist_or_culture(seed_query),
                self.settings.search_timeout,
            )
            .await
            .map_err(|e| UpstreamError::Unavailable(format!("artist seed search: {}", e)))?;

        let total = ids.len();
        let ids: Vec<u64> = ids.into_iter().take(self.settings.seed_candidate_cap).collect();
        info!(
            seed = %seed_query,
            total,
            examined = ids.len(),
            "Artist seed search complete"
        );

        let outcomes = join_all(ids.iter().map(|&id| async move {
            (id, self.client.object(id, self.settings.object_timeout).await)
        }))
        .await;

        let candidates = candidate_names(outcomes);
        info!(candidates = candidates.len(), "Validating artist candidates");

        let validated = self.validate_candidates(candidates).await;
        let entries = finalize_artists(validated, self.settings.artist_list_cap);

        info!(artists = entries.len(), "Artist list resolved");
        Ok(entries)
    }

    /// Keep only candidates whose own search returns at least one object
    async fn validate_candidates(&self, candidates: Vec<String>) -> Vec<String> {
        let concurrency = self.settings.validation_concurrency.max(1);

        stream::iter(candidates)
            .map(|name| async move {
                let outcome = self
                    .client
                    .search(
                        &SearchQuery::artist_or_culture(name.as_str()),
                        self.settings.validation_timeout,
                    )
                    .await;
                (name, outcome)
            })
            .buffer_unordered(concurrency)
            .filter_map(|(name, outcome)| async move {
                match outcome {
                    Ok(ids) if !ids.is_empty() => {
                        debug!(artist = %name, works = ids.len(), "Artist has works");
                        Some(name)
                    }
                    Ok(_) => {
                        debug!(artist = %name, "Artist has no works, excluded");
                        None
                    }
                    Err(e) => {
                        warn!(artist = %name, error = %e, "Artist validation failed, excluded");
                        None
                    }
                }
            })
            .collect()
            .await
    }
}

#[async_trait]
impl ArtistSource for ArtistResolver {
    async fn resolve(&self) -> Result<Vec<ArtistEntry>, UpstreamError> {
        self.search_artists(&self.settings.seed_query).await
    }
}

/// Extract unique display names from per-object outcomes, in input order
///
/// Failed fetches and records without a usable name are excluded.
pub fn candidate_names(outcomes: Vec<(u64, Result<ObjectRecord, UpstreamError>)>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (id, outcome) in outcomes {
        let record = match outcome {
            Ok(record) => record,
            Err(e) => {
                debug!(object_id = id, error = %e, "Object fetch failed, no candidate");
                continue;
            }
        };

        if let Some(name) = record.artist_name() {
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }

    names
}

/// Sort ascending, drop duplicates, cap, and assign ids
pub fn finalize_artists(mut names: Vec<String>, cap: usize) -> Vec<ArtistEntry> {
    names.sort();
    names.dedup();
    names.truncate(cap);
    names.into_iter().map(ArtistEntry::new).collect()
}
