//! Metropolitan Museum of Art collection integration
//!
//! Read-only aggregation over the public collection API:
//! - `fetcher` - one JSON GET per call
//! - `timeout` - deadline guard for every upstream call
//! - `client` - URL construction for `/search` and `/objects/{id}`
//! - `artists` - artist resolver (seed search → candidates → validation)
//! - `works` - works by artist, featured sample
//! - `cache` - artist list cache with serve-stale-on-error

pub mod artists;
pub mod cache;
pub mod client;
pub mod fetcher;
pub mod records;
pub mod timeout;
pub mod works;

#[cfg(test)]
pub(crate) mod test_support;

pub use artists::{ArtistResolver, ArtistSource, ResolverSettings};
pub use cache::{ArtistCache, CacheState};
pub use client::{MetClient, SearchQuery};
pub use fetcher::{HttpJsonFetcher, JsonFetcher, UpstreamError};
pub use records::{decode_artist_id, encode_artist_id, ArtistEntry, WorkDetail};
pub use works::{AggregatorSettings, WorkAggregator};

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use vmuseum_common::config::MetSection;

/// Runtime settings for the Met integration
#[derive(Debug, Clone)]
pub struct MetSettings {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub cache_validity: Duration,
    pub resolver: ResolverSettings,
    pub aggregator: AggregatorSettings,
    pub works_limit_by_id: usize,
    pub works_limit_by_name: usize,
}

impl From<&MetSection> for MetSettings {
    fn from(section: &MetSection) -> Self {
        let search_timeout = Duration::from_millis(section.search_timeout_ms);
        let object_timeout = Duration::from_millis(section.object_timeout_ms);

        Self {
            base_url: section.base_url.clone(),
            user_agent: section.user_agent.clone(),
            request_timeout: Duration::from_secs(section.request_timeout_secs),
            cache_validity: Duration::from_secs(section.cache_validity_secs),
            resolver: ResolverSettings {
                seed_query: section.seed_query.clone(),
                seed_candidate_cap: section.seed_candidate_cap,
                artist_list_cap: section.artist_list_cap,
                search_timeout,
                object_timeout,
                validation_timeout: Duration::from_millis(section.validation_timeout_ms),
                validation_concurrency: section.validation_concurrency,
            },
            aggregator: AggregatorSettings {
                works_id_cap: section.works_id_cap,
                featured_sample_size: section.featured_sample_size,
                search_timeout,
                object_timeout,
            },
            works_limit_by_id: section.works_limit_by_id,
            works_limit_by_name: section.works_limit_by_name,
        }
    }
}

impl Default for MetSettings {
    fn default() -> Self {
        Self::from(&MetSection::default())
    }
}

/// How a caller names an artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistRef {
    /// Token from [`ArtistEntry::id`]
    Id(String),
    /// Display name as typed or listed
    Name(String),
}

impl ArtistRef {
    /// Display name this reference stands for, if it can be recovered
    pub fn display_name(&self) -> Option<String> {
        match self {
            ArtistRef::Id(id) => decode_artist_id(id),
            ArtistRef::Name(name) => Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }
}

/// Facade used by the HTTP layer
pub struct MetCatalog {
    cache: ArtistCache,
    works: WorkAggregator,
    works_limit_by_id: usize,
    works_limit_by_name: usize,
}

impl MetCatalog {
    /// Catalog backed by the real upstream over HTTP
    pub fn new(settings: MetSettings) -> Result<Self, UpstreamError> {
        let fetcher = HttpJsonFetcher::new(&settings.user_agent, settings.request_timeout)?;
        Self::with_fetcher(settings, Arc::new(fetcher))
    }

    /// Catalog backed by any fetcher
    pub fn with_fetcher(
        settings: MetSettings,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Result<Self, UpstreamError> {
        let client = Arc::new(MetClient::new(fetcher, &settings.base_url)?);
        let resolver = ArtistResolver::new(Arc::clone(&client), settings.resolver);

        Ok(Self {
            cache: ArtistCache::new(Arc::new(resolver), settings.cache_validity),
            works: WorkAggregator::new(client, settings.aggregator),
            works_limit_by_id: settings.works_limit_by_id,
            works_limit_by_name: settings.works_limit_by_name,
        })
    }

    /// Artists with retrievable works, sorted by display name
    ///
    /// Errors only when nothing has ever been cached and the recompute fails.
    pub async fn list_artists(&self) -> Result<Vec<ArtistEntry>, UpstreamError> {
        self.cache.get_artists().await
    }

    /// Works by an artist; any failure yields an empty list
    pub async fn list_works_by_artist(&self, artist: &ArtistRef, limit: usize) -> Vec<WorkDetail> {
        let Some(name) = artist.display_name() else {
            warn!(artist = ?artist, "Unusable artist reference, returning no works");
            return Vec::new();
        };

        match self.works.works_by_artist(&name, limit).await {
            Ok(works) => works,
            Err(e) => {
                warn!(artist = %name, error = %e, "Works lookup failed, returning no works");
                Vec::new()
            }
        }
    }

    pub async fn featured_works(&self) -> Result<Vec<WorkDetail>, UpstreamError> {
        self.works.featured_works().await
    }

    pub async fn cache_state(&self) -> CacheState {
        self.cache.state().await
    }

    pub fn works_limit_by_id(&self) -> usize {
        self.works_limit_by_id
    }

    pub fn works_limit_by_name(&self) -> usize {
        self.works_limit_by_name
    }
}
