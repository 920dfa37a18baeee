//! Work aggregator
//!
//! Lists image-bearing works by an artist, plus the featured sample shown on
//! the gallery front page.

use super::client::{MetClient, SearchQuery};
use super::fetcher::UpstreamError;
use super::records::{ImagePreference, ObjectRecord, WorkDetail};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Object IDs examined per artist search
    pub works_id_cap: usize,
    /// Object IDs sampled for the featured listing
    pub featured_sample_size: usize,
    pub search_timeout: Duration,
    pub object_timeout: Duration,
}

pub struct WorkAggregator {
    client: Arc<MetClient>,
    settings: AggregatorSettings,
}

impl WorkAggregator {
    pub fn new(client: Arc<MetClient>, settings: AggregatorSettings) -> Self {
        Self { client, settings }
    }

    /// Up to `max_results` works by `display_name`, in upstream order
    ///
    /// Objects are fetched one at a time and iteration stops as soon as the
    /// limit is reached. A failed object is skipped. Only a failed search is
    /// an error. A blank name returns nothing without touching upstream.
    pub async fn works_by_artist(
        &self,
        display_name: &str,
        max_results: usize,
    ) -> Result<Vec<WorkDetail>, UpstreamError> {
        let display_name = display_name.trim();
        if display_name.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let ids = self
            .client
            .search(
                &SearchQuery::artist_or_culture(display_name),
                self.settings.search_timeout,
            )
            .await
            .map_err(|e| UpstreamError::Unavailable(format!("works search: {}", e)))?;

        let examined = ids.len().min(self.settings.works_id_cap);
        debug!(artist = %display_name, found = ids.len(), examined, "Works search complete");

        let mut works = Vec::with_capacity(max_results.min(examined));
        for id in ids.into_iter().take(self.settings.works_id_cap) {
            if works.len() >= max_results {
                break;
            }

            match self.client.object(id, self.settings.object_timeout).await {
                Ok(record) => match WorkDetail::from_record(&record, ImagePreference::Small) {
                    Some(work) => works.push(work),
                    None => debug!(object_id = id, "Object has no image, skipped"),
                },
                Err(e) => warn!(object_id = id, error = %e, "Object fetch failed, skipped"),
            }
        }

        info!(artist = %display_name, works = works.len(), "Works by artist");
        Ok(works)
    }

    /// A sample of image-bearing works from across the collection
    ///
    /// Detail records are fetched in parallel; the seed search failing is the
    /// only error.
    pub async fn featured_works(&self) -> Result<Vec<WorkDetail>, UpstreamError> {
        let ids = self
            .client
            .search(&SearchQuery::with_images("*"), self.settings.search_timeout)
            .await
            .map_err(|e| UpstreamError::Unavailable(format!("featured search: {}", e)))?;

        let ids: Vec<u64> = ids
            .into_iter()
            .take(self.settings.featured_sample_size)
            .collect();

        let outcomes = join_all(ids.iter().map(|&id| async move {
            (id, self.client.object(id, self.settings.object_timeout).await)
        }))
        .await;

        let works = collect_works(outcomes, ImagePreference::Primary);
        if works.is_empty() {
            info!("No featured works with images");
        }
        Ok(works)
    }
}

/// Keep successful, image-bearing records, in input order
pub fn collect_works(
    outcomes: Vec<(u64, Result<ObjectRecord, UpstreamError>)>,
    preference: ImagePreference,
) -> Vec<WorkDetail> {
    outcomes
        .into_iter()
        .filter_map(|(id, outcome)| match outcome {
            Ok(record) => WorkDetail::from_record(&record, preference),
            Err(e) => {
                warn!(object_id = id, error = %e, "Object fetch failed, skipped");
                None
            }
        })
        .collect()
}
