//! Shared station dataset.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::FuelStation;

use super::cache::StationCache;
use super::client::{FeedDto, StationClient};
use super::convert::{convert_feed, parse_published_at};
use super::error::StationError;

#[derive(Debug, Default)]
struct Snapshot {
    stations: Arc<Vec<FuelStation>>,
    published_at: Option<NaiveDateTime>,
}

impl Snapshot {
    fn from_feed(feed: &FeedDto) -> Self {
        Self {
            stations: Arc::new(convert_feed(feed)),
            published_at: parse_published_at(&feed.published),
        }
    }
}

/// Thread-safe station dataset.
///
/// Searches take a cheap [`snapshot`](Self::snapshot) and run against it,
/// so a background refresh never changes the data under a running search.
#[derive(Clone)]
pub struct StationDataset {
    inner: Arc<RwLock<Snapshot>>,
    client: StationClient,
    cache: StationCache,
}

impl StationDataset {
    /// Load the dataset, from the disk cache if fresh, else from the feed.
    ///
    /// Fails only if the cache is unusable and the feed is unreachable.
    pub async fn load(client: StationClient, cache: StationCache) -> Result<Self, StationError> {
        let snapshot = match cache.load() {
            Some(feed) => {
                info!(path = %cache.path().display(), "Loaded station feed from cache");
                Snapshot::from_feed(&feed)
            }
            None => {
                let feed = client.fetch_feed().await?;
                save_quietly(&cache, &feed);
                Snapshot::from_feed(&feed)
            }
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(snapshot)),
            client,
            cache,
        })
    }

    /// Create a dataset from stations already in memory.
    pub fn from_stations(client: StationClient, cache: StationCache, stations: Vec<FuelStation>) -> Self {
        let snapshot = Snapshot {
            stations: Arc::new(stations),
            published_at: None,
        };
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
            client,
            cache,
        }
    }

    /// The current stations.
    pub async fn snapshot(&self) -> Arc<Vec<FuelStation>> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.stations)
    }

    /// When the current data was published.
    pub async fn published_at(&self) -> Option<NaiveDateTime> {
        let guard = self.inner.read().await;
        guard.published_at
    }

    /// Get the number of stations.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.stations.len()
    }

    /// Check if the dataset is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.stations.is_empty()
    }

    /// Distinct brand names, sorted.
    pub async fn brands(&self) -> Vec<String> {
        let stations = self.snapshot().await;
        distinct_brands(&stations)
    }

    /// Refresh the data from the feed.
    ///
    /// On success, replaces the current stations. On failure, the existing
    /// stations are preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let feed = self.client.fetch_feed().await?;
        save_quietly(&self.cache, &feed);

        let snapshot = Snapshot::from_feed(&feed);
        let count = snapshot.stations.len();

        let mut guard = self.inner.write().await;
        *guard = snapshot;

        Ok(count)
    }
}

/// A cache write failure only costs a slower next start.
fn save_quietly(cache: &StationCache, feed: &FeedDto) {
    if let Err(e) = cache.save(feed) {
        warn!(error = %e, "Failed to write station cache");
    }
}

fn distinct_brands(stations: &[FuelStation]) -> Vec<String> {
    stations
        .iter()
        .map(|s| s.brand.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
