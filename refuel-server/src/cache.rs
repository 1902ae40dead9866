//! Caching layer for geocoding results.
//!
//! The same trip endpoints are searched repeatedly (home, work, a regular
//! destination), and geocoding is both slow and rate limited. Results are
//! keyed by the normalised address text. Only successful lookups are
//! cached, so a transient provider failure is retried on the next search.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::GeoPoint;
use crate::planner::Geocoder;
use crate::routing::RoutingError;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Normalise address text into a cache key.
fn cache_key(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches its successful results.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: MokaCache<String, GeoPoint>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the wrapped geocoder for lookups that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        let key = cache_key(address);

        // Try cache first
        if let Some(point) = self.cache.get(&key).await {
            trace!(address, "Geocode cache hit");
            return Ok(point);
        }

        let point = self.inner.geocode(address).await?;
        self.cache.insert(key, point).await;

        Ok(point)
    }
}
