//! Disk cache for the fuel price feed.
//!
//! The feed is several megabytes and slow to download, while prices only
//! change a few times a day. The raw feed is stored next to the time it was
//! fetched so a restart within the TTL skips the download.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::FeedDto;
use super::error::StationError;

/// Feeds older than this are downloaded again.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    /// Seconds since the Unix epoch at download time.
    fetched_at: u64,
    feed: FeedDto,
}

/// Where the feed cache lives and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl StationCacheConfig {
    /// Cache at `path` with a one hour TTL.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// Disk cache for the price feed.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// The cached feed, if present, readable and younger than the TTL.
    pub fn load(&self) -> Option<FeedDto> {
        let text = std::fs::read_to_string(&self.config.path).ok()?;
        let file: CacheFile = match serde_json::from_str(&text) {
            Ok(file) => file,
            Err(e) => {
                debug!(
                    path = %self.config.path.display(),
                    error = %e,
                    "Ignoring unreadable station cache"
                );
                return None;
            }
        };

        let age = unix_now()?.saturating_sub(file.fetched_at);
        (age < self.config.ttl.as_secs()).then_some(file.feed)
    }

    /// Store `feed` as fetched now, creating parent directories as needed.
    ///
    /// The file is written under a temporary name and renamed into place, so
    /// a reader never sees a half-written cache.
    pub fn save(&self, feed: &FeedDto) -> Result<(), StationError> {
        let fetched_at = unix_now().ok_or_else(|| StationError::Cache {
            message: "system time before unix epoch".to_string(),
        })?;

        let path = &self.config.path;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| StationError::Cache {
                message: format!("failed to create cache directory: {e}"),
            })?;
        }

        let json = serde_json::to_vec(&CacheFile {
            fetched_at,
            feed: feed.clone(),
        })
        .map_err(|e| StationError::Cache {
            message: format!("failed to serialize cache: {e}"),
        })?;

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, path))
            .map_err(|e| StationError::Cache {
                message: format!("failed to write {}: {e}", path.display()),
            })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}
