//! OpenStreetMap Nominatim geocoder.
//!
//! Used when no Google key is configured. Nominatim's usage policy requires
//! an identifying `User-Agent` and at most one request per second, so the
//! default concurrency is 1.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::GeoPoint;
use crate::planner::Geocoder;

use super::convert::convert_nominatim;
use super::error::RoutingError;
use super::http::{acquire, read_json};
use super::types::NominatimPlace;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_USER_AGENT: &str = concat!("refuel-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Sent as `User-Agent`
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: 1,
            timeout_secs: 30,
        }
    }
}

impl NominatimConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Nominatim search client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, RoutingError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| RoutingError::Api {
            status: 0,
            message: "Invalid User-Agent".to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        if address.trim().is_empty() {
            return Err(RoutingError::EmptyAddress);
        }

        let _permit = acquire(&self.semaphore).await?;

        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("limit", "1"),
                ("accept-language", "es"),
                ("q", address),
            ])
            .send()
            .await?;

        let places: Vec<NominatimPlace> = read_json(response).await?;
        let point = convert_nominatim(&places, address)?;

        debug!(address, %point, "Nominatim geocode");
        Ok(point)
    }
}
