//! Google Maps Platform client.
//!
//! Geocoding goes through the Geocoding API and routing through the Routes
//! API (`computeRoutes`). Both share one API key and one request semaphore.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{BaseRoute, GeoPoint, StopRoute};
use crate::planner::{Geocoder, RouteProvider};

use super::convert::{convert_base_route, convert_geocode, convert_stop_route};
use super::error::RoutingError;
use super::http::{acquire, read_json};
use super::types::{ComputeRoutesRequest, ComputeRoutesResponse, GeocodeResponse};

/// Default base URL for the Routes API.
const DEFAULT_ROUTES_URL: &str = "https://routes.googleapis.com";

/// Default base URL for the Geocoding API.
const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Fields requested for a route without stops.
const BASE_FIELD_MASK: &str = "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline";

/// Fields requested for a route through one stop.
const STOP_FIELD_MASK: &str = "routes.distanceMeters,routes.legs.distanceMeters";

/// Configuration for the Google client.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the Routes API
    pub routes_url: String,
    /// Base URL for the Geocoding API
    pub geocode_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GoogleConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            routes_url: DEFAULT_ROUTES_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Point both APIs at a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.routes_url = url.clone();
        self.geocode_url = url;
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

/// Google geocoding and routing client.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    api_key: String,
    routes_url: String,
    geocode_url: String,
    semaphore: Arc<Semaphore>,
}

impl GoogleClient {
    /// Create a new Google client with the given configuration.
    pub fn new(config: GoogleConfig) -> Result<Self, RoutingError> {
        let mut headers = HeaderMap::new();

        // Routes API authenticates by header, Geocoding by query parameter
        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| RoutingError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("X-Goog-Api-Key", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            routes_url: config.routes_url,
            geocode_url: config.geocode_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn compute_routes(
        &self,
        body: &ComputeRoutesRequest,
        field_mask: &'static str,
    ) -> Result<ComputeRoutesResponse, RoutingError> {
        let _permit = acquire(&self.semaphore).await?;

        let url = format!("{}/directions/v2:computeRoutes", self.routes_url);

        let response = self
            .http
            .post(&url)
            .header("X-Goog-FieldMask", field_mask)
            .json(body)
            .send()
            .await?;

        read_json(response).await
    }
}

impl Geocoder for GoogleClient {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        if address.trim().is_empty() {
            return Err(RoutingError::EmptyAddress);
        }

        let _permit = acquire(&self.semaphore).await?;

        let url = format!("{}/maps/api/geocode/json", self.geocode_url);

        let response = self
            .http
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = read_json(response).await?;
        let point = convert_geocode(body, address)?;

        debug!(address, %point, "Google geocode");
        Ok(point)
    }
}

impl RouteProvider for GoogleClient {
    async fn base_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<BaseRoute, RoutingError> {
        let body = ComputeRoutesRequest::driving(origin, destination).unrestricted();
        let response = self.compute_routes(&body, BASE_FIELD_MASK).await?;
        convert_base_route(response, origin, destination)
    }

    async fn route_with_stop(
        &self,
        origin: GeoPoint,
        stop: GeoPoint,
        destination: GeoPoint,
    ) -> Result<StopRoute, RoutingError> {
        let body = ComputeRoutesRequest::driving(origin, destination).via(stop);
        let response = self.compute_routes(&body, STOP_FIELD_MASK).await?;
        convert_stop_route(response)
    }
}
