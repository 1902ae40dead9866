//! Provider selection.
//!
//! A Google key switches both geocoding and routing to Google. Without one,
//! geocoding falls back to Nominatim and routing to straight lines.

use crate::domain::{BaseRoute, GeoPoint, StopRoute};
use crate::planner::{Geocoder, RouteProvider};

use super::error::RoutingError;
use super::google::{GoogleClient, GoogleConfig};
use super::nominatim::{NominatimClient, NominatimConfig};
use super::straight_line::StraightLineRouter;

/// Geocoding backend in use.
#[derive(Debug, Clone)]
pub enum Geocoding {
    Google(GoogleClient),
    Nominatim(NominatimClient),
}

/// Routing backend in use.
#[derive(Debug, Clone)]
pub enum Routing {
    Google(GoogleClient),
    StraightLine(StraightLineRouter),
}

/// Shared client settings for [`select_providers`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Google Maps key. Empty or absent selects the fallbacks.
    pub google_api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent Google requests
    pub max_concurrent: usize,
}

/// Build the geocoding and routing backends for the given settings.
pub fn select_providers(settings: &ProviderSettings) -> Result<(Geocoding, Routing), RoutingError> {
    let key = settings
        .google_api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    match key {
        Some(key) => {
            let client = GoogleClient::new(
                GoogleConfig::new(key)
                    .with_timeout(settings.timeout_secs)
                    .with_max_concurrent(settings.max_concurrent),
            )?;
            Ok((
                Geocoding::Google(client.clone()),
                Routing::Google(client),
            ))
        }
        None => {
            let nominatim = NominatimClient::new(
                NominatimConfig::default().with_timeout(settings.timeout_secs),
            )?;
            Ok((
                Geocoding::Nominatim(nominatim),
                Routing::StraightLine(StraightLineRouter),
            ))
        }
    }
}

impl Geocoding {
    pub fn name(&self) -> &'static str {
        match self {
            Geocoding::Google(_) => "google",
            Geocoding::Nominatim(_) => "nominatim",
        }
    }
}

impl Routing {
    pub fn name(&self) -> &'static str {
        match self {
            Routing::Google(_) => "google",
            Routing::StraightLine(_) => "straight-line",
        }
    }
}

impl Geocoder for Geocoding {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        match self {
            Geocoding::Google(client) => client.geocode(address).await,
            Geocoding::Nominatim(client) => client.geocode(address).await,
        }
    }
}

impl RouteProvider for Routing {
    async fn base_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<BaseRoute, RoutingError> {
        match self {
            Routing::Google(client) => client.base_route(origin, destination).await,
            Routing::StraightLine(router) => router.base_route(origin, destination).await,
        }
    }

    async fn route_with_stop(
        &self,
        origin: GeoPoint,
        stop: GeoPoint,
        destination: GeoPoint,
    ) -> Result<StopRoute, RoutingError> {
        match self {
            Routing::Google(client) => client.route_with_stop(origin, stop, destination).await,
            Routing::StraightLine(router) => {
                router.route_with_stop(origin, stop, destination).await
            }
        }
    }
}
