//! Trip endpoint resolution and base route computation.

use tracing::debug;

use crate::domain::{BaseRoute, GeoPoint, Location};
use crate::routing::RoutingError;

use super::provider::{Geocoder, RouteProvider};
use super::search::PlanError;

/// Which end of the trip a location describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Origin => "origin",
            Endpoint::Destination => "destination",
        }
    }
}

/// Reject an address that formats to nothing.
pub fn validate_location(location: &Location, endpoint: Endpoint) -> Result<(), PlanError> {
    match location {
        Location::Coordinates(_) => Ok(()),
        Location::Address(address) if address.is_blank() => Err(PlanError::InvalidAddress(endpoint)),
        Location::Address(_) => Ok(()),
    }
}

/// Coordinates for a trip endpoint, geocoding addresses.
pub async fn resolve_location<G: Geocoder>(
    geocoder: &G,
    location: &Location,
    endpoint: Endpoint,
) -> Result<GeoPoint, PlanError> {
    let address = match location {
        Location::Coordinates(point) => return Ok(*point),
        Location::Address(address) => address.formatted(),
    };

    if address.is_empty() {
        return Err(PlanError::InvalidAddress(endpoint));
    }

    let point = geocoder
        .geocode(&address)
        .await
        .map_err(geocode_error)?;

    debug!(endpoint = endpoint.as_str(), address = %address, %point, "Resolved endpoint");
    Ok(point)
}

/// Compute the route between the resolved endpoints.
pub async fn base_route<R: RouteProvider>(
    router: &R,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<BaseRoute, PlanError> {
    router
        .base_route(origin, destination)
        .await
        .map_err(route_error)
}

fn geocode_error(e: RoutingError) -> PlanError {
    match e {
        RoutingError::NoMatch(_) | RoutingError::EmptyAddress => PlanError::Geocode(e.to_string()),
        other => PlanError::Provider(other),
    }
}

fn route_error(e: RoutingError) -> PlanError {
    match e {
        RoutingError::NoRoute | RoutingError::Polyline(_) => PlanError::Route(e.to_string()),
        other => PlanError::Provider(other),
    }
}
