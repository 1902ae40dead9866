//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Address, BaseRoute, DomainError, FilterSettings, FuelStation, GeoPoint, Location,
    VehicleState,
};
use crate::planner::{PlanOutcome, PlanRequest, PlanStats};

/// A trip endpoint as sent by clients.
///
/// Either `coordinates`, or the legacy flat form where `lat`/`lng` of zero
/// mean "not set" and the `address` is geocoded instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationDto {
    pub coordinates: Option<GeoPoint>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<Address>,
}

impl LocationDto {
    /// Convert to a domain location, rejecting out-of-range coordinates.
    pub fn into_location(self) -> Result<Location, DomainError> {
        if let Some(point) = self.coordinates {
            return GeoPoint::try_new(point.lat, point.lng).map(Location::Coordinates);
        }

        let location = Location::from_legacy(
            self.lat.unwrap_or(0.0),
            self.lng.unwrap_or(0.0),
            self.address.unwrap_or_default(),
        );
        if let Location::Coordinates(point) = &location {
            GeoPoint::try_new(point.lat, point.lng)?;
        }
        Ok(location)
    }
}

/// Request to plan refuelling stops.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    pub origin: LocationDto,

    pub destination: LocationDto,

    /// Search filters (defaults apply to missing fields)
    #[serde(default)]
    pub filters: FilterSettings,

    /// Distance the vehicle can still drive, in km
    pub available_range_km: f64,
}

impl PlanRouteRequest {
    /// Convert to a planner request.
    pub fn into_plan_request(self) -> Result<PlanRequest, DomainError> {
        Ok(PlanRequest {
            origin: self.origin.into_location()?,
            destination: self.destination.into_location()?,
            filters: self.filters,
            vehicle: VehicleState::new(self.available_range_km),
        })
    }
}

/// The route without a stop.
#[derive(Debug, Serialize)]
pub struct BaseRouteResult {
    pub distance_km: f64,
    pub duration_sec: f64,
    pub points: Vec<GeoPoint>,
}

impl BaseRouteResult {
    pub fn from_route(route: &BaseRoute) -> Self {
        Self {
            distance_km: route.distance_km,
            duration_sec: route.duration_sec,
            points: route.points.clone(),
        }
    }
}

/// Response for a route plan.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub base_route: BaseRouteResult,

    /// Recommended stations, best first, each with its `route_info`
    pub stops: Vec<FuelStation>,

    pub stats: PlanStats,
}

impl PlanRouteResponse {
    pub fn from_outcome(outcome: PlanOutcome) -> Self {
        Self {
            base_route: BaseRouteResult::from_route(&outcome.base_route),
            stops: outcome.shortlist,
            stats: outcome.stats,
        }
    }
}

/// Response listing the brands in the dataset.
#[derive(Debug, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
