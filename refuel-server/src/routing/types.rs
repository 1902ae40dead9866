//! Provider request and response DTOs.
//!
//! These types map directly to the Google Routes, Google Geocoding and
//! Nominatim JSON APIs. Response fields are `Option` because the providers
//! omit fields that are not in the field mask or have no value.

use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;

/// Body of a Routes API `computeRoutes` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intermediates: Vec<Waypoint>,
    pub travel_mode: &'static str,
    pub routing_preference: &'static str,
    pub compute_alternative_routes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_modifiers: Option<RouteModifiers>,
    pub language_code: &'static str,
    pub units: &'static str,
}

impl ComputeRoutesRequest {
    /// Driving request without traffic or alternates.
    pub fn driving(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin: Waypoint::at(origin),
            destination: Waypoint::at(destination),
            intermediates: Vec::new(),
            travel_mode: "DRIVE",
            routing_preference: "TRAFFIC_UNAWARE",
            compute_alternative_routes: false,
            route_modifiers: None,
            language_code: "es-ES",
            units: "METRIC",
        }
    }

    /// Adds an intermediate stop.
    pub fn via(mut self, stop: GeoPoint) -> Self {
        self.intermediates.push(Waypoint::at(stop));
        self
    }

    /// Allows tolls, highways and ferries explicitly.
    pub fn unrestricted(mut self) -> Self {
        self.route_modifiers = Some(RouteModifiers::default());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Waypoint {
    pub location: WaypointLocation,
}

impl Waypoint {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            location: WaypointLocation {
                lat_lng: LatLng {
                    latitude: point.lat,
                    longitude: point.lng,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointLocation {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteModifiers {
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub avoid_ferries: bool,
}

/// Response from `computeRoutes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputeRoutesResponse {
    /// Routes, best first. Absent when no route exists.
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    /// Total distance in metres.
    pub distance_meters: Option<f64>,

    /// Duration as a number of seconds with an `s` suffix, e.g. `"3600s"`.
    pub duration: Option<String>,

    pub polyline: Option<PolylineDto>,

    #[serde(default)]
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineDto {
    pub encoded_polyline: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub distance_meters: Option<f64>,
}

/// Response from the Google Geocoding API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...
    pub status: Option<String>,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeGeometry {
    pub location: GeocodeLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeLocation {
    pub lat: f64,
    pub lng: f64,
}

/// One Nominatim search hit. Coordinates arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}
