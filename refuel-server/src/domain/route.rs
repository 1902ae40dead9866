//! Route summaries returned by routing providers.

use serde::Serialize;

use super::GeoPoint;

/// The route from origin to destination without any stop.
///
/// Computed once per search and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseRoute {
    pub distance_km: f64,
    pub duration_sec: f64,
    /// Google encoded polyline of the path (may be empty).
    pub encoded_path: String,
    /// Decoded path, origin first.
    pub points: Vec<GeoPoint>,
}

/// Distances of a route that visits one intermediate stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRoute {
    /// Length of the first leg, origin -> stop.
    pub distance_to_stop_km: f64,
    /// Length of the whole route, origin -> stop -> destination.
    pub distance_with_stop_km: f64,
}
