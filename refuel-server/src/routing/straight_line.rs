//! Offline router using great-circle distances.

use crate::domain::{BaseRoute, GeoPoint, StopRoute};
use crate::geometry::{encode_polyline, haversine_km};
use crate::planner::RouteProvider;

use super::error::RoutingError;

/// Router used when no routing provider is configured.
///
/// Base routes are the straight line between the endpoints with zero
/// duration. Routes through a stop are the sum of the two legs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouter;

impl StraightLineRouter {
    pub fn base(origin: GeoPoint, destination: GeoPoint) -> BaseRoute {
        let points = vec![origin, destination];
        BaseRoute {
            distance_km: haversine_km(origin, destination),
            duration_sec: 0.0,
            encoded_path: encode_polyline(&points),
            points,
        }
    }

    pub fn with_stop(origin: GeoPoint, stop: GeoPoint, destination: GeoPoint) -> StopRoute {
        let to_stop = haversine_km(origin, stop);
        StopRoute {
            distance_to_stop_km: to_stop,
            distance_with_stop_km: to_stop + haversine_km(stop, destination),
        }
    }
}

impl RouteProvider for StraightLineRouter {
    async fn base_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<BaseRoute, RoutingError> {
        Ok(Self::base(origin, destination))
    }

    async fn route_with_stop(
        &self,
        origin: GeoPoint,
        stop: GeoPoint,
        destination: GeoPoint,
    ) -> Result<StopRoute, RoutingError> {
        Ok(Self::with_stop(origin, stop, destination))
    }
}
