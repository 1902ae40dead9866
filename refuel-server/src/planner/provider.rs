//! Provider seams used by the planner.
//!
//! These abstractions allow the pipeline to be tested with mock providers
//! and to run against either the network clients or the offline fallbacks.

use std::future::Future;

use crate::domain::{BaseRoute, GeoPoint, StopRoute};
use crate::routing::RoutingError;

/// Trait for turning free-text addresses into coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve an address to its single best match.
    ///
    /// The address is already formatted and non-empty.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeoPoint, RoutingError>> + Send;
}

/// Trait for computing driving routes.
pub trait RouteProvider: Send + Sync {
    /// Route from `origin` to `destination` with no stop.
    fn base_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Result<BaseRoute, RoutingError>> + Send;

    /// Route from `origin` to `destination` through `stop`.
    fn route_with_stop(
        &self,
        origin: GeoPoint,
        stop: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Result<StopRoute, RoutingError>> + Send;
}
