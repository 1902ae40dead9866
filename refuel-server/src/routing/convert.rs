//! Conversion from provider DTOs to domain types.

use crate::domain::{BaseRoute, GeoPoint, StopRoute};
use crate::geometry::decode_polyline;

use super::error::RoutingError;
use super::types::{ComputeRoutesResponse, GeocodeResponse, NominatimPlace};

/// Parse a provider duration such as `"4380s"` into seconds.
///
/// Anything that is not a finite number followed by `s` counts as zero.
pub fn parse_duration_seconds(duration: Option<&str>) -> f64 {
    duration
        .and_then(|d| d.trim().strip_suffix('s'))
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Convert the first route of a no-stop response into a base route.
///
/// A missing polyline yields the two-point path `[origin, destination]`.
pub fn convert_base_route(
    response: ComputeRoutesResponse,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<BaseRoute, RoutingError> {
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    let encoded_path = route
        .polyline
        .and_then(|p| p.encoded_polyline)
        .unwrap_or_default();

    let points = if encoded_path.is_empty() {
        vec![origin, destination]
    } else {
        decode_polyline(&encoded_path)?
    };

    Ok(BaseRoute {
        distance_km: route.distance_meters.unwrap_or(0.0) / 1000.0,
        duration_sec: parse_duration_seconds(route.duration.as_deref()),
        encoded_path,
        points,
    })
}

/// Convert the first route of a one-stop response.
///
/// The first leg ends at the stop; the route total includes both legs.
pub fn convert_stop_route(response: ComputeRoutesResponse) -> Result<StopRoute, RoutingError> {
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    let distance_to_stop_km = route
        .legs
        .first()
        .and_then(|leg| leg.distance_meters)
        .unwrap_or(0.0)
        / 1000.0;

    Ok(StopRoute {
        distance_to_stop_km,
        distance_with_stop_km: route.distance_meters.unwrap_or(0.0) / 1000.0,
    })
}

/// Take the first Google geocoding hit.
///
/// The Geocoding API reports key and quota problems in the body `status`
/// with HTTP 200, so those are mapped here.
pub fn convert_geocode(response: GeocodeResponse, address: &str) -> Result<GeoPoint, RoutingError> {
    match response.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some("REQUEST_DENIED") => return Err(RoutingError::Unauthorized),
        Some("OVER_QUERY_LIMIT") | Some("OVER_DAILY_LIMIT") => {
            return Err(RoutingError::RateLimited);
        }
        Some(other) => {
            return Err(RoutingError::Api {
                status: 200,
                message: response
                    .error_message
                    .unwrap_or_else(|| other.to_string()),
            });
        }
    }

    response
        .results
        .first()
        .map(|r| GeoPoint::new(r.geometry.location.lat, r.geometry.location.lng))
        .ok_or_else(|| RoutingError::NoMatch(address.to_string()))
}

/// Take the first Nominatim hit, parsing its string coordinates.
pub fn convert_nominatim(places: &[NominatimPlace], address: &str) -> Result<GeoPoint, RoutingError> {
    let place = places
        .first()
        .ok_or_else(|| RoutingError::NoMatch(address.to_string()))?;

    let lat = place.lat.trim().parse::<f64>();
    let lng = place.lon.trim().parse::<f64>();
    match (lat, lng) {
        (Ok(lat), Ok(lng)) => {
            GeoPoint::try_new(lat, lng).map_err(|_| RoutingError::NoMatch(address.to_string()))
        }
        _ => Err(RoutingError::Json {
            message: format!("invalid coordinates '{}', '{}'", place.lat, place.lon),
            body: None,
        }),
    }
}
