//! Geometry kernel for route corridors.
//!
//! Distances are in kilometres on a spherical Earth. Point-to-segment
//! distance uses a local equirectangular projection centred on the query
//! point, which is accurate at corridor scale (tens of km) and much cheaper
//! than spherical cross-track formulas.

mod polyline;

pub use polyline::{PolylineError, decode_polyline, encode_polyline};

use crate::domain::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points.
///
/// # Examples
///
/// ```
/// use refuel_server::domain::GeoPoint;
/// use refuel_server::geometry::haversine_km;
///
/// let madrid = GeoPoint::new(40.4168, -3.7038);
/// let toledo = GeoPoint::new(39.8628, -4.0273);
/// let d = haversine_km(madrid, toledo);
/// assert!(d > 65.0 && d < 70.0);
/// ```
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from `p` to the segment `a`-`b`.
///
/// All three points are projected to a plane with
/// `x = lng * cos(lat_p) * R`, `y = lat * R` (radians), and the projection
/// parameter is clamped to the segment. A degenerate segment (`a == b`)
/// falls back to the great-circle distance to `a`.
pub fn point_to_segment_km(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let cos_lat = p.lat.to_radians().cos();
    let project = |q: GeoPoint| {
        (
            q.lng.to_radians() * cos_lat * EARTH_RADIUS_KM,
            q.lat.to_radians() * EARTH_RADIUS_KM,
        )
    };

    let (px, py) = project(p);
    let (ax, ay) = project(a);
    let (bx, by) = project(b);

    let (abx, aby) = (bx - ax, by - ay);
    let ab2 = abx * abx + aby * aby;
    if ab2 == 0.0 {
        return haversine_km(p, a);
    }

    let t = (((px - ax) * abx + (py - ay) * aby) / ab2).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * abx, ay + t * aby);

    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Minimum distance from `p` to any segment of `polyline`.
///
/// Returns `f64::INFINITY` when the polyline has fewer than two points.
pub fn point_to_polyline_km(p: GeoPoint, polyline: &[GeoPoint]) -> f64 {
    polyline
        .windows(2)
        .map(|seg| point_to_segment_km(p, seg[0], seg[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Thins a dense path to roughly one point every `step_km`.
///
/// Walks the cumulative great-circle distance and keeps a point each time
/// the distance accumulated since the last kept point reaches `step_km`.
/// The first and last points are always kept, so the final step may be
/// shorter. Paths of two points or fewer are returned unchanged.
pub fn sample_polyline(points: &[GeoPoint], step_km: f64) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = vec![points[0]];
    let mut last_kept = 0;
    let mut acc = 0.0;

    for i in 1..points.len() {
        acc += haversine_km(points[i - 1], points[i]);
        if acc >= step_km {
            out.push(points[i]);
            last_kept = i;
            acc = 0.0;
        }
    }

    let last = points.len() - 1;
    if last_kept != last {
        out.push(points[last]);
    }
    out
}
