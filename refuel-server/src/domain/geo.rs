//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 coordinate in decimal degrees.
///
/// `GeoPoint` is a plain value type. [`GeoPoint::new`] accepts any pair,
/// while [`GeoPoint::try_new`] rejects values outside the valid latitude
/// and longitude ranges, for use at input boundaries.
///
/// # Examples
///
/// ```
/// use refuel_server::domain::GeoPoint;
///
/// let madrid = GeoPoint::try_new(40.4168, -3.7038).unwrap();
/// assert_eq!(madrid.lat, 40.4168);
///
/// assert!(GeoPoint::try_new(91.0, 0.0).is_err());
/// assert!(GeoPoint::try_new(0.0, 181.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point without validation.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(DomainError::InvalidCoordinate { lat, lng });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}
