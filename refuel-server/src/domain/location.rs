//! Trip endpoints: literal coordinates or free-text postal addresses.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A postal address as entered by the user.
///
/// All parts are optional; empty strings are treated the same as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    pub province: String,
}

impl Address {
    /// Creates an address with only a city.
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    /// Joins the non-empty parts with `", "` in street, number, city,
    /// province order.
    ///
    /// # Examples
    ///
    /// ```
    /// use refuel_server::domain::Address;
    ///
    /// let address = Address {
    ///     street: "Gran Via".into(),
    ///     number: "".into(),
    ///     city: "Madrid".into(),
    ///     province: "Madrid".into(),
    /// };
    /// assert_eq!(address.formatted(), "Gran Via, Madrid, Madrid");
    /// ```
    pub fn formatted(&self) -> String {
        [&self.street, &self.number, &self.city, &self.province]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when no part carries any text.
    pub fn is_blank(&self) -> bool {
        self.formatted().is_empty()
    }
}

/// Where a trip starts or ends.
///
/// Coordinates are used as given; addresses are geocoded before routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Coordinates(GeoPoint),
    Address(Address),
}

impl Location {
    /// Builds a location from the legacy flat representation, where a zero
    /// latitude or longitude meant "coordinates not set, use the address".
    ///
    /// # Examples
    ///
    /// ```
    /// use refuel_server::domain::{Address, GeoPoint, Location};
    ///
    /// let set = Location::from_legacy(40.4, -3.7, Address::default());
    /// assert_eq!(set, Location::Coordinates(GeoPoint::new(40.4, -3.7)));
    ///
    /// let unset = Location::from_legacy(0.0, 0.0, Address::city("Toledo"));
    /// assert_eq!(unset, Location::Address(Address::city("Toledo")));
    /// ```
    pub fn from_legacy(lat: f64, lng: f64, address: Address) -> Self {
        let usable = lat.is_finite() && lng.is_finite() && lat != 0.0 && lng != 0.0;
        if usable {
            Location::Coordinates(GeoPoint::new(lat, lng))
        } else {
            Location::Address(address)
        }
    }

    /// The literal coordinates, if this location carries them.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match self {
            Location::Coordinates(point) => Some(*point),
            Location::Address(_) => None,
        }
    }
}

impl From<GeoPoint> for Location {
    fn from(point: GeoPoint) -> Self {
        Location::Coordinates(point)
    }
}

impl From<Address> for Location {
    fn from(address: Address) -> Self {
        Location::Address(address)
    }
}
