//! Fuel station records and the per-search route annotation.

use serde::{Deserialize, Serialize};

use super::{FuelPrices, FuelSelection, GeoPoint};

/// Substrings of the opening-hours text that mark a station as closed.
/// Matched case-insensitively ("cerrada", "cerrado", "clausurada", ...).
const CLOSED_MARKERS: [&str; 2] = ["cerrad", "clausur"];

/// Detour figures for a candidate stop, relative to the base route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Driving distance from the origin to the stop.
    pub distance_to_stop_km: f64,
    /// Total driving distance origin -> stop -> destination.
    pub distance_with_stop_km: f64,
    /// Extra distance over the base route, never negative.
    pub extra_km: f64,
    /// Fuel burnt on the extra distance.
    pub extra_liters: f64,
    /// Cost of the extra fuel at the station's price.
    pub extra_cost: f64,
}

/// A fuel station from the price dataset.
///
/// `distance_km` and `route_info` are computed fields. In route mode
/// `distance_km` holds the detour distance (`route_info.extra_km`). Both
/// are rewritten on every search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: String,
    /// Brand or sign text ("rótulo"), free-form.
    pub brand: String,
    pub location: GeoPoint,
    pub prices: FuelPrices,
    /// Free-form opening hours, e.g. "L-D: 24H". Empty means unknown.
    #[serde(default)]
    pub opening_hours: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub route_info: Option<RouteInfo>,
}

impl FuelStation {
    /// Creates a station with only the fields the planner needs.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        location: GeoPoint,
        prices: FuelPrices,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            location,
            prices,
            opening_hours: String::new(),
            address: String::new(),
            locality: String::new(),
            province: String::new(),
            distance_km: None,
            route_info: None,
        }
    }

    /// Sets the opening hours text.
    pub fn with_opening_hours(mut self, hours: impl Into<String>) -> Self {
        self.opening_hours = hours.into();
        self
    }

    /// Relevant per-litre price for a fuel selection.
    pub fn price_for(&self, selection: FuelSelection) -> Option<f64> {
        self.prices.for_selection(selection)
    }

    /// Rough open check: the hours text must not say the station is closed.
    /// Unknown hours count as open.
    pub fn appears_open(&self) -> bool {
        let hours = self.opening_hours.to_lowercase();
        !CLOSED_MARKERS.iter().any(|marker| hours.contains(marker))
    }

    /// Records the outcome of route enrichment on this record.
    pub fn annotate(&mut self, info: RouteInfo) {
        self.distance_km = Some(info.extra_km);
        self.route_info = Some(info);
    }

    /// Drops any annotation left by a previous search.
    pub fn clear_annotation(&mut self) {
        self.distance_km = None;
        self.route_info = None;
    }
}
