//! Attribute and corridor filtering.
//!
//! The attribute filter is cheap and runs first so the geometric test only
//! sees stations that could be returned anyway.

use crate::domain::{CompanyMatcher, CompanyMode, FilterSettings, FuelStation, GeoPoint};
use crate::geometry::point_to_polyline_km;

/// A station under consideration, paired with its distance to the route.
///
/// The station itself is borrowed from the dataset and never mutated while
/// the search runs.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position of the station in the dataset slice.
    pub index: usize,
    pub station: &'a FuelStation,
    /// Minimum distance from the station to the sampled route path (km).
    pub route_distance_km: f64,
    /// Per-litre price for the selected fuel.
    pub price: Option<f64>,
}

/// True when a station satisfies the fuel, price, company and hours filters.
pub fn passes_attributes(
    station: &FuelStation,
    filters: &FilterSettings,
    companies: &dyn CompanyMatcher,
) -> bool {
    // `Any` resolves to the cheapest fuel sold, so the cap applies to that
    match station.price_for(filters.fuel) {
        Some(price) if filters.price_allowed(price) => {}
        _ => return false,
    }

    if !filters.companies.is_empty() {
        let belongs = filters
            .companies
            .iter()
            .any(|company| companies.belongs_to_company(&station.brand, company));
        let keep = match filters.company_mode {
            CompanyMode::Include => belongs,
            CompanyMode::Exclude => !belongs,
        };
        if !keep {
            return false;
        }
    }

    !filters.only_open || station.appears_open()
}

/// Stations passing [`passes_attributes`], with their dataset positions.
pub fn attribute_filter<'a>(
    stations: &'a [FuelStation],
    filters: &FilterSettings,
    companies: &dyn CompanyMatcher,
) -> Vec<(usize, &'a FuelStation)> {
    stations
        .iter()
        .enumerate()
        .filter(|(_, station)| passes_attributes(station, filters, companies))
        .collect()
}

/// Keep stations within `radius_km` of the sampled route path.
///
/// Paths with fewer than two points have no segments, so nothing is kept.
pub fn corridor_filter<'a>(
    stations: &[(usize, &'a FuelStation)],
    sampled_path: &[GeoPoint],
    radius_km: f64,
    filters: &FilterSettings,
) -> Vec<Candidate<'a>> {
    if sampled_path.len() < 2 {
        return Vec::new();
    }

    stations
        .iter()
        .filter_map(|&(index, station)| {
            let route_distance_km = point_to_polyline_km(station.location, sampled_path);
            (route_distance_km <= radius_km).then(|| Candidate {
                index,
                station,
                route_distance_km,
                price: station.price_for(filters.fuel),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrandMatcher, FuelKind, FuelPrices, FuelSelection};

    fn station(id: &str, brand: &str, lat: f64, lng: f64, prices: FuelPrices) -> FuelStation {
        FuelStation::new(id, brand, GeoPoint::new(lat, lng), prices)
    }

    fn petrol(price: f64) -> FuelPrices {
        FuelPrices::default().with(FuelKind::Gasoline95E5, price)
    }

    #[test]
    fn requires_price_for_selected_fuel() {
        let filters = FilterSettings::default();
        let diesel_only = station("1", "X", 0.0, 0.0, FuelPrices::default().with(FuelKind::DieselA, 1.4));
        let zero_price = station("2", "X", 0.0, 0.0, petrol(0.0));

        assert!(!passes_attributes(&diesel_only, &filters, &BrandMatcher));
        assert!(!passes_attributes(&zero_price, &filters, &BrandMatcher));
        assert!(passes_attributes(&station("3", "X", 0.0, 0.0, petrol(1.6)), &filters, &BrandMatcher));
    }

    #[test]
    fn max_price_cap() {
        let filters = FilterSettings {
            max_price: 1.5,
            ..FilterSettings::default()
        };
        assert!(passes_attributes(&station("1", "X", 0.0, 0.0, petrol(1.5)), &filters, &BrandMatcher));
        assert!(!passes_attributes(&station("2", "X", 0.0, 0.0, petrol(1.51)), &filters, &BrandMatcher));
    }

    #[test]
    fn any_fuel_caps_on_cheapest() {
        let filters = FilterSettings {
            fuel: FuelSelection::Any,
            max_price: 1.5,
            ..FilterSettings::default()
        };
        let mixed = FuelPrices::default()
            .with(FuelKind::Gasoline98E5, 1.9)
            .with(FuelKind::Lpg, 0.9);
        let nothing = FuelPrices::default().with(FuelKind::DieselA, 0.0);

        assert!(passes_attributes(&station("1", "X", 0.0, 0.0, mixed), &filters, &BrandMatcher));
        assert!(!passes_attributes(&station("2", "X", 0.0, 0.0, nothing), &filters, &BrandMatcher));
    }

    #[test]
    fn company_include_and_exclude() {
        let repsol = station("1", "REPSOL", 0.0, 0.0, petrol(1.6));
        let cepsa = station("2", "CEPSA", 0.0, 0.0, petrol(1.6));

        let include = FilterSettings {
            companies: vec!["Repsol".into()],
            ..FilterSettings::default()
        };
        assert!(passes_attributes(&repsol, &include, &BrandMatcher));
        assert!(!passes_attributes(&cepsa, &include, &BrandMatcher));

        let exclude = FilterSettings {
            company_mode: CompanyMode::Exclude,
            ..include
        };
        assert!(!passes_attributes(&repsol, &exclude, &BrandMatcher));
        assert!(passes_attributes(&cepsa, &exclude, &BrandMatcher));
    }

    #[test]
    fn only_open_uses_hours_text() {
        let filters = FilterSettings {
            only_open: true,
            ..FilterSettings::default()
        };
        let open = station("1", "X", 0.0, 0.0, petrol(1.6)).with_opening_hours("L-D: 24H");
        let closed = station("2", "X", 0.0, 0.0, petrol(1.6)).with_opening_hours("Cerrado");
        let unknown = station("3", "X", 0.0, 0.0, petrol(1.6));

        assert!(passes_attributes(&open, &filters, &BrandMatcher));
        assert!(!passes_attributes(&closed, &filters, &BrandMatcher));
        assert!(passes_attributes(&unknown, &filters, &BrandMatcher));

        // Hours ignored when the flag is off
        assert!(passes_attributes(&closed, &FilterSettings::default(), &BrandMatcher));
    }

    #[test]
    fn corridor_keeps_nearby_with_index() {
        let filters = FilterSettings::default();
        let stations = vec![
            station("near", "X", 0.01, 0.5, petrol(1.6)),
            station("far", "X", 1.0, 0.5, petrol(1.6)),
        ];
        let path = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        let pairs = attribute_filter(&stations, &filters, &BrandMatcher);

        let kept = corridor_filter(&pairs, &path, 5.0, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 0);
        assert_eq!(kept[0].station.id, "near");
        assert!(kept[0].route_distance_km < 1.2);
        assert_eq!(kept[0].price, Some(1.6));
    }

    #[test]
    fn corridor_needs_a_segment() {
        let filters = FilterSettings::default();
        let stations = vec![station("1", "X", 0.0, 0.0, petrol(1.6))];
        let pairs = attribute_filter(&stations, &filters, &BrandMatcher);

        assert!(corridor_filter(&pairs, &[GeoPoint::new(0.0, 0.0)], 50.0, &filters).is_empty());
    }
}
