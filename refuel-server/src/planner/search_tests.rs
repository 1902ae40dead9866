//! Unit tests for the route corridor search.

use super::*;
use crate::domain::{
    Address, BrandMatcher, FuelKind, FuelPrices, FuelSelection, SortBy, StopRoute,
};
use crate::geometry::EARTH_RADIUS_KM;
use crate::routing::StraightLineRouter;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Longitude offset along the equator covering `km`.
fn km_to_deg(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

fn origin() -> GeoPoint {
    GeoPoint::new(0.0, 0.0)
}

fn destination() -> GeoPoint {
    GeoPoint::new(0.0, km_to_deg(120.0))
}

/// Station on the origin-destination line, `km` from the origin.
fn on_line(id: &str, km: f64, price: f64) -> FuelStation {
    FuelStation::new(
        id,
        "REPSOL",
        GeoPoint::new(0.0, km_to_deg(km)),
        FuelPrices::default().with(FuelKind::Gasoline95E5, price),
    )
}

fn request(range_km: f64, radius_km: f64) -> PlanRequest {
    PlanRequest {
        origin: Location::Coordinates(origin()),
        destination: Location::Coordinates(destination()),
        filters: FilterSettings {
            max_distance_km: radius_km,
            ..FilterSettings::default()
        },
        vehicle: VehicleState::new(range_km),
    }
}

fn ids(stations: &[FuelStation]) -> Vec<&str> {
    stations.iter().map(|s| s.id.as_str()).collect()
}

/// Mock geocoder for testing.
struct MockGeocoder {
    places: HashMap<String, GeoPoint>,
    call_count: Mutex<usize>,
}

impl MockGeocoder {
    fn new() -> Self {
        Self {
            places: HashMap::new(),
            call_count: Mutex::new(0),
        }
    }

    fn add_place(&mut self, address: &str, point: GeoPoint) {
        self.places.insert(address.to_string(), point);
    }

    fn api_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RoutingError> {
        *self.call_count.lock().unwrap() += 1;
        self.places
            .get(address)
            .copied()
            .ok_or_else(|| RoutingError::NoMatch(address.to_string()))
    }
}

/// Mock router with straight-line distances and injectable failures.
struct MockRouter {
    failing_stops: Vec<GeoPoint>,
    slow_stops: Vec<GeoPoint>,
    stop_delay: Duration,
    base_delay: Option<Duration>,
    base_calls: Mutex<usize>,
    stop_calls: Mutex<Vec<GeoPoint>>,
}

impl MockRouter {
    fn new() -> Self {
        Self {
            failing_stops: Vec::new(),
            slow_stops: Vec::new(),
            stop_delay: Duration::ZERO,
            base_delay: None,
            base_calls: Mutex::new(0),
            stop_calls: Mutex::new(Vec::new()),
        }
    }

    fn fail_at(mut self, stop: GeoPoint) -> Self {
        self.failing_stops.push(stop);
        self
    }

    fn slow_at(mut self, stop: GeoPoint, delay: Duration) -> Self {
        self.slow_stops.push(stop);
        self.stop_delay = delay;
        self
    }

    fn slow_base(mut self, delay: Duration) -> Self {
        self.base_delay = Some(delay);
        self
    }

    fn base_call_count(&self) -> usize {
        *self.base_calls.lock().unwrap()
    }

    fn stops_requested(&self) -> Vec<GeoPoint> {
        self.stop_calls.lock().unwrap().clone()
    }
}

impl RouteProvider for MockRouter {
    async fn base_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<BaseRoute, RoutingError> {
        *self.base_calls.lock().unwrap() += 1;
        if let Some(delay) = self.base_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(StraightLineRouter::base(origin, destination))
    }

    async fn route_with_stop(
        &self,
        origin: GeoPoint,
        stop: GeoPoint,
        destination: GeoPoint,
    ) -> Result<StopRoute, RoutingError> {
        self.stop_calls.lock().unwrap().push(stop);
        if self.slow_stops.contains(&stop) {
            tokio::time::sleep(self.stop_delay).await;
        }
        if self.failing_stops.contains(&stop) {
            return Err(RoutingError::Api {
                status: 500,
                message: "backend error".to_string(),
            });
        }
        Ok(StraightLineRouter::with_stop(origin, stop, destination))
    }
}

#[tokio::test]
async fn stations_on_the_line_all_feasible() {
    let stations = vec![
        on_line("km30", 30.0, 1.62),
        on_line("km60", 60.0, 1.58),
        on_line("km90", 90.0, 1.60),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    // 120 km range leaves 105 km usable, enough to reach the 90 km station
    let outcome = planner.plan(&request(120.0, 5.0), &stations).await.unwrap();

    assert_eq!(outcome.shortlist.len(), 3);
    for station in &outcome.shortlist {
        let info = station.route_info.unwrap();
        assert!(info.extra_km < 1e-6, "extra {}", info.extra_km);
        assert_eq!(station.distance_km, Some(info.extra_km));
    }
    for pair in outcome.shortlist.windows(2) {
        let a = pair[0].route_info.unwrap().extra_km;
        let b = pair[1].route_info.unwrap().extra_km;
        assert!(a <= b);
    }
    assert!((outcome.base_route.distance_km - 120.0).abs() < 1e-6);
    assert_eq!(outcome.stats.feasible, 3);
    assert_eq!(geocoder.api_call_count(), 0);
}

#[tokio::test]
async fn station_beyond_usable_range_excluded() {
    let stations = vec![
        on_line("km30", 30.0, 1.62),
        on_line("km60", 60.0, 1.58),
        on_line("km90", 90.0, 1.60),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    // 100 km range leaves 85 km usable; the 90 km station is out of reach
    let outcome = planner.plan(&request(100.0, 5.0), &stations).await.unwrap();

    let mut found = ids(&outcome.shortlist);
    found.sort_unstable();
    assert_eq!(found, vec!["km30", "km60"]);
    assert_eq!(outcome.stats.infeasible, 1);
    assert_eq!(outcome.stats.failed, 0);
    assert!(outcome.annotations.iter().all(|a| a.index != 2));
}

#[tokio::test]
async fn off_route_station_never_enriched() {
    let off_route = FuelStation::new(
        "off",
        "REPSOL",
        GeoPoint::new(km_to_deg(50.0), km_to_deg(60.0)),
        FuelPrices::default().with(FuelKind::Gasoline95E5, 1.10),
    );
    let stations = vec![
        on_line("km30", 30.0, 1.62),
        off_route.clone(),
        on_line("km60", 60.0, 1.58),
        on_line("km90", 90.0, 1.60),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(120.0, 5.0), &stations).await.unwrap();

    assert_eq!(outcome.stats.attribute_matches, 4);
    assert_eq!(outcome.stats.corridor_matches, 3);
    assert!(!ids(&outcome.shortlist).contains(&"off"));
    assert!(!router.stops_requested().contains(&off_route.location));
    assert_eq!(router.stops_requested().len(), 3);
}

#[tokio::test]
async fn insufficient_range_fails_before_provider_calls() {
    let stations = vec![on_line("km30", 30.0, 1.62)];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(10.0, 5.0);
    req.origin = Location::Address(Address::city("Madrid"));

    let err = planner.plan(&req, &stations).await.unwrap_err();

    match err {
        PlanError::InsufficientRange { usable_km } => assert_eq!(usable_km, -5.0),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(geocoder.api_call_count(), 0);
    assert_eq!(router.base_call_count(), 0);
}

#[tokio::test]
async fn any_fuel_uses_cheapest_price_against_cap() {
    let lpg_only = |price: f64| {
        FuelStation::new(
            "glp",
            "GALP",
            GeoPoint::new(0.0, km_to_deg(40.0)),
            FuelPrices::default().with(FuelKind::Lpg, price),
        )
    };
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(300.0, 5.0);
    req.filters.fuel = FuelSelection::Any;
    req.filters.max_price = 1.50;

    let cheap = [lpg_only(1.40)];
    let outcome = planner.plan(&req, &cheap).await.unwrap();
    assert_eq!(ids(&outcome.shortlist), vec!["glp"]);

    let pricey = [lpg_only(1.60)];
    let outcome = planner.plan(&req, &pricey).await.unwrap();
    assert!(outcome.shortlist.is_empty());
    assert_eq!(outcome.stats.attribute_matches, 0);
}

#[tokio::test]
async fn single_candidate_failure_is_isolated() {
    let stations = vec![
        on_line("km30", 30.0, 1.62),
        on_line("km60", 60.0, 1.58),
        on_line("km90", 90.0, 1.60),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new().fail_at(stations[1].location);
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(300.0, 5.0), &stations).await.unwrap();

    let mut found = ids(&outcome.shortlist);
    found.sort_unstable();
    assert_eq!(found, vec!["km30", "km90"]);
    assert_eq!(outcome.stats.failed, 1);
    assert_eq!(outcome.stats.feasible, 2);
}

#[tokio::test]
async fn all_candidates_failing_is_an_error() {
    let stations = vec![on_line("km30", 30.0, 1.62), on_line("km60", 60.0, 1.58)];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new()
        .fail_at(stations[0].location)
        .fail_at(stations[1].location);
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let err = planner.plan(&request(300.0, 5.0), &stations).await.unwrap_err();
    assert!(matches!(err, PlanError::AllCandidatesFailed { attempted: 2 }));
}

#[tokio::test]
async fn no_candidates_is_an_empty_result() {
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(300.0, 5.0), &[]).await.unwrap();
    assert!(outcome.shortlist.is_empty());
    assert_eq!(outcome.stats, PlanStats {
        candidate_limit: 24,
        ..PlanStats::default()
    });
}

#[tokio::test]
async fn slow_candidate_times_out_alone() {
    let stations = vec![
        on_line("km30", 30.0, 1.62),
        on_line("km60", 60.0, 1.58),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new().slow_at(stations[0].location, Duration::from_millis(500));
    let config = PlannerConfig::default().with_call_timeout(Duration::from_millis(50));
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(300.0, 5.0), &stations).await.unwrap();

    assert_eq!(ids(&outcome.shortlist), vec!["km60"]);
    assert_eq!(outcome.stats.failed, 1);
}

#[tokio::test]
async fn slow_base_route_hits_pipeline_deadline() {
    let stations = vec![on_line("km30", 30.0, 1.62)];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new().slow_base(Duration::from_millis(500));
    let config = PlannerConfig::default().with_pipeline_timeout(Duration::from_millis(50));
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let err = planner.plan(&request(300.0, 5.0), &stations).await.unwrap_err();
    assert!(matches!(err, PlanError::Timeout));
    assert!(router.stops_requested().is_empty());
}

#[tokio::test]
async fn addresses_are_geocoded() {
    let stations = vec![on_line("km30", 30.0, 1.62)];
    let mut geocoder = MockGeocoder::new();
    geocoder.add_place("Gran Via, 1, Madrid", origin());
    geocoder.add_place("Toledo", destination());
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(300.0, 5.0);
    req.origin = Location::Address(Address {
        street: "Gran Via".into(),
        number: "1".into(),
        city: "Madrid".into(),
        province: String::new(),
    });
    req.destination = Location::Address(Address::city("Toledo"));

    let outcome = planner.plan(&req, &stations).await.unwrap();

    assert_eq!(geocoder.api_call_count(), 2);
    assert_eq!(ids(&outcome.shortlist), vec!["km30"]);
}

#[tokio::test]
async fn unknown_address_is_geocode_error() {
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(300.0, 5.0);
    req.destination = Location::Address(Address::city("Atlantis"));

    let err = planner.plan(&req, &[]).await.unwrap_err();
    assert!(matches!(err, PlanError::Geocode(_)));
    assert_eq!(router.base_call_count(), 0);
}

#[tokio::test]
async fn blank_address_rejected_before_geocoding() {
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(300.0, 5.0);
    req.origin = Location::Address(Address::default());

    let err = planner.plan(&req, &[]).await.unwrap_err();
    assert!(matches!(err, PlanError::InvalidAddress(Endpoint::Origin)));
    assert_eq!(geocoder.api_call_count(), 0);
}

#[tokio::test]
async fn enrichment_bounded_by_candidate_limit() {
    // 30 stations spread along the first 80 km; 120 km base -> 24 candidates
    let stations: Vec<FuelStation> = (0..30)
        .map(|i| on_line(&format!("s{i}"), 5.0 + i as f64 * 2.5, 1.50 + i as f64 * 0.01))
        .collect();
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(300.0, 5.0), &stations).await.unwrap();

    assert_eq!(outcome.stats.corridor_matches, 30);
    assert_eq!(outcome.stats.candidate_limit, 24);
    assert_eq!(outcome.stats.enriched, 24);
    assert_eq!(router.stops_requested().len(), 24);
    assert_eq!(outcome.shortlist.len(), 3);
}

#[tokio::test]
async fn price_sort_prefers_cheapest() {
    let stations = vec![
        on_line("a", 30.0, 1.62),
        on_line("b", 60.0, 1.48),
        on_line("c", 90.0, 1.55),
        on_line("d", 100.0, 1.70),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let mut req = request(300.0, 5.0);
    req.filters.sort_by = SortBy::Price;

    let outcome = planner.plan(&req, &stations).await.unwrap();
    assert_eq!(ids(&outcome.shortlist), vec!["b", "c", "a"]);
}

#[tokio::test]
async fn apply_to_replaces_stale_annotations() {
    let mut stations = vec![
        on_line("km30", 30.0, 1.62),
        on_line("km60", 60.0, 1.58),
        on_line("km90", 90.0, 1.60),
    ];
    let geocoder = MockGeocoder::new();
    let router = MockRouter::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&geocoder, &router, &BrandMatcher, &config);

    let outcome = planner.plan(&request(100.0, 5.0), &stations).await.unwrap();

    // Stale value from an earlier search
    stations[2].distance_km = Some(42.0);
    outcome.apply_to(&mut stations);

    assert!(stations[0].route_info.is_some());
    assert!(stations[1].route_info.is_some());
    assert_eq!(stations[2].route_info, None);
    assert_eq!(stations[2].distance_km, None);
}
