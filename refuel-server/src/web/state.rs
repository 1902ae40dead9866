//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::domain::BrandMatcher;
use crate::planner::PlannerConfig;
use crate::routing::{Geocoding, Routing};
use crate::stations::StationDataset;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Geocoder with result caching
    pub geocoder: Arc<CachedGeocoder<Geocoding>>,

    /// Route provider
    pub router: Arc<Routing>,

    /// Brand to company matching for the company filter
    pub companies: BrandMatcher,

    /// Planner tunables
    pub config: Arc<PlannerConfig>,

    /// Fuel station dataset
    pub stations: StationDataset,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        geocoder: CachedGeocoder<Geocoding>,
        router: Routing,
        config: PlannerConfig,
        stations: StationDataset,
    ) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            router: Arc::new(router),
            companies: BrandMatcher,
            config: Arc::new(config),
            stations,
        }
    }
}
