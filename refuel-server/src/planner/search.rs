//! Route corridor search.
//!
//! Finds the best refuelling stops along a drive: resolve the base route,
//! keep the stations inside a corridor around it, pre-rank them cheaply,
//! compute real detours for the best few, and rank the survivors.

use serde::Serialize;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

use crate::domain::{
    BaseRoute, CompanyMatcher, FilterSettings, FuelStation, GeoPoint, Location, RouteInfo,
    VehicleState,
};
use crate::geometry::sample_polyline;
use crate::routing::RoutingError;

use super::config::PlannerConfig;
use super::corridor::{attribute_filter, corridor_filter};
use super::enrich::{EnrichOutcome, Trip, enrich_candidates};
use super::provider::{Geocoder, RouteProvider};
use super::rank::{pre_rank, rank_stations};
use super::resolve::{Endpoint, base_route, resolve_location, validate_location};

/// Error from a route search.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Available range does not cover the fixed reserve
    #[error("insufficient range: {usable_km:.1} km usable after the reserve")]
    InsufficientRange { usable_km: f64 },

    /// Endpoint address is empty
    #[error("invalid {} address", .0.as_str())]
    InvalidAddress(Endpoint),

    /// No geocoding result
    #[error("geocoding failed: {0}")]
    Geocode(String),

    /// No route between the endpoints
    #[error("routing failed: {0}")]
    Route(String),

    /// Provider transport or API failure
    #[error("provider error: {0}")]
    Provider(#[source] RoutingError),

    /// Every enrichment call failed
    #[error("route requests failed for all {attempted} candidates")]
    AllCandidatesFailed { attempted: usize },

    /// Search deadline passed before the base route was known
    #[error("search timed out")]
    Timeout,
}

/// Request for a route search.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub origin: Location,
    pub destination: Location,
    pub filters: FilterSettings,
    pub vehicle: VehicleState,
}

/// Stage counts for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    /// Stations passing the fuel, price, company and hours filters.
    pub attribute_matches: usize,
    /// Of those, stations inside the corridor.
    pub corridor_matches: usize,
    /// Maximum number of candidates enriched.
    pub candidate_limit: usize,
    /// Candidates sent for enrichment.
    pub enriched: usize,
    pub feasible: usize,
    pub infeasible: usize,
    pub failed: usize,
}

/// Route info for one dataset record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopAnnotation {
    /// Position of the station in the searched dataset.
    pub index: usize,
    pub info: RouteInfo,
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub base_route: BaseRoute,

    /// Best stations, ranked, each carrying its route info.
    pub shortlist: Vec<FuelStation>,

    /// Route info for every feasible candidate, in pre-rank order.
    pub annotations: Vec<StopAnnotation>,

    pub stats: PlanStats,
}

impl PlanOutcome {
    /// Write this search's route info into the dataset it ran against.
    ///
    /// Annotations from any earlier search are cleared first.
    pub fn apply_to(&self, stations: &mut [FuelStation]) {
        for station in stations.iter_mut() {
            station.clear_annotation();
        }
        for annotation in &self.annotations {
            if let Some(station) = stations.get_mut(annotation.index) {
                station.annotate(annotation.info);
            }
        }
    }
}

/// Refuelling stop planner.
pub struct Planner<'a, G, R> {
    geocoder: &'a G,
    router: &'a R,
    companies: &'a dyn CompanyMatcher,
    config: &'a PlannerConfig,
}

impl<'a, G: Geocoder, R: RouteProvider> Planner<'a, G, R> {
    pub fn new(
        geocoder: &'a G,
        router: &'a R,
        companies: &'a dyn CompanyMatcher,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            geocoder,
            router,
            companies,
            config,
        }
    }

    /// Search `stations` for the best stops on the requested trip.
    ///
    /// The range check and address validation happen before any provider
    /// call. Per-candidate route failures exclude only that candidate; the
    /// search fails only if every candidate fails.
    pub async fn plan(
        &self,
        request: &PlanRequest,
        stations: &[FuelStation],
    ) -> Result<PlanOutcome, PlanError> {
        let usable_km = request.vehicle.usable_range_km();
        if usable_km.is_nan() || usable_km <= 0.0 {
            return Err(PlanError::InsufficientRange { usable_km });
        }

        validate_location(&request.origin, Endpoint::Origin)?;
        validate_location(&request.destination, Endpoint::Destination)?;

        let deadline = Instant::now() + self.config.pipeline_timeout;

        let (origin, destination, base) = timeout_at(deadline, self.resolve(request))
            .await
            .map_err(|_| PlanError::Timeout)??;

        info!(
            distance_km = base.distance_km,
            duration_sec = base.duration_sec,
            points = base.points.len(),
            "Base route"
        );

        let filters = &request.filters;
        let sampled = sample_polyline(&base.points, self.config.sample_step_km);

        let matching = attribute_filter(stations, filters, self.companies);
        let mut candidates = corridor_filter(&matching, &sampled, filters.max_distance_km, filters);
        let corridor_matches = candidates.len();

        pre_rank(&mut candidates, filters.sort_by);
        let candidate_limit = self.config.candidate_limit(base.distance_km, usable_km);
        candidates.truncate(candidate_limit);

        debug!(
            attribute_matches = matching.len(),
            corridor_matches,
            sampled_points = sampled.len(),
            candidate_limit,
            "Candidates selected"
        );

        let trip = Trip {
            origin,
            destination,
            base_distance_km: base.distance_km,
            vehicle: request.vehicle,
        };

        let outcomes = enrich_candidates(
            self.router,
            &trip,
            &candidates,
            self.config.concurrency,
            self.config.call_timeout,
            deadline,
        )
        .await;

        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        if failed > 0 && failed == candidates.len() {
            return Err(PlanError::AllCandidatesFailed { attempted: failed });
        }

        let mut annotations = Vec::new();
        let mut reachable = Vec::new();
        for (candidate, outcome) in candidates.iter().zip(&outcomes) {
            if let Some(info) = outcome.route_info() {
                annotations.push(StopAnnotation {
                    index: candidate.index,
                    info,
                });
                let mut station = candidate.station.clone();
                station.annotate(info);
                reachable.push(station);
            }
        }

        let feasible = reachable.len();
        let stats = PlanStats {
            attribute_matches: matching.len(),
            corridor_matches,
            candidate_limit,
            enriched: candidates.len(),
            feasible,
            infeasible: outcomes
                .iter()
                .filter(|o| matches!(o, EnrichOutcome::Infeasible))
                .count(),
            failed,
        };

        let shortlist = rank_stations(
            reachable,
            filters.fuel,
            filters.sort_by,
            self.config.shortlist_size,
        );

        info!(
            shortlist = shortlist.len(),
            feasible,
            failed,
            "Route search complete"
        );

        Ok(PlanOutcome {
            base_route: base,
            shortlist,
            annotations,
            stats,
        })
    }

    async fn resolve(
        &self,
        request: &PlanRequest,
    ) -> Result<(GeoPoint, GeoPoint, BaseRoute), PlanError> {
        let origin = resolve_location(self.geocoder, &request.origin, Endpoint::Origin).await?;
        let destination =
            resolve_location(self.geocoder, &request.destination, Endpoint::Destination).await?;
        let base = base_route(self.router, origin, destination).await?;
        Ok((origin, destination, base))
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
