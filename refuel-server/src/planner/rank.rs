//! Candidate ranking.
//!
//! Two orderings are used. The pre-rank orders corridor candidates by a
//! cheap proxy (distance to the route, or price) to choose which ones get a
//! real with-stop route. The final rank orders the enriched stations by
//! detour or price. The tie-break differs between them: each ranking breaks
//! ties on the other criterion.

use std::cmp::Ordering;

use crate::domain::{FuelSelection, FuelStation, SortBy};

use super::corridor::Candidate;

/// Order corridor candidates best-first by the cheap proxy.
///
/// - `Price`: per-litre price, then distance to route
/// - `Distance`: distance to route, then per-litre price
///
/// Missing prices sort last. The sort is stable, so dataset order breaks
/// exact ties.
pub fn pre_rank(candidates: &mut [Candidate<'_>], sort_by: SortBy) {
    let price = |c: &Candidate<'_>| c.price.unwrap_or(f64::INFINITY);

    candidates.sort_by(|a, b| match sort_by {
        SortBy::Price => price(a)
            .total_cmp(&price(b))
            .then_with(|| a.route_distance_km.total_cmp(&b.route_distance_km)),
        SortBy::Distance => a
            .route_distance_km
            .total_cmp(&b.route_distance_km)
            .then_with(|| price(a).total_cmp(&price(b))),
    });
}

/// Order enriched stations best-first and keep the top `limit`.
///
/// - `Distance`: extra km, then per-litre price
/// - `Price`: per-litre price, then extra km
///
/// Stations without route info sort as if their detour were infinite.
pub fn rank_stations(
    mut stations: Vec<FuelStation>,
    fuel: FuelSelection,
    sort_by: SortBy,
    limit: usize,
) -> Vec<FuelStation> {
    stations.sort_by(|a, b| compare_stations(a, b, fuel, sort_by));
    stations.truncate(limit);
    stations
}

fn compare_stations(
    a: &FuelStation,
    b: &FuelStation,
    fuel: FuelSelection,
    sort_by: SortBy,
) -> Ordering {
    let extra = |s: &FuelStation| s.route_info.map_or(f64::INFINITY, |info| info.extra_km);
    let price = |s: &FuelStation| s.price_for(fuel).unwrap_or(f64::INFINITY);

    match sort_by {
        SortBy::Distance => extra(a)
            .total_cmp(&extra(b))
            .then_with(|| price(a).total_cmp(&price(b))),
        SortBy::Price => price(a)
            .total_cmp(&price(b))
            .then_with(|| extra(a).total_cmp(&extra(b))),
    }
}
