//! Detour enrichment.
//!
//! Each pre-ranked candidate gets a real route through the station. Calls
//! run on a fixed-width worker pool and each one is bounded by a deadline.
//! A failed or timed-out call excludes only that candidate.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{Instant, timeout_at};
use tracing::{trace, warn};

use crate::domain::{GeoPoint, RouteInfo, StopRoute, VehicleState};
use crate::routing::RoutingError;

use super::corridor::Candidate;
use super::provider::RouteProvider;

/// Fixed facts about the trip every candidate is measured against.
#[derive(Debug, Clone, Copy)]
pub struct Trip {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub base_distance_km: f64,
    pub vehicle: VehicleState,
}

/// Why a candidate could not be enriched.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error(transparent)]
    Provider(#[from] RoutingError),

    #[error("route request timed out")]
    Timeout,
}

/// Result of enriching one candidate.
#[derive(Debug)]
pub enum EnrichOutcome {
    /// Reachable; detour costs computed.
    Feasible(RouteInfo),
    /// The station is further away than the usable range.
    Infeasible,
    /// The route request failed.
    Failed(EnrichError),
}

impl EnrichOutcome {
    pub fn route_info(&self) -> Option<RouteInfo> {
        match self {
            EnrichOutcome::Feasible(info) => Some(*info),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, EnrichOutcome::Failed(_))
    }
}

/// Detour costs for a route through a stop, or `None` when the stop cannot
/// be reached on the usable range.
///
/// Extra distance is clamped at zero: provider rounding can make the route
/// with a stop marginally shorter than the base route.
pub fn detour_info(trip: &Trip, stop: StopRoute, price: Option<f64>) -> Option<RouteInfo> {
    if stop.distance_to_stop_km > trip.vehicle.usable_range_km() {
        return None;
    }

    let extra_km = (stop.distance_with_stop_km - trip.base_distance_km).max(0.0);
    let extra_liters = trip.vehicle.liters_for(extra_km);

    Some(RouteInfo {
        distance_to_stop_km: stop.distance_to_stop_km,
        distance_with_stop_km: stop.distance_with_stop_km,
        extra_km,
        extra_liters,
        extra_cost: extra_liters * price.unwrap_or(0.0),
    })
}

/// Run `f` over `items` with at most `concurrency` calls in flight.
///
/// Workers claim indices from a shared cursor, so each item is processed
/// exactly once. Output slot `i` holds the result for `items[i]` whatever
/// order the calls complete in.
pub async fn map_with_concurrency<'a, T, R, F, Fut>(
    items: &'a [T],
    concurrency: usize,
    f: F,
) -> Vec<R>
where
    F: Fn(&'a T, usize) -> Fut,
    Fut: Future<Output = R>,
{
    let width = concurrency.max(1).min(items.len());
    let cursor = AtomicUsize::new(0);
    let cursor = &cursor;
    let f = &f;

    let workers = (0..width).map(|_| async move {
        let mut claimed = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(item) = items.get(index) else {
                break;
            };
            claimed.push((index, f(item, index).await));
        }
        claimed
    });

    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    for (index, result) in join_all(workers).await.into_iter().flatten() {
        slots[index] = Some(result);
    }

    // Every index below items.len() was claimed by exactly one worker
    slots.into_iter().flatten().collect()
}

/// Compute a route through each candidate.
///
/// Each call is bounded by `call_timeout` and by the pipeline `deadline`,
/// whichever comes first. Output order matches `candidates`.
pub async fn enrich_candidates<R: RouteProvider>(
    router: &R,
    trip: &Trip,
    candidates: &[Candidate<'_>],
    concurrency: usize,
    call_timeout: Duration,
    deadline: Instant,
) -> Vec<EnrichOutcome> {
    map_with_concurrency(candidates, concurrency, |candidate, _| async move {
        let call_deadline = (Instant::now() + call_timeout).min(deadline);
        let station = candidate.station;

        let stop = match timeout_at(
            call_deadline,
            router.route_with_stop(trip.origin, station.location, trip.destination),
        )
        .await
        {
            Ok(Ok(stop)) => stop,
            Ok(Err(e)) => {
                warn!(station = %station.id, error = %e, "Route with stop failed");
                return EnrichOutcome::Failed(e.into());
            }
            Err(_) => {
                warn!(station = %station.id, "Route with stop timed out");
                return EnrichOutcome::Failed(EnrichError::Timeout);
            }
        };

        match detour_info(trip, stop, candidate.price) {
            Some(info) => {
                trace!(station = %station.id, extra_km = info.extra_km, "Candidate feasible");
                EnrichOutcome::Feasible(info)
            }
            None => {
                trace!(
                    station = %station.id,
                    distance_to_stop_km = stop.distance_to_stop_km,
                    "Candidate out of range"
                );
                EnrichOutcome::Infeasible
            }
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(range_km: f64) -> Trip {
        Trip {
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 1.0),
            base_distance_km: 100.0,
            vehicle: VehicleState::new(range_km),
        }
    }

    fn stop(to_stop: f64, with_stop: f64) -> StopRoute {
        StopRoute {
            distance_to_stop_km: to_stop,
            distance_with_stop_km: with_stop,
        }
    }

    #[test]
    fn detour_costs() {
        let info = detour_info(&trip(300.0), stop(40.0, 110.0), Some(1.5)).unwrap();

        assert_eq!(info.extra_km, 10.0);
        assert!((info.extra_liters - 0.6).abs() < 1e-12);
        assert!((info.extra_cost - 0.9).abs() < 1e-12);
        assert_eq!(info.distance_to_stop_km, 40.0);
        assert_eq!(info.distance_with_stop_km, 110.0);
    }

    #[test]
    fn negative_detour_clamps_to_zero() {
        let info = detour_info(&trip(300.0), stop(40.0, 99.2), Some(1.5)).unwrap();
        assert_eq!(info.extra_km, 0.0);
        assert_eq!(info.extra_cost, 0.0);
    }

    #[test]
    fn beyond_usable_range_is_infeasible() {
        // 100 km range leaves 85 km usable
        assert!(detour_info(&trip(100.0), stop(85.0, 120.0), Some(1.5)).is_some());
        assert!(detour_info(&trip(100.0), stop(85.01, 120.0), Some(1.5)).is_none());
    }

    #[test]
    fn missing_price_costs_nothing() {
        let info = detour_info(&trip(300.0), stop(10.0, 120.0), None).unwrap();
        assert_eq!(info.extra_km, 20.0);
        assert_eq!(info.extra_cost, 0.0);
    }

    #[tokio::test]
    async fn map_preserves_input_order() {
        let items: Vec<u64> = (0..20).collect();

        // Later items finish first
        let out = map_with_concurrency(&items, 3, |item, index| async move {
            tokio::time::sleep(Duration::from_millis(20 - *item)).await;
            (index, *item * 10)
        })
        .await;

        assert_eq!(out.len(), 20);
        for (slot, (index, value)) in out.iter().enumerate() {
            assert_eq!(*index, slot);
            assert_eq!(*value, slot as u64 * 10);
        }
    }

    #[tokio::test]
    async fn map_respects_concurrency_cap() {
        let items: Vec<usize> = (0..12).collect();
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let (in_flight, peak) = (&in_flight, &peak);

        map_with_concurrency(&items, 4, move |_, _| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
        })
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn map_handles_empty_and_zero_width() {
        let empty: Vec<u8> = Vec::new();
        let out = map_with_concurrency(&empty, 5, |x, _| async move { *x }).await;
        assert!(out.is_empty());

        let items = [1u8, 2, 3];
        let out = map_with_concurrency(&items, 0, |x, _| async move { *x }).await;
        assert_eq!(out, vec![1, 2, 3]);
    }
}
