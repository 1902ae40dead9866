//! Refuelling stop planner.
//!
//! This module implements the route corridor search that answers:
//! "Where should I stop for fuel on the way, given my range?"
//!
//! The pipeline resolves a base route, filters the station dataset to a
//! corridor around it, pre-ranks the corridor cheaply, computes real
//! detours for a bounded subset with limited concurrency, and ranks the
//! reachable stations into a short list.

mod config;
mod corridor;
mod enrich;
mod provider;
mod rank;
mod resolve;
mod search;

pub use config::PlannerConfig;
pub use corridor::{Candidate, attribute_filter, corridor_filter, passes_attributes};
pub use enrich::{EnrichError, EnrichOutcome, Trip, detour_info, map_with_concurrency};
pub use provider::{Geocoder, RouteProvider};
pub use rank::{pre_rank, rank_stations};
pub use resolve::Endpoint;
pub use search::{PlanError, PlanOutcome, PlanRequest, PlanStats, Planner, StopAnnotation};
