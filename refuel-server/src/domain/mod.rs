//! Domain types for the refuelling stop planner.
//!
//! This module contains the value types shared by every pipeline stage:
//! coordinates, trip endpoints, stations with their prices, filters and the
//! vehicle model. Validation happens at the input boundary so pipeline code
//! can trust the values it receives.

mod company;
mod error;
mod filter;
mod fuel;
mod geo;
mod location;
mod route;
mod station;
mod vehicle;

pub use company::{BrandMatcher, CompanyMatcher};
pub use error::DomainError;
pub use filter::{CompanyMode, FilterSettings, SortBy};
pub use fuel::{FuelKind, FuelPrices, FuelSelection};
pub use geo::GeoPoint;
pub use location::{Address, Location};
pub use route::{BaseRoute, StopRoute};
pub use station::{FuelStation, RouteInfo};
pub use vehicle::{CONSUMPTION_L_PER_100KM, RESERVE_KM, VehicleState};
