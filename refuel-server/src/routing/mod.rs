//! Geocoding and routing providers.
//!
//! This module provides the network clients the planner talks to, plus the
//! offline fallbacks used when no API key is configured:
//!
//! - [`GoogleClient`] - Google Geocoding and Routes APIs (key required)
//! - [`NominatimClient`] - OpenStreetMap geocoding (no key)
//! - [`StraightLineRouter`] - haversine distances, no network
//!
//! [`select_providers`] picks the pair to use from the configuration.

mod backend;
mod convert;
mod error;
mod google;
mod http;
mod nominatim;
mod straight_line;
mod types;

pub use backend::{Geocoding, ProviderSettings, Routing, select_providers};
pub use convert::parse_duration_seconds;
pub use error::RoutingError;
pub use google::{GoogleClient, GoogleConfig};
pub use nominatim::{NominatimClient, NominatimConfig};
pub use straight_line::StraightLineRouter;
