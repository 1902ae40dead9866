//! Fuel station dataset from the Spanish Ministry price feed.
//!
//! The feed is fetched at startup (or read from a fresh disk cache),
//! converted to [`FuelStation`](crate::domain::FuelStation) records and
//! refreshed hourly in the background.

mod cache;
mod client;
mod convert;
mod dataset;
mod error;

pub use cache::{StationCache, StationCacheConfig};
pub use client::{FeedDto, StationClient, StationClientConfig, StationDto, parse_feed};
pub use convert::{convert_feed, convert_station, parse_decimal, parse_published_at};
pub use dataset::StationDataset;
pub use error::StationError;
