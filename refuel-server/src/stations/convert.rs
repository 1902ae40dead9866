//! Conversion from feed DTOs to domain stations.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{FuelKind, FuelPrices, FuelStation, GeoPoint};

use super::client::{FeedDto, StationDto};

/// Format of the feed's `Fecha` field.
const PUBLISHED_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Parse a feed number such as `"1,479"`. Empty text means no value.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the feed publication time.
pub fn parse_published_at(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), PUBLISHED_FORMAT).ok()
}

/// Convert one record. Records without valid coordinates are dropped.
pub fn convert_station(dto: &StationDto) -> Option<FuelStation> {
    let lat = parse_decimal(&dto.latitude)?;
    let lng = parse_decimal(&dto.longitude)?;
    let location = GeoPoint::try_new(lat, lng).ok()?;

    let mut prices = FuelPrices::default();
    prices.set(FuelKind::Gasoline95E5, parse_decimal(&dto.gasoline_95_e5));
    prices.set(FuelKind::Gasoline98E5, parse_decimal(&dto.gasoline_98_e5));
    prices.set(FuelKind::DieselA, parse_decimal(&dto.diesel_a));
    prices.set(FuelKind::DieselPremium, parse_decimal(&dto.diesel_premium));
    prices.set(FuelKind::Lpg, parse_decimal(&dto.lpg));

    let mut station = FuelStation::new(dto.id.trim(), dto.brand.trim(), location, prices)
        .with_opening_hours(dto.opening_hours.trim());
    station.address = dto.address.trim().to_string();
    station.locality = dto.locality.trim().to_string();
    station.province = dto.province.trim().to_string();

    Some(station)
}

/// Convert every usable record of a feed, preserving feed order.
pub fn convert_feed(feed: &FeedDto) -> Vec<FuelStation> {
    let stations: Vec<FuelStation> = feed.stations.iter().filter_map(convert_station).collect();

    let skipped = feed.stations.len() - stations.len();
    if skipped > 0 {
        debug!(skipped, "Dropped feed records without valid coordinates");
    }

    stations
}
