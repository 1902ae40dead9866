use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use refuel_server::cache::{CacheConfig, CachedGeocoder};
use refuel_server::config::AppConfig;
use refuel_server::routing::select_providers;
use refuel_server::stations::{
    StationCache, StationCacheConfig, StationClient, StationClientConfig, StationDataset,
};
use refuel_server::web::{AppState, create_router};

/// How often to refresh the station dataset (1 hour).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Create geocoding and routing clients
    let (geocoding, routing) =
        select_providers(&config.provider_settings()).expect("Failed to create provider clients");
    info!(
        geocoder = geocoding.name(),
        router = routing.name(),
        "Providers selected"
    );
    if config.google_api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set, using Nominatim and straight-line distances");
    }

    let geocoder = CachedGeocoder::new(geocoding, &CacheConfig::default());

    // Load stations (fail fast if unavailable)
    let mut station_config = StationClientConfig::new();
    if let Some(url) = &config.stations_url {
        station_config = station_config.with_base_url(url);
    }
    let station_client =
        StationClient::new(station_config).expect("Failed to create station client");
    let station_cache = StationCache::new(StationCacheConfig::new(&config.stations_cache));
    let stations = StationDataset::load(station_client, station_cache)
        .await
        .expect("Failed to load fuel stations");
    info!(
        stations = stations.len().await,
        published_at = ?stations.published_at().await,
        "Loaded fuel stations"
    );

    // Spawn background task to refresh stations hourly
    let stations_refresh = stations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match stations_refresh.refresh().await {
                Ok(count) => info!(count, "Refreshed fuel stations"),
                Err(e) => error!(error = %e, "Failed to refresh fuel stations"),
            }
        }
    });

    let state = AppState::new(geocoder, routing, config.planner_config(), stations);
    let app = create_router(state);

    let addr = config.bind_addr;
    info!(%addr, "Refuel planner listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /stations/brands - Brands in the dataset");
    info!("  POST /route/plan      - Plan refuelling stops");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
