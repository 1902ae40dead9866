//! Process configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::planner::PlannerConfig;
use crate::routing::ProviderSettings;

/// Default listen address.
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Error reading the configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Google Maps key; `None` selects Nominatim and straight-line routing.
    pub google_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    /// Fuel price feed URL override.
    pub stations_url: Option<String>,
    pub stations_cache: PathBuf,
    pub call_timeout: Duration,
    pub pipeline_timeout: Duration,
    /// Concurrent detour requests per search.
    pub concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let planner = PlannerConfig::default();
        Self {
            google_api_key: None,
            bind_addr: DEFAULT_BIND_ADDR,
            stations_url: None,
            stations_cache: PathBuf::from("stations_cache.json"),
            call_timeout: planner.call_timeout,
            pipeline_timeout: planner.pipeline_timeout,
            concurrency: planner.concurrency,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable if set. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let concurrency = parse_or(
            "REFUEL_CONCURRENCY",
            get("REFUEL_CONCURRENCY"),
            defaults.concurrency,
        )?;
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "REFUEL_CONCURRENCY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            google_api_key: get("GOOGLE_MAPS_API_KEY"),
            bind_addr: parse_or("REFUEL_BIND_ADDR", get("REFUEL_BIND_ADDR"), defaults.bind_addr)?,
            stations_url: get("REFUEL_STATIONS_URL"),
            stations_cache: get("REFUEL_STATIONS_CACHE")
                .map(PathBuf::from)
                .unwrap_or(defaults.stations_cache),
            call_timeout: parse_secs(
                "REFUEL_CALL_TIMEOUT_SECS",
                get("REFUEL_CALL_TIMEOUT_SECS"),
                defaults.call_timeout,
            )?,
            pipeline_timeout: parse_secs(
                "REFUEL_PIPELINE_TIMEOUT_SECS",
                get("REFUEL_PIPELINE_TIMEOUT_SECS"),
                defaults.pipeline_timeout,
            )?,
            concurrency,
        })
    }

    /// Planner tunables with this configuration's limits applied.
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig::default()
            .with_concurrency(self.concurrency)
            .with_call_timeout(self.call_timeout)
            .with_pipeline_timeout(self.pipeline_timeout)
    }

    /// Settings for building the geocoding and routing clients.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            google_api_key: self.google_api_key.clone(),
            timeout_secs: self.call_timeout.as_secs(),
            max_concurrent: self.concurrency,
        }
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_secs(
    key: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let secs: u64 = parse_or(key, value, default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
