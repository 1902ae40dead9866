//! Routing and geocoding provider error types.

use crate::geometry::PolylineError;

/// Errors from geocoding and routing providers.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by provider")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Address text was empty after trimming
    #[error("empty address")]
    EmptyAddress,

    /// Geocoder found nothing for the address
    #[error("no geocoding result for '{0}'")]
    NoMatch(String),

    /// Router returned no route
    #[error("no route returned")]
    NoRoute,

    /// The encoded path could not be decoded
    #[error("invalid route polyline: {0}")]
    Polyline(#[from] PolylineError),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
