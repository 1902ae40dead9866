//! Domain error types.
//!
//! These errors represent validation failures on user or feed input.
//! They are distinct from provider and IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinates outside the WGS84 ranges or not finite
    #[error("invalid coordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Fuel name not recognised
    #[error("unknown fuel: {0}")]
    UnknownFuel(String),
}
