// Geocode Service Error Types

use thiserror::Error;

/// Geocode error
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Location data that is not a two-element finite numeric pair
    #[error("malformed coordinates: {message}")]
    MalformedCoordinates { message: String },

    /// A pair that parsed but lies outside valid lat/lng ranges
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },

    /// Reverse lookup transport failure; callers recover with the numeric
    /// fallback label
    #[error("reverse geocoding failed: {0}")]
    ReverseLookup(#[from] reqwest::Error),
}

impl GeocodeError {
    pub fn code(&self) -> &'static str {
        match self {
            GeocodeError::MalformedCoordinates { .. } => "GEOCODE_MALFORMED_COORDINATES",
            GeocodeError::OutOfRange { .. } => "GEOCODE_OUT_OF_RANGE",
            GeocodeError::ReverseLookup(_) => "GEOCODE_REVERSE_LOOKUP_FAILED",
        }
    }
}

/// Result type for geocode operations
pub type GeocodeResult<T> = Result<T, GeocodeError>;
