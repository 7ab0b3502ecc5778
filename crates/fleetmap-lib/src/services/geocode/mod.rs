// Geocode Service Module
// Resolves location descriptors to map coordinates.
//
// Two input shapes exist in the data:
// - vehicle locations: a serialized `[lng, lat]` JSON pair (longitude-first,
//   a fixed backend convention)
// - case locations: operator-written free text, matched against a gazetteer
//
// The reverse path (coordinates -> human-readable address) lives in
// `reverse.rs` behind a trait so nothing here needs network access.

pub mod error;
pub mod reverse;

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::LocationPoint;

pub use error::{GeocodeError, GeocodeResult};
pub use reverse::{format_coordinate_label, BigDataCloudGeocoder, ReverseAddress, ReverseGeocoder};

/// Named-location lookup for free-text descriptors
///
/// Pluggable so a real geocoding backend can replace the fixed table.
pub trait Gazetteer: Send + Sync {
    fn lookup(&self, descriptor: &str) -> Option<LocationPoint>;
}

/// Known named locations. An approximate stand-in for real geocoding, not
/// authoritative; unknown descriptors fall back to the default map center.
static NAMED_LOCATIONS: Lazy<HashMap<&'static str, LocationPoint>> = Lazy::new(|| {
    HashMap::from([
        (
            "Main Street Electronics Store, Downtown",
            LocationPoint::new(37.7849, -122.4094),
        ),
        (
            "Highway 101 & Oak Avenue Intersection",
            LocationPoint::new(37.7694, -122.3894),
        ),
        (
            "Last seen at Downtown Office Building",
            LocationPoint::new(37.7849, -122.4194),
        ),
        ("Downtown SF", LocationPoint::new(37.7849, -122.4094)),
        ("Mission District", LocationPoint::new(37.7594, -122.4194)),
        ("SOMA", LocationPoint::new(37.7749, -122.4034)),
    ])
});

/// Fixed-table gazetteer implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGazetteer;

impl Gazetteer for FixedGazetteer {
    fn lookup(&self, descriptor: &str) -> Option<LocationPoint> {
        NAMED_LOCATIONS.get(descriptor).copied()
    }
}

/// Parse a serialized `[lng, lat]` pair into a `LocationPoint`.
///
/// The stored order is longitude-first; the returned point is
/// `{lat: pair[1], lng: pair[0]}`.
pub fn parse_lng_lat_pair(raw: &str) -> GeocodeResult<LocationPoint> {
    let pair: Vec<f64> =
        serde_json::from_str(raw).map_err(|err| GeocodeError::MalformedCoordinates {
            message: err.to_string(),
        })?;
    if pair.len() != 2 {
        return Err(GeocodeError::MalformedCoordinates {
            message: format!("expected 2 elements, got {}", pair.len()),
        });
    }
    let (lng, lat) = (pair[0], pair[1]);
    LocationPoint::checked(lat, lng).ok_or(GeocodeError::OutOfRange { lat, lng })
}

/// Resolves location descriptors to coordinates
pub struct CoordinateResolver {
    gazetteer: Box<dyn Gazetteer>,
    default_center: LocationPoint,
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new(Box::new(FixedGazetteer), super::map::DEFAULT_CENTER)
    }
}

impl CoordinateResolver {
    pub fn new(gazetteer: Box<dyn Gazetteer>, default_center: LocationPoint) -> Self {
        Self {
            gazetteer,
            default_center,
        }
    }

    pub fn default_center(&self) -> LocationPoint {
        self.default_center
    }

    /// Resolve a vehicle's serialized location pair.
    ///
    /// Missing or malformed data is an error; the overlay model excludes the
    /// vehicle rather than pinning it at a wrong position.
    pub fn resolve_vehicle_location(&self, raw: Option<&str>) -> GeocodeResult<LocationPoint> {
        let raw = raw.ok_or_else(|| GeocodeError::MalformedCoordinates {
            message: "no location recorded".to_string(),
        })?;
        parse_lng_lat_pair(raw)
    }

    /// Resolve a case's free-text location descriptor.
    ///
    /// Infallible: unknown descriptors pin at the default map center so the
    /// incident stays visible, unlike vehicles (operator text earns an
    /// approximate pin, a garbled GPS pair does not).
    pub fn resolve_case_location(&self, descriptor: &str) -> LocationPoint {
        self.gazetteer
            .lookup(descriptor)
            .unwrap_or(self.default_center)
    }
}
