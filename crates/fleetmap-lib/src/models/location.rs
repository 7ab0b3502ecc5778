// Geographic primitives
// The backend stores locations as a serialized [lng, lat] pair - longitude
// first. That order is a fixed convention of the wire format and is preserved
// by every (de)serialization helper here.

use serde::{Deserialize, Serialize};

/// A point on the map, latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub lat: f64,
    pub lng: f64,
}

impl LocationPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a point only if both components are finite and in range
    /// (-90..=90 latitude, -180..=180 longitude).
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// The wire-order pair: `[lng, lat]`.
    pub fn to_pair(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Serialize as the backend's `"[lng,lat]"` JSON string.
    pub fn serialize_lng_lat(&self) -> String {
        format!("[{},{}]", self.lng, self.lat)
    }
}

/// A rectangular region covering a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LocationPoint,
    pub north_east: LocationPoint,
}

impl LatLngBounds {
    pub fn new(point: LocationPoint) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: LocationPoint) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn from_points<I: IntoIterator<Item = LocationPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::new(iter.next()?);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }
}
