// Reverse geocoding
// Coordinates -> human-readable address via the BigDataCloud public endpoint.
// Behind a trait so workflows stay testable without network access; callers
// fall back to a fixed-precision numeric label when the lookup fails.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::error::GeocodeResult;
use crate::models::LocationPoint;

/// Public reverse-geocode endpoint (no API key required)
pub const REVERSE_GEOCODE_ENDPOINT: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Reverse-geocoded address components
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseAddress {
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub principal_subdivision: String,
    #[serde(default)]
    pub country_name: String,
}

impl ReverseAddress {
    /// "locality, subdivision, country" display form
    pub fn format(&self) -> String {
        format!(
            "{}, {}, {}",
            self.locality, self.principal_subdivision, self.country_name
        )
    }
}

/// Reverse geocoding collaborator
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, point: LocationPoint) -> GeocodeResult<ReverseAddress>;
}

/// Production reverse geocoder backed by BigDataCloud
pub struct BigDataCloudGeocoder {
    client: Client,
    endpoint: String,
}

impl Default for BigDataCloudGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BigDataCloudGeocoder {
    pub fn new() -> Self {
        Self::with_endpoint(REVERSE_GEOCODE_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for BigDataCloudGeocoder {
    async fn reverse(&self, point: LocationPoint) -> GeocodeResult<ReverseAddress> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", point.lat.to_string()),
                ("longitude", point.lng.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Numeric fallback label when reverse geocoding is unavailable
pub fn format_coordinate_label(point: LocationPoint) -> String {
    format!("{:.6}, {:.6}", point.lat, point.lng)
}
