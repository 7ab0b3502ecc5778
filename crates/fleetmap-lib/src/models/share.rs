// Share data models
// Transient package of a vehicle's location for external sharing; kept in an
// in-memory history only, never persisted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::LocationPoint;

/// How the operator intends to deliver the shared location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShareMethod {
    #[default]
    Text,
    Email,
    Url,
    Qr,
}

/// A shareable location record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    pub id: String,
    /// Fleet unit label ("UNIT-001"), not the backend record id
    pub vehicle_id: String,
    pub address: String,
    pub coordinates: Option<LocationPoint>,
    pub share_method: ShareMethod,
    pub timestamp: DateTime<Utc>,
}

impl ShareRecord {
    pub fn new(
        vehicle_id: impl Into<String>,
        address: impl Into<String>,
        coordinates: Option<LocationPoint>,
        share_method: ShareMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id: vehicle_id.into(),
            address: address.into(),
            coordinates,
            share_method,
            timestamp: Utc::now(),
        }
    }
}
