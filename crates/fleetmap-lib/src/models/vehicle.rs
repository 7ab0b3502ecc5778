// Vehicle data models
// Fleet records fetched from /api/police-vehicles plus the deployment
// submission payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vehicle category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Patrol,
    Motorcycle,
    K9,
    Special,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::Patrol => write!(f, "patrol"),
            VehicleType::Motorcycle => write!(f, "motorcycle"),
            VehicleType::K9 => write!(f, "k9"),
            VehicleType::Special => write!(f, "special"),
        }
    }
}

/// Vehicle duty status
///
/// `Unknown` absorbs statuses this build does not recognize so a single odd
/// record never fails the whole fleet fetch; it classifies to a neutral
/// marker color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    OnPatrol,
    Responding,
    OutOfService,
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    /// Human label, underscores spelled out ("on patrol")
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::OnPatrol => "on patrol",
            VehicleStatus::Responding => "responding",
            VehicleStatus::OutOfService => "out of service",
            VehicleStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "available"),
            VehicleStatus::OnPatrol => write!(f, "on_patrol"),
            VehicleStatus::Responding => write!(f, "responding"),
            VehicleStatus::OutOfService => write!(f, "out_of_service"),
            VehicleStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A fleet vehicle record
///
/// `current_location` carries the backend's serialized `[lng, lat]` pair as
/// an opaque string; parsing is the coordinate resolver's job so a malformed
/// value never breaks deserialization of the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    /// Human-readable unit label, unique within the fleet (e.g. "UNIT-001")
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub assigned_area: Option<String>,
    #[serde(default)]
    pub assigned_officer_id: Option<String>,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: i32,
}

/// Payload for registering a new vehicle at an operator-chosen location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCreateRequest {
    pub vehicle_id: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    /// Serialized `[lng, lat]` pair, longitude-first
    pub current_location: String,
    pub assigned_area: String,
    pub last_update: DateTime<Utc>,
    pub assigned_officer_id: Option<String>,
}

/// Count vehicles per status for the fleet dashboard panel
pub fn status_counts(vehicles: &[Vehicle]) -> HashMap<VehicleStatus, usize> {
    let mut counts = HashMap::new();
    for vehicle in vehicles {
        *counts.entry(vehicle.status).or_insert(0) += 1;
    }
    counts
}
