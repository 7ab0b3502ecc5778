// Case/incident data models
// Read-only input from the case store; the core never mutates these

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CasePriority {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unclassified,
}

/// Incident category, used for the marker glyph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CaseType {
    Burglary,
    Traffic,
    Assault,
    #[default]
    #[serde(other)]
    Other,
}

/// An incident case record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: String,
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: CasePriority,
    #[serde(rename = "type", default)]
    pub case_type: CaseType,
    /// Free-text location descriptor, resolved via the gazetteer
    pub location: String,
    pub incident_date: DateTime<Utc>,
    #[serde(default)]
    pub assigned_officer: Option<String>,
    #[serde(default)]
    pub status: String,
}
