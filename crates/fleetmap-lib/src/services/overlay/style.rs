// Overlay classification table
// Single source of truth for marker colors, glyphs, and shape styling.
// Keyed by vehicle status and by (case priority, case type); every panel and
// overlay pulls from here instead of carrying its own copy.

use crate::models::{CasePriority, CaseType, VehicleStatus, VehicleType};

/// Neutral color for statuses/priorities this build does not recognize
pub const NEUTRAL_COLOR: &str = "#7f8c8d";

/// Marker visual classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub glyph: &'static str,
}

/// Circle/shape visual classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: &'static str,
    pub fill_opacity: f64,
    pub weight: u32,
    pub opacity: f64,
    pub dash: &'static str,
}

impl ShapeStyle {
    /// Patrol-zone circle preset
    pub fn patrol(color: &'static str) -> Self {
        Self {
            color,
            fill_opacity: 0.1,
            weight: 2,
            opacity: 1.0,
            dash: "5, 5",
        }
    }

    /// Incident-area circle preset
    pub fn incident(color: &'static str) -> Self {
        Self {
            color,
            fill_opacity: 0.05,
            weight: 1,
            opacity: 0.3,
            dash: "3, 3",
        }
    }
}

/// Vehicle status -> marker/zone color
pub fn status_color(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Available => "#2ecc71",
        VehicleStatus::OnPatrol => "#3498db",
        VehicleStatus::Responding => "#e74c3c",
        VehicleStatus::OutOfService => "#95a5a6",
        VehicleStatus::Unknown => NEUTRAL_COLOR,
    }
}

/// Case priority -> marker/area color
pub fn priority_color(priority: CasePriority) -> &'static str {
    match priority {
        CasePriority::Critical => "#e74c3c",
        CasePriority::High => "#f39c12",
        CasePriority::Medium => "#3498db",
        CasePriority::Low => "#2ecc71",
        CasePriority::Unclassified => "#95a5a6",
    }
}

fn vehicle_glyph(vehicle_type: VehicleType) -> &'static str {
    match vehicle_type {
        VehicleType::Patrol => "🚗",
        VehicleType::Motorcycle => "🏍️",
        VehicleType::K9 => "🐕",
        VehicleType::Special => "🚙",
    }
}

fn case_glyph(case_type: CaseType) -> &'static str {
    match case_type {
        CaseType::Burglary => "🏠",
        CaseType::Traffic => "🚗",
        CaseType::Assault => "⚠️",
        CaseType::Other => "📍",
    }
}

/// Classification for a vehicle marker: color by status, glyph by type
pub fn vehicle_marker_style(status: VehicleStatus, vehicle_type: VehicleType) -> MarkerStyle {
    MarkerStyle {
        color: status_color(status),
        glyph: vehicle_glyph(vehicle_type),
    }
}

/// Classification for a case marker: color by priority, glyph by type
pub fn case_marker_style(priority: CasePriority, case_type: CaseType) -> MarkerStyle {
    MarkerStyle {
        color: priority_color(priority),
        glyph: case_glyph(case_type),
    }
}
