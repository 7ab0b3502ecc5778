// Overlay Service Module
// Pure transform from the current fleet/case snapshot to the exact set of
// markers and shapes the map should show. Recomputed in full on every input
// change; no incremental diffing here (the map controller prunes by id).

pub mod style;

use std::collections::HashSet;

use crate::models::{CaseRecord, LatLngBounds, LocationPoint, Vehicle, VehicleStatus};
use crate::services::geocode::CoordinateResolver;

pub use style::{
    case_marker_style, priority_color, status_color, vehicle_marker_style, MarkerStyle,
    ShapeStyle, NEUTRAL_COLOR,
};

/// Patrol-zone circle radius around a vehicle, in meters
pub const PATROL_RADIUS: f64 = 1000.0;

/// Incident-area circle radius around a case, in meters
pub const INCIDENT_RADIUS: f64 = 200.0;

/// Padding passed to the map view when fitting bounds
pub const BOUNDS_PADDING: u32 = 20;

/// Active status filters
///
/// Empty set means "no filtering" - every status is shown, not none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    active: HashSet<VehicleStatus>,
}

impl StatusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one status in or out of the active set.
    pub fn toggle(&mut self, status: VehicleStatus) {
        if !self.active.remove(&status) {
            self.active.insert(status);
        }
    }

    pub fn matches(&self, status: VehicleStatus) -> bool {
        self.active.is_empty() || self.active.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Layer visibility toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggles {
    pub show_patrol_areas: bool,
    pub show_incidents: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            show_patrol_areas: true,
            show_incidents: true,
        }
    }
}

/// A marker to render
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerInstruction {
    pub id: String,
    pub position: LocationPoint,
    pub style: MarkerStyle,
    pub popup: String,
}

/// A circle to render
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstruction {
    pub id: String,
    pub center: LocationPoint,
    pub radius: f64,
    pub style: ShapeStyle,
}

/// One render instruction for the map view
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    Marker(MarkerInstruction),
    Shape(ShapeInstruction),
}

impl RenderInstruction {
    pub fn id(&self) -> &str {
        match self {
            RenderInstruction::Marker(marker) => &marker.id,
            RenderInstruction::Shape(shape) => &shape.id,
        }
    }
}

/// The full set of overlays for one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySet {
    /// Flat, input-ordered render instructions
    pub instructions: Vec<RenderInstruction>,
    /// Region covering every vehicle with a valid location (filters do not
    /// shrink it); `None` when no vehicle resolves
    pub bounds: Option<LatLngBounds>,
}

impl OverlaySet {
    pub fn marker_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| matches!(instruction, RenderInstruction::Marker(_)))
            .count()
    }
}

fn vehicle_popup(vehicle: &Vehicle, position: LocationPoint) -> String {
    format!(
        "{}\n{} {} ({})\nLicense: {}\nStatus: {}\nLat: {:.4}, Lng: {:.4}",
        vehicle.vehicle_id,
        vehicle.make,
        vehicle.model,
        vehicle.year,
        vehicle.license_plate,
        vehicle.status.label(),
        position.lat,
        position.lng,
    )
}

fn case_popup(case: &CaseRecord) -> String {
    format!(
        "{}\n{}\nPriority: {:?}\nLocation: {}\nStatus: {}",
        case.case_number, case.title, case.priority, case.location, case.status,
    )
}

/// Compute the overlay set for one snapshot of vehicles, cases, filters, and
/// layer toggles.
///
/// Vehicles with malformed or missing locations are silently excluded (logged
/// at debug); a bad record must neither crash rendering nor show up at a
/// wrong position. Case locations are never excluded - unknown descriptors
/// pin at the default map center.
pub fn compute_overlays(
    vehicles: &[Vehicle],
    cases: &[CaseRecord],
    filters: &StatusFilter,
    toggles: &OverlayToggles,
    resolver: &CoordinateResolver,
) -> OverlaySet {
    let mut instructions = Vec::new();
    let mut bounds: Option<LatLngBounds> = None;

    for vehicle in vehicles {
        let position = match resolver.resolve_vehicle_location(vehicle.current_location.as_deref())
        {
            Ok(point) => point,
            Err(err) => {
                log::debug!(
                    "[Overlay] excluding vehicle {} ({})",
                    vehicle.vehicle_id,
                    err
                );
                continue;
            }
        };

        // Bounds cover every valid vehicle even when filtered out of view
        match bounds.as_mut() {
            Some(region) => region.extend(position),
            None => bounds = Some(LatLngBounds::new(position)),
        }

        if !filters.matches(vehicle.status) {
            continue;
        }

        instructions.push(RenderInstruction::Marker(MarkerInstruction {
            id: format!("vehicle-{}", vehicle.id),
            position,
            style: vehicle_marker_style(vehicle.status, vehicle.vehicle_type),
            popup: vehicle_popup(vehicle, position),
        }));

        if toggles.show_patrol_areas && vehicle.assigned_area.is_some() {
            instructions.push(RenderInstruction::Shape(ShapeInstruction {
                id: format!("patrol-{}", vehicle.id),
                center: position,
                radius: PATROL_RADIUS,
                style: ShapeStyle::patrol(status_color(vehicle.status)),
            }));
        }
    }

    if toggles.show_incidents {
        for case in cases {
            let position = resolver.resolve_case_location(&case.location);
            let color = priority_color(case.priority);
            instructions.push(RenderInstruction::Marker(MarkerInstruction {
                id: format!("case-{}", case.id),
                position,
                style: case_marker_style(case.priority, case.case_type),
                popup: case_popup(case),
            }));
            instructions.push(RenderInstruction::Shape(ShapeInstruction {
                id: format!("incident-{}", case.id),
                center: position,
                radius: INCIDENT_RADIUS,
                style: ShapeStyle::incident(color),
            }));
        }
    }

    OverlaySet {
        instructions,
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CasePriority, CaseType, VehicleType};
    use crate::services::map::DEFAULT_CENTER;
    use chrono::Utc;

    fn vehicle(id: &str, status: VehicleStatus, location: Option<&str>) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            vehicle_id: format!("UNIT-{id}"),
            vehicle_type: VehicleType::Patrol,
            status,
            current_location: location.map(str::to_string),
            assigned_area: Some("[]".to_string()),
            assigned_officer_id: None,
            last_update: Utc::now(),
            license_plate: "1ABC234".to_string(),
            make: "Ford".to_string(),
            model: "Explorer".to_string(),
            year: 2021,
        }
    }

    fn case(id: &str, priority: CasePriority, location: &str) -> CaseRecord {
        CaseRecord {
            id: id.to_string(),
            case_number: format!("2024-{id}"),
            title: "test case".to_string(),
            description: String::new(),
            priority,
            case_type: CaseType::Burglary,
            location: location.to_string(),
            incident_date: Utc::now(),
            assigned_officer: None,
            status: "Open".to_string(),
        }
    }

    fn markers(set: &OverlaySet) -> Vec<&MarkerInstruction> {
        set.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::Marker(marker) => Some(marker),
                RenderInstruction::Shape(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_available_vehicle_renders_green_marker() {
        let vehicles = vec![vehicle(
            "1",
            VehicleStatus::Available,
            Some("[-122.41,37.77]"),
        )];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let markers = markers(&set);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, LocationPoint::new(37.77, -122.41));
        assert_eq!(markers[0].style.color, "#2ecc71");
        assert_eq!(markers[0].id, "vehicle-1");
    }

    #[test]
    fn test_malformed_location_excluded_others_kept() {
        let vehicles = vec![
            vehicle("1", VehicleStatus::Available, Some("not-json")),
            vehicle("2", VehicleStatus::Available, Some("[-122.41,37.77]")),
            vehicle("3", VehicleStatus::Available, None),
            vehicle("4", VehicleStatus::Available, Some("[-122.40,37.78,9.0]")),
        ];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let markers = markers(&set);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, "vehicle-2");
    }

    #[test]
    fn test_empty_filter_shows_all_valid_vehicles() {
        let vehicles = vec![
            vehicle("1", VehicleStatus::Available, Some("[-122.41,37.77]")),
            vehicle("2", VehicleStatus::Responding, Some("[-122.42,37.78]")),
            vehicle("3", VehicleStatus::OnPatrol, Some("[-122.43,37.79]")),
        ];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        assert_eq!(markers(&set).len(), vehicles.len());
    }

    #[test]
    fn test_filter_restricts_to_selected_statuses() {
        let vehicles = vec![
            vehicle("1", VehicleStatus::Available, Some("[-122.41,37.77]")),
            vehicle("2", VehicleStatus::Responding, Some("[-122.42,37.78]")),
            vehicle("3", VehicleStatus::OnPatrol, Some("[-122.43,37.79]")),
        ];
        let mut filters = StatusFilter::new();
        filters.toggle(VehicleStatus::Responding);
        let set = compute_overlays(
            &vehicles,
            &[],
            &filters,
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let markers = markers(&set);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, "vehicle-2");
        assert!(markers.len() <= vehicles.len());
    }

    #[test]
    fn test_toggle_twice_restores_empty_filter() {
        let mut filters = StatusFilter::new();
        filters.toggle(VehicleStatus::Available);
        assert!(!filters.matches(VehicleStatus::OnPatrol));
        filters.toggle(VehicleStatus::Available);
        assert!(filters.is_empty());
        assert!(filters.matches(VehicleStatus::OnPatrol));
    }

    #[test]
    fn test_patrol_area_follows_toggle_and_assignment() {
        let mut with_area = vehicle("1", VehicleStatus::OnPatrol, Some("[-122.41,37.77]"));
        let mut without_area = vehicle("2", VehicleStatus::OnPatrol, Some("[-122.42,37.78]"));
        without_area.assigned_area = None;
        with_area.assigned_area = Some("[]".to_string());

        let vehicles = vec![with_area, without_area];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let shapes: Vec<_> = set
            .instructions
            .iter()
            .filter(|instruction| matches!(instruction, RenderInstruction::Shape(_)))
            .collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id(), "patrol-1");

        let hidden = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles {
                show_patrol_areas: false,
                show_incidents: true,
            },
            &CoordinateResolver::default(),
        );
        assert!(hidden
            .instructions
            .iter()
            .all(|instruction| matches!(instruction, RenderInstruction::Marker(_))));
    }

    #[test]
    fn test_cases_emit_marker_and_incident_area() {
        let cases = vec![case("7", CasePriority::High, "Downtown SF")];
        let set = compute_overlays(
            &[],
            &cases,
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        assert_eq!(set.instructions.len(), 2);
        match &set.instructions[0] {
            RenderInstruction::Marker(marker) => {
                assert_eq!(marker.id, "case-7");
                assert_eq!(marker.style.color, "#f39c12");
                assert_eq!(marker.position, LocationPoint::new(37.7849, -122.4094));
            }
            other => panic!("expected marker first, got {other:?}"),
        }
        match &set.instructions[1] {
            RenderInstruction::Shape(shape) => {
                assert_eq!(shape.radius, INCIDENT_RADIUS);
                assert_eq!(shape.id, "incident-7");
            }
            other => panic!("expected shape second, got {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_case_pins_at_default_center() {
        let cases = vec![case("9", CasePriority::Low, "Unknown alley")];
        let set = compute_overlays(
            &[],
            &cases,
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let markers = markers(&set);
        assert_eq!(markers[0].position, DEFAULT_CENTER);
    }

    #[test]
    fn test_show_incidents_off_drops_cases() {
        let cases = vec![case("7", CasePriority::High, "Downtown SF")];
        let set = compute_overlays(
            &[],
            &cases,
            &StatusFilter::new(),
            &OverlayToggles {
                show_patrol_areas: true,
                show_incidents: false,
            },
            &CoordinateResolver::default(),
        );
        assert!(set.instructions.is_empty());
    }

    #[test]
    fn test_bounds_cover_valid_vehicles_only() {
        let vehicles = vec![
            vehicle("1", VehicleStatus::Available, Some("[-122.41,37.77]")),
            vehicle("2", VehicleStatus::Responding, Some("[-122.50,37.90]")),
            vehicle("3", VehicleStatus::Available, Some("garbage")),
        ];
        // Cases must not affect bounds
        let cases = vec![case("7", CasePriority::High, "Downtown SF")];
        let set = compute_overlays(
            &vehicles,
            &cases,
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        let bounds = set.bounds.unwrap();
        assert_eq!(bounds.south_west, LocationPoint::new(37.77, -122.50));
        assert_eq!(bounds.north_east, LocationPoint::new(37.90, -122.41));
    }

    #[test]
    fn test_bounds_ignore_filters() {
        let vehicles = vec![
            vehicle("1", VehicleStatus::Available, Some("[-122.41,37.77]")),
            vehicle("2", VehicleStatus::Responding, Some("[-122.50,37.90]")),
        ];
        let mut filters = StatusFilter::new();
        filters.toggle(VehicleStatus::Available);
        let set = compute_overlays(
            &vehicles,
            &[],
            &filters,
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        assert_eq!(markers(&set).len(), 1);
        let bounds = set.bounds.unwrap();
        assert_eq!(bounds.north_east, LocationPoint::new(37.90, -122.41));
    }

    #[test]
    fn test_no_valid_vehicles_means_no_bounds() {
        let vehicles = vec![vehicle("1", VehicleStatus::Available, Some("nope"))];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        assert!(set.bounds.is_none());
    }

    #[test]
    fn test_unknown_status_gets_neutral_color() {
        let vehicles = vec![vehicle(
            "1",
            VehicleStatus::Unknown,
            Some("[-122.41,37.77]"),
        )];
        let set = compute_overlays(
            &vehicles,
            &[],
            &StatusFilter::new(),
            &OverlayToggles::default(),
            &CoordinateResolver::default(),
        );
        assert_eq!(markers(&set)[0].style.color, NEUTRAL_COLOR);
    }
}
