// Map Service Module
// Glue between the overlay model, the interaction controller, and the
// rendering surface. The map view is an abstract collaborator: it draws what
// it is told and reports clicks back through explicit calls - no global
// event dispatch between widgets.

use std::collections::HashSet;

use crate::models::{status_counts, CaseRecord, LatLngBounds, LocationPoint, Vehicle, VehicleStatus};
use crate::services::geocode::CoordinateResolver;
use crate::services::interaction::{ClickAction, InteractionController};
use crate::services::overlay::{
    compute_overlays, MarkerInstruction, OverlaySet, OverlayToggles, RenderInstruction,
    ShapeInstruction, StatusFilter, BOUNDS_PADDING,
};

/// Initial map center (San Francisco City Hall)
pub const DEFAULT_CENTER: LocationPoint = LocationPoint::new(37.7749, -122.4194);

/// Initial zoom level
pub const DEFAULT_ZOOM: u8 = 11;

/// Abstract rendering surface
///
/// Implemented by the real tile-map binding in the embedding application and
/// by recording fakes in tests.
pub trait MapView {
    fn set_center(&mut self, center: LocationPoint);
    fn set_zoom(&mut self, zoom: u8);
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: u32);
    fn render_marker(&mut self, marker: &MarkerInstruction);
    fn render_shape(&mut self, shape: &ShapeInstruction);
    fn remove_by_id(&mut self, id: &str);
}

/// Coordinates snapshot state, overlay recomputation, and the map view
pub struct MapController<V: MapView> {
    view: V,
    resolver: CoordinateResolver,
    interaction: InteractionController,
    filters: StatusFilter,
    toggles: OverlayToggles,
    vehicles: Vec<Vehicle>,
    cases: Vec<CaseRecord>,
    rendered_ids: HashSet<String>,
    generation: u64,
    applied_generation: u64,
}

impl<V: MapView> MapController<V> {
    pub fn new(mut view: V, resolver: CoordinateResolver) -> Self {
        view.set_center(DEFAULT_CENTER);
        view.set_zoom(DEFAULT_ZOOM);
        Self {
            view,
            resolver,
            interaction: InteractionController::new(),
            filters: StatusFilter::new(),
            toggles: OverlayToggles::default(),
            vehicles: Vec::new(),
            cases: Vec::new(),
            rendered_ids: HashSet::new(),
            generation: 0,
            applied_generation: 0,
        }
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController {
        &mut self.interaction
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.filters
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Per-status counts of the current snapshot, for the dashboard panel.
    pub fn status_counts(&self) -> std::collections::HashMap<VehicleStatus, usize> {
        status_counts(&self.vehicles)
    }

    /// Reserve a generation number for a recomputation about to start.
    /// Results applied out of order are dropped in favor of newer input.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replace the fleet/case snapshot, re-render, and fit the view to the
    /// vehicles (no-op when no vehicle has a valid location).
    pub fn update_snapshot(&mut self, vehicles: Vec<Vehicle>, cases: Vec<CaseRecord>) {
        self.vehicles = vehicles;
        self.cases = cases;
        let bounds = self.refresh();
        if let Some(bounds) = bounds {
            self.view.fit_bounds(&bounds, BOUNDS_PADDING);
        }
    }

    /// Toggle one status filter and re-render. Filter changes never refit
    /// the view.
    pub fn toggle_status_filter(&mut self, status: VehicleStatus) {
        self.filters.toggle(status);
        self.refresh();
    }

    pub fn set_toggles(&mut self, toggles: OverlayToggles) {
        self.toggles = toggles;
        self.refresh();
    }

    /// Recompute overlays from the current inputs and apply them.
    pub fn refresh(&mut self) -> Option<LatLngBounds> {
        let generation = self.next_generation();
        let overlays = compute_overlays(
            &self.vehicles,
            &self.cases,
            &self.filters,
            &self.toggles,
            &self.resolver,
        );
        let bounds = overlays.bounds;
        self.apply_overlays(generation, overlays);
        bounds
    }

    /// Apply a computed overlay set: prune overlays whose ids disappeared,
    /// then (re)render the new set. A set computed from superseded inputs
    /// (generation at or below the last applied one) is dropped - final
    /// visible state always reflects the newest snapshot, not completion
    /// order.
    pub fn apply_overlays(&mut self, generation: u64, overlays: OverlaySet) -> bool {
        if generation <= self.applied_generation {
            log::debug!(
                "[Map] dropping stale overlay set (generation {generation} <= {})",
                self.applied_generation
            );
            return false;
        }
        self.applied_generation = generation;

        let next_ids: HashSet<String> = overlays
            .instructions
            .iter()
            .map(|instruction| instruction.id().to_string())
            .collect();
        for stale in self.rendered_ids.difference(&next_ids) {
            self.view.remove_by_id(stale);
        }
        for instruction in &overlays.instructions {
            match instruction {
                RenderInstruction::Marker(marker) => self.view.render_marker(marker),
                RenderInstruction::Shape(shape) => self.view.render_shape(shape),
            }
        }
        self.rendered_ids = next_ids;
        true
    }

    /// Entry point for raw map clicks from the view.
    pub fn on_map_click(&mut self, lat: f64, lng: f64) -> ClickAction {
        self.interaction
            .handle_map_click(LocationPoint::new(lat, lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VehicleStatus, VehicleType};
    use crate::services::interaction::InteractionMode;
    use chrono::Utc;

    /// Map view fake that records every call
    #[derive(Default)]
    struct RecordingView {
        center: Option<LocationPoint>,
        zoom: Option<u8>,
        fit_calls: Vec<(LatLngBounds, u32)>,
        markers: Vec<String>,
        shapes: Vec<String>,
        removed: Vec<String>,
    }

    impl MapView for &mut RecordingView {
        fn set_center(&mut self, center: LocationPoint) {
            self.center = Some(center);
        }

        fn set_zoom(&mut self, zoom: u8) {
            self.zoom = Some(zoom);
        }

        fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: u32) {
            self.fit_calls.push((*bounds, padding));
        }

        fn render_marker(&mut self, marker: &MarkerInstruction) {
            self.markers.push(marker.id.clone());
        }

        fn render_shape(&mut self, shape: &ShapeInstruction) {
            self.shapes.push(shape.id.clone());
        }

        fn remove_by_id(&mut self, id: &str) {
            self.removed.push(id.to_string());
        }
    }

    fn vehicle(id: &str, location: Option<&str>) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            vehicle_id: format!("UNIT-{id}"),
            vehicle_type: VehicleType::Patrol,
            status: VehicleStatus::Available,
            current_location: location.map(str::to_string),
            assigned_area: None,
            assigned_officer_id: None,
            last_update: Utc::now(),
            license_plate: String::new(),
            make: String::new(),
            model: String::new(),
            year: 0,
        }
    }

    #[test]
    fn test_new_controller_centers_the_view() {
        let mut view = RecordingView::default();
        let controller = MapController::new(&mut view, CoordinateResolver::default());
        drop(controller);
        assert_eq!(view.center, Some(DEFAULT_CENTER));
        assert_eq!(view.zoom, Some(DEFAULT_ZOOM));
    }

    #[test]
    fn test_snapshot_update_renders_and_fits() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());
        controller.update_snapshot(
            vec![
                vehicle("1", Some("[-122.41,37.77]")),
                vehicle("2", Some("[-122.50,37.90]")),
            ],
            Vec::new(),
        );
        drop(controller);
        assert_eq!(view.markers, vec!["vehicle-1", "vehicle-2"]);
        assert_eq!(view.fit_calls.len(), 1);
        assert_eq!(view.fit_calls[0].1, BOUNDS_PADDING);
    }

    #[test]
    fn test_snapshot_with_no_valid_vehicles_does_not_fit() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());
        controller.update_snapshot(vec![vehicle("1", Some("bad"))], Vec::new());
        drop(controller);
        assert!(view.fit_calls.is_empty());
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_filter_toggle_prunes_hidden_vehicles() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());
        let mut responding = vehicle("2", Some("[-122.50,37.90]"));
        responding.status = VehicleStatus::Responding;
        controller.update_snapshot(
            vec![vehicle("1", Some("[-122.41,37.77]")), responding],
            Vec::new(),
        );

        controller.toggle_status_filter(VehicleStatus::Responding);
        drop(controller);
        assert!(view.removed.contains(&"vehicle-1".to_string()));
        // Snapshot fit happened once; filter changes never refit
        assert_eq!(view.fit_calls.len(), 1);
    }

    #[test]
    fn test_stale_overlay_set_is_dropped() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());

        let stale_generation = controller.next_generation();
        controller.update_snapshot(vec![vehicle("1", Some("[-122.41,37.77]"))], Vec::new());

        // A recomputation that started before the snapshot update finishes
        // late and must not clobber the newer result.
        let stale = OverlaySet::default();
        assert!(!controller.apply_overlays(stale_generation, stale));
        drop(controller);
        assert!(view.removed.is_empty());
        assert_eq!(view.markers, vec!["vehicle-1"]);
    }

    #[test]
    fn test_click_routing_follows_mode() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());
        assert_eq!(controller.on_map_click(37.77, -122.41), ClickAction::Pass);

        controller.interaction_mut().set_mode(InteractionMode::Deploy);
        let action = controller.on_map_click(37.77, -122.41);
        assert_eq!(
            action,
            ClickAction::CapturedDeployLocation(LocationPoint::new(37.77, -122.41))
        );
    }

    #[test]
    fn test_status_counts_reflect_snapshot() {
        let mut view = RecordingView::default();
        let mut controller = MapController::new(&mut view, CoordinateResolver::default());
        controller.update_snapshot(
            vec![
                vehicle("1", Some("[-122.41,37.77]")),
                vehicle("2", Some("[-122.42,37.78]")),
            ],
            Vec::new(),
        );
        let counts = controller.status_counts();
        assert_eq!(counts.get(&VehicleStatus::Available), Some(&2));
    }
}
