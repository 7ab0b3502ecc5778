// Interaction Service
// State machine for the operator's current map intent (view/deploy/track),
// click routing, and the selected-entity state shared with dependent panels.
// The map view calls into this controller directly; there is no global event
// broadcast between widgets.

use serde::{Deserialize, Serialize};

use crate::models::LocationPoint;

/// Operator interaction mode; exactly one active at a time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    View,
    Deploy,
    Track,
}

/// Currently selected entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Vehicle(String),
    Case(String),
}

/// What a map click meant under the current mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickAction {
    /// Deploy mode: the click became the pending deployment location
    CapturedDeployLocation(LocationPoint),
    /// View/track mode: the click is left to the map view's own hit-testing
    Pass,
}

/// Side effects of a mode change, for the UI layer to act on
#[derive(Debug, Clone, PartialEq)]
pub struct ModeChange {
    pub mode: InteractionMode,
    pub form_opened: bool,
    pub form_closed: bool,
    /// Pending capture discarded by leaving deploy mode
    pub discarded_capture: Option<LocationPoint>,
}

/// Interaction mode controller and selection state
#[derive(Debug, Default)]
pub struct InteractionController {
    mode: InteractionMode,
    pending_location: Option<LocationPoint>,
    selection: Selection,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch modes. Entering deploy opens the deployment form; leaving
    /// deploy discards any uncommitted pending location and closes the form.
    /// These are the only automatic side effects.
    pub fn set_mode(&mut self, mode: InteractionMode) -> ModeChange {
        let entering_deploy = mode == InteractionMode::Deploy && self.mode != InteractionMode::Deploy;
        let leaving_deploy = self.mode == InteractionMode::Deploy && mode != InteractionMode::Deploy;
        let discarded_capture = if leaving_deploy {
            self.pending_location.take()
        } else {
            None
        };
        if self.mode != mode {
            log::debug!("[Interaction] mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        ModeChange {
            mode,
            form_opened: entering_deploy,
            form_closed: leaving_deploy,
            discarded_capture,
        }
    }

    /// Route a raw map click according to the current mode.
    ///
    /// In deploy mode each click overwrites the previous pending location -
    /// only the latest click counts - and never performs selection.
    pub fn handle_map_click(&mut self, point: LocationPoint) -> ClickAction {
        match self.mode {
            InteractionMode::Deploy => {
                self.pending_location = Some(point);
                ClickAction::CapturedDeployLocation(point)
            }
            InteractionMode::View | InteractionMode::Track => ClickAction::Pass,
        }
    }

    pub fn pending_location(&self) -> Option<LocationPoint> {
        self.pending_location
    }

    pub fn take_pending_location(&mut self) -> Option<LocationPoint> {
        self.pending_location.take()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Entity clicks reported by the map view's hit-testing
    pub fn select_vehicle(&mut self, id: impl Into<String>) {
        self.selection = Selection::Vehicle(id.into());
    }

    pub fn select_case(&mut self, id: impl Into<String>) {
        self.selection = Selection::Case(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }
}
