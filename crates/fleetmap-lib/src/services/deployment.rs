// Deployment Service
// Validates and assembles a new-vehicle submission from the deployment form
// plus the map click captured in deploy mode. Nothing reaches the backend
// unless every required field is present.

use std::sync::Arc;
use thiserror::Error;

use crate::models::{LocationPoint, Vehicle, VehicleCreateRequest, VehicleStatus, VehicleType};
use crate::repositories::{StoreError, VehicleStore};
use crate::services::interaction::{InteractionController, InteractionMode};
use crate::utils::time::current_year;

/// Oldest accepted model year
pub const MIN_MODEL_YEAR: i32 = 1990;

/// Deployment error
#[derive(Error, Debug)]
pub enum DeployError {
    /// Required fields absent; names the missing ones. The form stays open.
    #[error("deployment incomplete, missing: {}", missing.join(", "))]
    IncompleteDeployment { missing: Vec<&'static str> },

    /// Backend refused or failed the create request
    #[error("vehicle registration failed: {0}")]
    Store(#[from] StoreError),
}

impl DeployError {
    pub fn code(&self) -> &'static str {
        match self {
            DeployError::IncompleteDeployment { .. } => "DEPLOY_INCOMPLETE",
            DeployError::Store(_) => "DEPLOY_STORE_FAILED",
        }
    }
}

/// Result type for deployment operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Deployment form state
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentForm {
    pub vehicle_id: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
}

impl Default for DeploymentForm {
    fn default() -> Self {
        Self {
            vehicle_id: String::new(),
            license_plate: String::new(),
            vehicle_type: VehicleType::Patrol,
            make: String::new(),
            model: String::new(),
            year: current_year(),
            status: VehicleStatus::Available,
        }
    }
}

impl DeploymentForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Clamp a model-year input to the accepted range. A validation aid for the
/// form layer; `build_request` does not reject out-of-range years itself.
pub fn clamp_year(year: i32) -> i32 {
    year.clamp(MIN_MODEL_YEAR, current_year() + 1)
}

/// Assemble the create request, or fail naming every missing required field.
pub fn build_request(
    form: &DeploymentForm,
    pending_location: Option<LocationPoint>,
) -> DeployResult<VehicleCreateRequest> {
    let mut missing = Vec::new();
    if form.vehicle_id.trim().is_empty() {
        missing.push("vehicleId");
    }
    if form.license_plate.trim().is_empty() {
        missing.push("licensePlate");
    }
    if pending_location.is_none() {
        missing.push("deploymentLocation");
    }

    match (missing.is_empty(), pending_location) {
        (true, Some(location)) => Ok(VehicleCreateRequest {
            vehicle_id: form.vehicle_id.clone(),
            license_plate: form.license_plate.clone(),
            vehicle_type: form.vehicle_type,
            make: form.make.clone(),
            model: form.model.clone(),
            year: form.year,
            status: form.status,
            current_location: location.serialize_lng_lat(),
            assigned_area: "[]".to_string(),
            last_update: chrono::Utc::now(),
            assigned_officer_id: None,
        }),
        _ => Err(DeployError::IncompleteDeployment { missing }),
    }
}

/// Deployment workflow: form state plus submission against the vehicle store
pub struct DeploymentWorkflow {
    store: Arc<dyn VehicleStore>,
    form: DeploymentForm,
}

impl DeploymentWorkflow {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self {
            store,
            form: DeploymentForm::default(),
        }
    }

    pub fn form(&self) -> &DeploymentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DeploymentForm {
        &mut self.form
    }

    /// Submit the deployment. On success the form resets and the interaction
    /// mode returns to view (which also clears the consumed capture). On
    /// failure the form and capture stay untouched for another attempt.
    pub async fn submit(
        &mut self,
        interaction: &mut InteractionController,
    ) -> DeployResult<Vehicle> {
        let request = build_request(&self.form, interaction.pending_location())?;
        let vehicle = self.store.create_vehicle(request).await?;
        log::info!(
            "[Deploy] vehicle {} registered at {}",
            vehicle.vehicle_id,
            vehicle.current_location.as_deref().unwrap_or("<none>")
        );
        self.form.reset();
        interaction.set_mode(InteractionMode::View);
        Ok(vehicle)
    }

    /// Abandon the deployment: reset the form and return to view mode,
    /// discarding any pending capture.
    pub fn cancel(&mut self, interaction: &mut InteractionController) {
        self.form.reset();
        interaction.set_mode(InteractionMode::View);
    }
}
