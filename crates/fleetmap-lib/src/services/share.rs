// Share Service
// Assembles shareable location records, generates canonical share URLs, and
// submits location updates to the vehicle store. Submissions are matched by
// unit label against the current fleet snapshot; a miss never issues an
// update.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{LocationPoint, ShareMethod, ShareRecord};
use crate::repositories::{StoreError, VehicleStore};
use crate::services::geocode::{format_coordinate_label, ReverseGeocoder};
use crate::services::location::{LocationError, LocationProvider, PositionSource};

/// Share error
#[derive(Error, Debug)]
pub enum ShareError {
    /// No vehicle in the fleet snapshot carries the given unit label
    #[error("vehicle not found: {vehicle_id}")]
    VehicleNotFound { vehicle_id: String },

    /// Backend refused the location update
    #[error("location update rejected with status {status}")]
    UpdateRejected { status: u16 },

    /// Transport failure talking to the vehicle store
    #[error("vehicle store error: {0}")]
    Store(StoreError),

    /// Device location could not be acquired for the autofill flow
    #[error("location unavailable: {0}")]
    Location(#[from] LocationError),
}

impl ShareError {
    pub fn code(&self) -> &'static str {
        match self {
            ShareError::VehicleNotFound { .. } => "SHARE_VEHICLE_NOT_FOUND",
            ShareError::UpdateRejected { .. } => "SHARE_UPDATE_REJECTED",
            ShareError::Store(_) => "SHARE_STORE_ERROR",
            ShareError::Location(_) => "SHARE_LOCATION_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for ShareError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected { status } => ShareError::UpdateRejected { status },
            other => ShareError::Store(other),
        }
    }
}

/// Result type for share operations
pub type ShareResult<T> = Result<T, ShareError>;

/// Canonical share URL: `{origin}/track?vehicle=..&address=..&timestamp=..`,
/// query parameters URL-encoded, in that fixed key order.
pub fn generate_share_url(
    origin: &str,
    vehicle_id: &str,
    address: &str,
    timestamp: DateTime<Utc>,
) -> String {
    let stamp = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{}/track?vehicle={}&address={}&timestamp={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(vehicle_id),
        urlencoding::encode(address),
        urlencoding::encode(&stamp),
    )
}

/// Extract an origin (`scheme://host[:port]`) from a full page URL, the
/// `window.location.origin` equivalent.
pub fn share_origin(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}", parsed.scheme(), host, port)),
        None => Some(format!("{}://{}", parsed.scheme(), host)),
    }
}

/// Build a transient share record.
pub fn build_share(
    vehicle_id: impl Into<String>,
    address: impl Into<String>,
    coordinates: Option<LocationPoint>,
    method: ShareMethod,
) -> ShareRecord {
    ShareRecord::new(vehicle_id, address, coordinates, method)
}

/// Share workflow: submission plus the session's in-memory share history
pub struct ShareWorkflow {
    store: Arc<dyn VehicleStore>,
    history: Vec<ShareRecord>,
}

impl ShareWorkflow {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self {
            store,
            history: Vec::new(),
        }
    }

    /// Submit a share: look the vehicle up by unit label in the current
    /// fleet snapshot, then PATCH its location in the backend's `[lng, lat]`
    /// order. A record without coordinates updates to `[0, 0]`. Successful
    /// shares are appended to the session history.
    pub async fn submit(&mut self, record: ShareRecord) -> ShareResult<()> {
        let fleet = self.store.fetch_vehicles().await?;
        let target = fleet
            .iter()
            .find(|vehicle| vehicle.vehicle_id == record.vehicle_id)
            .ok_or_else(|| ShareError::VehicleNotFound {
                vehicle_id: record.vehicle_id.clone(),
            })?;

        let lng_lat = record
            .coordinates
            .map(|point| point.to_pair())
            .unwrap_or([0.0, 0.0]);
        self.store.update_location(&target.id, lng_lat).await?;

        log::info!(
            "[Share] location of {} shared via {:?}",
            record.vehicle_id,
            record.share_method
        );
        self.history.push(record);
        Ok(())
    }

    pub fn history(&self) -> &[ShareRecord] {
        &self.history
    }
}

/// The "use current location" autofill: one-shot device fix, then reverse
/// geocode. A reverse failure degrades to the numeric coordinate label so the
/// form's address is never left blank; only a failed fix surfaces an error.
pub async fn autofill_current_address<S: PositionSource>(
    provider: &LocationProvider<S>,
    reverse: &dyn ReverseGeocoder,
) -> ShareResult<(LocationPoint, String)> {
    let fix = provider.current_position().await?;
    let address = match reverse.reverse(fix).await {
        Ok(parts) => parts.format(),
        Err(err) => {
            log::warn!("[Share] reverse geocode failed, using numeric label: {err}");
            format_coordinate_label(fix)
        }
    };
    Ok((fix, address))
}
