// Vehicle store repository
// HTTP access to the backend fleet records. The core treats the store as the
// single owner of Vehicle records; everything it computes locally is derived
// from the snapshot this trait returns.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Vehicle, VehicleCreateRequest};

/// Vehicle store error
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure
    #[error("vehicle store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("vehicle store rejected the request with status {status}")]
    Rejected { status: u16 },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Http(_) => "STORE_HTTP_ERROR",
            StoreError::Rejected { .. } => "STORE_REJECTED",
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Backend vehicle store boundary
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Fetch the current fleet snapshot.
    async fn fetch_vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    /// Update a vehicle's location. `lng_lat` is longitude-first, the
    /// backend's expected order.
    async fn update_location(&self, id: &str, lng_lat: [f64; 2]) -> StoreResult<()>;

    /// Register a newly deployed vehicle.
    async fn create_vehicle(&self, request: VehicleCreateRequest) -> StoreResult<Vehicle>;
}

/// Production store backed by the dashboard's REST API
pub struct HttpVehicleStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVehicleStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl VehicleStore for HttpVehicleStore {
    async fn fetch_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        let response = self
            .client
            .get(self.api_url("/api/police-vehicles"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn update_location(&self, id: &str, lng_lat: [f64; 2]) -> StoreResult<()> {
        let url = self.api_url(&format!("/api/police-vehicles/{id}/location"));
        let body = serde_json::json!({ "location": lng_lat });
        let response = self.client.patch(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn create_vehicle(&self, request: VehicleCreateRequest) -> StoreResult<Vehicle> {
        let response = self
            .client
            .post(self.api_url("/api/police-vehicles"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}
