// Repository Layer
// Data access abstractions for the backend vehicle store

pub mod vehicle_store;

pub use vehicle_store::{HttpVehicleStore, StoreError, StoreResult, VehicleStore};
