// fleetmap core library
// Overlay computation, interaction state, and tracking workflows for the
// police fleet map dashboard. Rendering, the browser geolocation API, and
// the backend store live behind collaborator traits.

pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

// Re-export models for use by the embedding application
pub use models::*;
