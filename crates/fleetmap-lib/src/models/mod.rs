// Data models module
// Rust structs that map to the backend's JSON records

pub mod case;
pub mod location;
pub mod share;
pub mod vehicle;

// Re-export all models for convenience
pub use case::*;
pub use location::*;
pub use share::*;
pub use vehicle::*;
