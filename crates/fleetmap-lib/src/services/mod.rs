// Services module
// Business logic for the fleet map core

pub mod deployment;
pub mod geocode;
pub mod interaction;
pub mod location;
pub mod map;
pub mod overlay;
pub mod share;

pub use deployment::{DeployError, DeployResult, DeploymentForm, DeploymentWorkflow};
pub use geocode::{
    format_coordinate_label, parse_lng_lat_pair, BigDataCloudGeocoder, CoordinateResolver,
    FixedGazetteer, Gazetteer, GeocodeError, GeocodeResult, ReverseAddress, ReverseGeocoder,
};
pub use interaction::{ClickAction, InteractionController, InteractionMode, ModeChange, Selection};
pub use location::{
    FixOptions, LocationError, LocationProvider, LocationResult, PositionSource, WatchHandle,
};
pub use map::{MapController, MapView, DEFAULT_CENTER, DEFAULT_ZOOM};
pub use overlay::{
    compute_overlays, MarkerInstruction, OverlaySet, OverlayToggles, RenderInstruction,
    ShapeInstruction, StatusFilter,
};
pub use share::{
    autofill_current_address, build_share, generate_share_url, share_origin, ShareError,
    ShareResult, ShareWorkflow,
};
