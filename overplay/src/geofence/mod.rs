//! Geofence session: location permission lifecycle and displacement
//! detection.
//!
//! # State Machine
//!
//! ```text
//! Initializing --[start, authorized]-------------> Active
//! Initializing --[start, denied/restricted]------> Unavailable(PermissionDenied)
//! Initializing --[start, not determined]---------> Authorizing
//! Authorizing  --[granted]-----------------------> Active | Inactive
//! Authorizing  --[denied/restricted]-------------> Unavailable(PermissionDenied)
//! Active       --[stop]--------------------------> Inactive
//! Inactive     --[start]-------------------------> Active
//! Active/Inactive --[not determined]-------------> Authorizing
//! Active/Inactive --[denied/restricted]----------> Unavailable(PermissionDenied)
//! Unavailable(PermissionDenied) --[granted]------> Active | Inactive
//! ```
//!
//! `Unavailable(ServicesDisabled)` is entered at construction when location
//! services are off, and never left.

mod config;
mod point;
mod session;
mod source;
mod state;

pub use config::{GeofenceConfig, DEFAULT_DISTANCE_THRESHOLD_M};
pub use point::{GeoPoint, EARTH_RADIUS_M};
pub use session::{GeofenceEvent, GeofenceSession, GEOFENCE_EVENT_CAPACITY};
pub use source::{
    AuthorizationStatus, LocationSensorSource, LocationSink, LocationUpdate,
    LOCATION_QUEUE_CAPACITY,
};
pub use state::{
    GeofenceCommand, GeofenceContext, GeofenceInput, GeofenceSessionState, GeofenceState,
    UnavailableReason,
};
