//! Location sensor source abstraction.

use std::fmt;

use tokio::sync::mpsc;

use crate::error::SensorError;

use super::point::GeoPoint;

/// Depth of the queue between a location source and its session.
pub const LOCATION_QUEUE_CAPACITY: usize = 32;

/// Location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Restricted,
    Authorized,
    /// A platform value this crate does not know about.
    Unsupported,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        self == AuthorizationStatus::Authorized
    }

    pub fn is_refused(self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted
        )
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationStatus::NotDetermined => write!(f, "not determined"),
            AuthorizationStatus::Denied => write!(f, "denied"),
            AuthorizationStatus::Restricted => write!(f, "restricted"),
            AuthorizationStatus::Authorized => write!(f, "authorized"),
            AuthorizationStatus::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One callback from the location source.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Fix(GeoPoint),
    Error(SensorError),
    /// Permission changed. The session re-reads
    /// [`authorization_status`](LocationSensorSource::authorization_status).
    AuthorizationChanged,
}

/// Device location provider.
///
/// The session hands the source a [`LocationSink`] once, at construction.
/// Fixes, failures and permission changes are pushed into it from any
/// thread and applied on the session's next drain.
pub trait LocationSensorSource: Send {
    /// Keep `sink` for every later callback.
    fn connect(&mut self, sink: LocationSink);

    fn authorization_status(&self) -> AuthorizationStatus;

    /// Whether location services are enabled device-wide.
    fn services_enabled(&self) -> bool;

    /// Ask the user for permission. The answer arrives later as an
    /// authorization change.
    fn request_authorization(&mut self);

    fn start_updates(&mut self);

    fn stop_updates(&mut self);

    /// Minimum movement, in metres, before the source reports a new fix.
    fn set_distance_filter(&mut self, metres: f64);
}

/// Producer end of the location queue handed to a location source.
///
/// Never blocks: when the queue is full the update is dropped.
#[derive(Debug, Clone)]
pub struct LocationSink {
    tx: mpsc::Sender<LocationUpdate>,
}

impl LocationSink {
    pub(crate) fn new(tx: mpsc::Sender<LocationUpdate>) -> Self {
        Self { tx }
    }

    /// Offer one update to the session.
    ///
    /// # Returns
    ///
    /// `true` if the update was queued, `false` if the queue is full or the
    /// session is gone.
    pub fn deliver(&self, update: LocationUpdate) -> bool {
        self.tx.try_send(update).is_ok()
    }

    /// Whether the consuming session has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
