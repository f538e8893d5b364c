//! Scripted location source.

use std::sync::{Arc, Mutex};

use crate::error::SensorError;
use crate::geofence::{
    AuthorizationStatus, GeoPoint, LocationSensorSource, LocationSink, LocationUpdate,
};

#[derive(Debug)]
struct Inner {
    sink: Option<LocationSink>,
    authorization: AuthorizationStatus,
    services_enabled: bool,
    updating: bool,
    authorization_requests: usize,
    distance_filter: Option<f64>,
}

/// Location source whose permission, service state and fixes are scripted
/// by hand.
///
/// Clones share state, so a test can keep one handle after moving another
/// into a session.
#[derive(Debug, Clone)]
pub struct ScriptedLocationSource {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedLocationSource {
    pub fn new(authorization: AuthorizationStatus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sink: None,
                authorization,
                services_enabled: true,
                updating: false,
                authorization_requests: 0,
                distance_filter: None,
            })),
        }
    }

    pub fn authorized() -> Self {
        Self::new(AuthorizationStatus::Authorized)
    }

    /// Change the reported status without telling the session.
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.authorization = status;
        }
    }

    /// Change the status and notify the session, as the platform does
    /// when the user answers a permission prompt.
    pub fn change_authorization(&self, status: AuthorizationStatus) -> bool {
        self.set_authorization(status);
        self.deliver(LocationUpdate::AuthorizationChanged, false)
    }

    /// Push a fix. Dropped unless updates are running.
    pub fn push_fix(&self, point: GeoPoint) -> bool {
        self.deliver(LocationUpdate::Fix(point), true)
    }

    /// Push a failure. Dropped unless updates are running.
    pub fn push_error(&self, error: SensorError) -> bool {
        self.deliver(LocationUpdate::Error(error), true)
    }

    fn deliver(&self, update: LocationUpdate, needs_updates: bool) -> bool {
        let Ok(inner) = self.inner.lock() else {
            return false;
        };
        if needs_updates && !inner.updating {
            return false;
        }
        inner
            .sink
            .as_ref()
            .is_some_and(|sink| sink.deliver(update))
    }

    pub fn set_services_enabled(&self, enabled: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.services_enabled = enabled;
        }
    }

    pub fn is_updating(&self) -> bool {
        self.inner.lock().map(|inner| inner.updating).unwrap_or(false)
    }

    pub fn authorization_requests(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.authorization_requests)
            .unwrap_or(0)
    }

    pub fn distance_filter(&self) -> Option<f64> {
        self.inner.lock().ok().and_then(|inner| inner.distance_filter)
    }
}

impl LocationSensorSource for ScriptedLocationSource {
    fn connect(&mut self, sink: LocationSink) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sink = Some(sink);
        }
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.inner
            .lock()
            .map(|inner| inner.authorization)
            .unwrap_or(AuthorizationStatus::Unsupported)
    }

    fn services_enabled(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.services_enabled)
            .unwrap_or(false)
    }

    fn request_authorization(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.authorization_requests += 1;
        }
    }

    fn start_updates(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.updating = true;
        }
    }

    fn stop_updates(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.updating = false;
        }
    }

    fn set_distance_filter(&mut self, metres: f64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.distance_filter = Some(metres);
        }
    }
}
