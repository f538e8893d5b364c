//! Geofence session.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::sync::{broadcast, watch};

use crate::error::SensorError;
use crate::log::SharedLogger;
use crate::telemetry::ControlMetrics;

use super::config::GeofenceConfig;
use super::point::GeoPoint;
use super::source::{
    AuthorizationStatus, LocationSensorSource, LocationSink, LocationUpdate,
    LOCATION_QUEUE_CAPACITY,
};
use super::state::{
    GeofenceCommand, GeofenceContext, GeofenceInput, GeofenceSessionState, GeofenceState,
    UnavailableReason,
};

const COMPONENT: &str = "geofence";

/// Capacity of the geofence event broadcast channel.
pub const GEOFENCE_EVENT_CAPACITY: usize = 16;

/// Events published by the geofence.
#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceEvent {
    /// The device moved at least the threshold from the reference point.
    /// The reference is now the new position.
    DisplacementExceeded { distance_m: f64 },

    /// The location source reported a failure.
    Error(SensorError),
}

/// Owns a location source and reports displacement while active.
pub struct GeofenceSession<L: LocationSensorSource> {
    source: L,
    config: GeofenceConfig,
    logger: SharedLogger,
    metrics: Arc<ControlMetrics>,
    state: GeofenceState,
    monitoring_requested: bool,
    state_tx: watch::Sender<GeofenceSessionState>,
    events_tx: broadcast::Sender<GeofenceEvent>,
    updates_rx: mpsc::Receiver<LocationUpdate>,
}

impl<L: LocationSensorSource> GeofenceSession<L> {
    /// Create a session, connect the source's sink and configure its
    /// distance filter.
    ///
    /// Starts `Unavailable` when location services are disabled.
    pub fn new(
        mut source: L,
        config: GeofenceConfig,
        logger: SharedLogger,
        metrics: Arc<ControlMetrics>,
    ) -> Self {
        let (updates_tx, updates_rx) = mpsc::channel(LOCATION_QUEUE_CAPACITY);
        source.connect(LocationSink::new(updates_tx));
        source.set_distance_filter(config.distance_threshold_m);

        let state = if source.services_enabled() {
            GeofenceState::Initializing
        } else {
            logger.error(COMPONENT, "Location services disabled");
            GeofenceState::Unavailable(UnavailableReason::ServicesDisabled)
        };

        let (state_tx, _) = watch::channel(state.published());
        let (events_tx, _) = broadcast::channel(GEOFENCE_EVENT_CAPACITY);

        Self {
            source,
            config,
            logger,
            metrics,
            state,
            monitoring_requested: false,
            state_tx,
            events_tx,
            updates_rx,
        }
    }

    /// Request monitoring. The first call also evaluates authorization.
    pub fn start(&mut self) {
        self.monitoring_requested = true;
        let authorization = self.source.authorization_status();
        self.apply(GeofenceInput::Start { authorization });
    }

    /// Stop monitoring. Remembered if authorization is still pending.
    pub fn stop(&mut self) {
        self.monitoring_requested = false;
        self.apply(GeofenceInput::Stop);
    }

    /// Authorization changed; re-read it from the source.
    pub fn invalidate(&mut self) {
        let status = self.source.authorization_status();
        if status == AuthorizationStatus::Unsupported {
            self.logger
                .warn(COMPONENT, "Unsupported authorization status, ignoring");
        }
        self.apply(GeofenceInput::AuthorizationChanged(status));
    }

    /// A new position fix from the location source.
    pub fn handle_location(&mut self, point: GeoPoint) {
        self.apply(GeofenceInput::LocationUpdated(point));
    }

    /// The location source failed to produce a fix.
    pub fn handle_location_error(&mut self, error: SensorError) {
        self.logger.warn(COMPONENT, &error.to_string());
        let _ = self.events_tx.send(GeofenceEvent::Error(error));
    }

    /// Apply everything the source has pushed since the last drain.
    ///
    /// # Returns
    ///
    /// The number of updates applied.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.updates_rx.try_recv() {
                Ok(LocationUpdate::Fix(point)) => self.handle_location(point),
                Ok(LocationUpdate::Error(error)) => self.handle_location_error(error),
                Ok(LocationUpdate::AuthorizationChanged) => self.invalidate(),
                // The sender lives in the source, which this session owns
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
            applied += 1;
        }
        applied
    }

    pub fn state(&self) -> GeofenceSessionState {
        self.state.published()
    }

    /// Full state, including the unavailable reason and reference point.
    pub fn detailed_state(&self) -> GeofenceState {
        self.state
    }

    pub fn reference(&self) -> Option<GeoPoint> {
        self.state.reference()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<GeofenceSessionState> {
        self.state_tx.subscribe()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GeofenceEvent> {
        self.events_tx.subscribe()
    }

    pub fn config(&self) -> &GeofenceConfig {
        &self.config
    }

    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    fn apply(&mut self, input: GeofenceInput) {
        let context = GeofenceContext {
            monitoring_requested: self.monitoring_requested,
            distance_threshold_m: self.config.distance_threshold_m,
        };
        let previous = self.state;
        let (next, commands) = previous.transition(input, &context);
        self.state = next;

        for command in commands {
            self.execute(command);
        }

        if previous.published() != next.published() {
            self.log_entry(next);
            self.state_tx.send_replace(next.published());
        }
    }

    fn execute(&mut self, command: GeofenceCommand) {
        match command {
            GeofenceCommand::RequestAuthorization => self.source.request_authorization(),
            GeofenceCommand::StartUpdates => self.source.start_updates(),
            GeofenceCommand::StopUpdates => self.source.stop_updates(),
            GeofenceCommand::DisplacementExceeded { distance_m } => {
                self.metrics.displacement_detected();
                self.logger.info(
                    COMPONENT,
                    &format!("Displacement of {:.1} m exceeded threshold", distance_m),
                );
                let _ = self
                    .events_tx
                    .send(GeofenceEvent::DisplacementExceeded { distance_m });
            }
        }
    }

    fn log_entry(&self, state: GeofenceState) {
        match state {
            GeofenceState::Unavailable(UnavailableReason::PermissionDenied) => {
                self.logger.warn(COMPONENT, "Location permission denied")
            }
            GeofenceState::Unavailable(UnavailableReason::ServicesDisabled) => {
                self.logger.error(COMPONENT, "Location services disabled")
            }
            GeofenceState::Authorizing => {
                self.logger.debug(COMPONENT, "Requesting location authorization")
            }
            GeofenceState::Active { .. } => self.logger.debug(COMPONENT, "Geofence active"),
            GeofenceState::Inactive => self.logger.debug(COMPONENT, "Geofence inactive"),
            GeofenceState::Initializing => {}
        }
    }
}

impl<L: LocationSensorSource> Drop for GeofenceSession<L> {
    fn drop(&mut self) {
        if self.state.is_active() {
            self.source.stop_updates();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, MemoryLogger, NoOpLogger};
    use crate::sim::ScriptedLocationSource;

    fn session(source: ScriptedLocationSource) -> GeofenceSession<ScriptedLocationSource> {
        GeofenceSession::new(
            source,
            GeofenceConfig::default(),
            Arc::new(NoOpLogger),
            Arc::new(ControlMetrics::new()),
        )
    }

    fn drain(rx: &mut broadcast::Receiver<GeofenceEvent>) -> Vec<GeofenceEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_construction_sets_distance_filter() {
        let source = ScriptedLocationSource::authorized();
        let session = session(source.clone());
        assert_eq!(session.state(), GeofenceSessionState::Initializing);
        assert_eq!(source.distance_filter(), Some(10.0));
    }

    #[test]
    fn test_services_disabled_at_construction() {
        let source = ScriptedLocationSource::authorized();
        source.set_services_enabled(false);
        let mut session = session(source.clone());
        assert_eq!(
            session.detailed_state(),
            GeofenceState::Unavailable(UnavailableReason::ServicesDisabled)
        );

        session.start();
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Unavailable);
        assert!(!source.is_updating());
    }

    #[test]
    fn test_start_authorized_goes_active() {
        let source = ScriptedLocationSource::authorized();
        let mut session = session(source.clone());
        session.start();
        assert_eq!(session.state(), GeofenceSessionState::Active);
        assert!(source.is_updating());
        assert_eq!(session.reference(), None);
    }

    #[test]
    fn test_authorization_flow() {
        let source = ScriptedLocationSource::new(AuthorizationStatus::NotDetermined);
        let mut session = session(source.clone());
        session.start();
        assert_eq!(session.state(), GeofenceSessionState::Authorizing);
        assert_eq!(source.authorization_requests(), 1);

        source.set_authorization(AuthorizationStatus::Authorized);
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Active);
        assert!(source.is_updating());
    }

    #[test]
    fn test_stop_during_authorization_lands_inactive() {
        let source = ScriptedLocationSource::new(AuthorizationStatus::NotDetermined);
        let mut session = session(source.clone());
        session.start();
        session.stop();
        assert_eq!(session.state(), GeofenceSessionState::Authorizing);

        source.set_authorization(AuthorizationStatus::Authorized);
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Inactive);
        assert!(!source.is_updating());
    }

    #[test]
    fn test_denied_then_granted() {
        let source = ScriptedLocationSource::new(AuthorizationStatus::Denied);
        let mut session = session(source.clone());
        session.start();
        assert_eq!(session.state(), GeofenceSessionState::Unavailable);

        source.set_authorization(AuthorizationStatus::NotDetermined);
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Unavailable);

        source.set_authorization(AuthorizationStatus::Authorized);
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Active);
    }

    #[test]
    fn test_points_within_threshold_emit_nothing() {
        let source = ScriptedLocationSource::authorized();
        let mut session = session(source);
        let mut events = session.subscribe();
        session.start();

        let origin = GeoPoint::new(-33.92, 18.42);
        session.handle_location(origin);
        for metres in [1.0, 4.0, 7.5, 9.9, 3.0] {
            session.handle_location(origin.offset_north(metres));
        }
        assert!(drain(&mut events).is_empty());
        assert_eq!(session.reference(), Some(origin));
    }

    #[test]
    fn test_one_point_beyond_threshold_emits_once() {
        let source = ScriptedLocationSource::authorized();
        let metrics = Arc::new(ControlMetrics::new());
        let mut session = GeofenceSession::new(
            source,
            GeofenceConfig::default(),
            Arc::new(NoOpLogger),
            metrics.clone(),
        );
        let mut events = session.subscribe();
        session.start();

        let origin = GeoPoint::new(48.85, 2.35);
        let far = origin.offset_north(15.0);
        session.handle_location(origin);
        session.handle_location(far);

        let events = drain(&mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GeofenceEvent::DisplacementExceeded { distance_m } if (distance_m - 15.0).abs() < 1e-6
        ));
        assert_eq!(session.reference(), Some(far));
        assert_eq!(metrics.snapshot().displacement_events, 1);
    }

    #[test]
    fn test_reentering_active_resets_reference() {
        let source = ScriptedLocationSource::authorized();
        let mut session = session(source);
        session.start();
        session.handle_location(GeoPoint::new(1.0, 1.0));
        assert!(session.reference().is_some());

        session.stop();
        session.start();
        assert_eq!(session.reference(), None);
    }

    #[test]
    fn test_unsupported_status_logged_and_ignored() {
        let source = ScriptedLocationSource::authorized();
        let logger = Arc::new(MemoryLogger::new());
        let mut session = GeofenceSession::new(
            source.clone(),
            GeofenceConfig::default(),
            logger.clone(),
            Arc::new(ControlMetrics::new()),
        );
        session.start();

        source.set_authorization(AuthorizationStatus::Unsupported);
        session.invalidate();
        assert_eq!(session.state(), GeofenceSessionState::Active);
        assert_eq!(logger.count_at(LogLevel::Warn), 1);
    }

    #[test]
    fn test_pushed_updates_applied_on_drain() {
        let source = ScriptedLocationSource::new(AuthorizationStatus::NotDetermined);
        let mut session = session(source.clone());
        let mut events = session.subscribe();
        session.start();
        assert_eq!(session.state(), GeofenceSessionState::Authorizing);

        // Fixes are refused until updates run
        let origin = GeoPoint::new(40.71, -74.0);
        assert!(!source.push_fix(origin));

        assert!(source.change_authorization(AuthorizationStatus::Authorized));
        assert_eq!(session.state(), GeofenceSessionState::Authorizing);
        assert_eq!(session.drain_updates(), 1);
        assert_eq!(session.state(), GeofenceSessionState::Active);

        assert!(source.push_fix(origin));
        assert!(source.push_fix(origin.offset_north(12.0)));
        assert!(source.push_error(SensorError::LocationUpdate("no fix".into())));
        assert!(drain(&mut events).is_empty());

        assert_eq!(session.drain_updates(), 3);
        let events = drain(&mut events);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GeofenceEvent::DisplacementExceeded { .. }));
        assert!(matches!(events[1], GeofenceEvent::Error(_)));
        assert_eq!(session.drain_updates(), 0);
    }

    #[test]
    fn test_state_stream() {
        let source = ScriptedLocationSource::authorized();
        let mut session = session(source);
        let mut states = session.subscribe_state();
        session.start();
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), GeofenceSessionState::Active);
    }

    #[test]
    fn test_drop_stops_updates() {
        let source = ScriptedLocationSource::authorized();
        {
            let mut session = session(source.clone());
            session.start();
            assert!(source.is_updating());
        }
        assert!(!source.is_updating());
    }
}
