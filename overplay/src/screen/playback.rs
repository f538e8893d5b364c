//! The playback screen.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::SensorError;
use crate::geofence::{GeoPoint, GeofenceEvent, GeofenceSession, LocationSensorSource};
use crate::gesture::GestureIntent;
use crate::log::SharedLogger;
use crate::motion::{MotionEvent, MotionSensorSource, MotionSession};
use crate::playback::{MediaTransport, PlaybackController};
use crate::telemetry::{ControlMetrics, ControlSnapshot};

const COMPONENT: &str = "screen";

/// Owns the motion session, the geofence session and the playback
/// controller for one visible video.
pub struct PlaybackScreen<T, M, L>
where
    T: MediaTransport,
    M: MotionSensorSource,
    L: LocationSensorSource,
{
    motion: MotionSession<M>,
    geofence: GeofenceSession<L>,
    controller: PlaybackController<T>,
    motion_events: broadcast::Receiver<MotionEvent>,
    geofence_events: broadcast::Receiver<GeofenceEvent>,
    tick_interval: Duration,
    logger: SharedLogger,
    metrics: Arc<ControlMetrics>,
    visible: bool,
}

impl<T, M, L> PlaybackScreen<T, M, L>
where
    T: MediaTransport,
    M: MotionSensorSource,
    L: LocationSensorSource,
{
    pub(crate) fn new(
        motion: MotionSession<M>,
        geofence: GeofenceSession<L>,
        controller: PlaybackController<T>,
        tick_interval: Duration,
        logger: SharedLogger,
        metrics: Arc<ControlMetrics>,
    ) -> Self {
        let motion_events = motion.subscribe();
        let geofence_events = geofence.subscribe();
        Self {
            motion,
            geofence,
            controller,
            motion_events,
            geofence_events,
            tick_interval,
            logger,
            metrics,
            visible: false,
        }
    }

    /// The screen became visible: start sensing and allow playback.
    pub fn appear(&mut self) {
        self.logger.debug(COMPONENT, "Screen appeared");
        self.visible = true;
        // Events left over from the previous visit describe a stopped stream
        self.motion_events = self.motion.subscribe();
        self.motion.start();
        self.geofence.start();
        self.controller.set_active(true);
    }

    /// The screen was hidden: pause playback and release the sensors.
    pub fn disappear(&mut self) {
        self.logger.debug(COMPONENT, "Screen disappeared");
        self.visible = false;
        self.controller.set_active(false);
        self.motion.stop();
        self.controller.motion_stopped();
        self.geofence.stop();
    }

    /// Apply pending session events and queued location updates, then run
    /// one controller tick.
    pub fn tick(&mut self) -> GestureIntent {
        loop {
            match self.motion_events.try_recv() {
                Ok(event) => self.controller.handle_motion_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    self.logger.trace(
                        COMPONENT,
                        &format!("Motion events lagged by {} messages", skipped),
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        self.geofence.drain_updates();
        loop {
            match self.geofence_events.try_recv() {
                Ok(event) => self.controller.handle_geofence_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    self.logger.warn(
                        COMPONENT,
                        &format!("Geofence events lagged by {} messages", skipped),
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        self.controller.tick()
    }

    /// Apply a location fix immediately, bypassing the source's queue.
    pub fn handle_location(&mut self, point: GeoPoint) {
        self.geofence.handle_location(point);
    }

    pub fn handle_location_error(&mut self, error: SensorError) {
        self.geofence.handle_location_error(error);
    }

    /// Location permission changed.
    pub fn invalidate_authorization(&mut self) {
        self.geofence.invalidate();
    }

    /// Tick at the configured interval until `cancel` fires.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    self.logger.debug(COMPONENT, "Tick loop shutting down");
                    break;
                }

                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn motion(&self) -> &MotionSession<M> {
        &self.motion
    }

    pub fn geofence(&self) -> &GeofenceSession<L> {
        &self.geofence
    }

    pub fn controller(&self) -> &PlaybackController<T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<T> {
        &mut self.controller
    }

    pub fn transport(&self) -> &T {
        self.controller.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.controller.transport_mut()
    }

    pub fn metrics(&self) -> ControlSnapshot {
        self.metrics.snapshot()
    }
}
