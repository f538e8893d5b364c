//! Builder for [`PlaybackScreen`].

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;

use crate::config::{ConfigError, OverplayConfig};
use crate::geofence::{GeofenceSession, LocationSensorSource};
use crate::log::{default_logger, SharedLogger};
use crate::motion::{MotionSensorSource, MotionSession};
use crate::playback::{MediaTransport, PlaybackController};
use crate::telemetry::ControlMetrics;

use super::playback::PlaybackScreen;

/// Why a screen could not be assembled.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No media transport provided")]
    MissingTransport,

    #[error("No motion source provided")]
    MissingMotionSource,

    #[error("No location source provided")]
    MissingLocationSource,

    #[error("No tokio runtime available for the motion worker")]
    NoRuntime,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Assembles a [`PlaybackScreen`] from its collaborators.
///
/// # Example
///
/// ```no_run
/// use overplay::sim::{ScriptedLocationSource, ScriptedMotionSource, SimulatedTransport};
/// use overplay::PlaybackScreenBuilder;
///
/// # async fn demo() -> Result<(), overplay::screen::BuildError> {
/// let mut screen = PlaybackScreenBuilder::new()
///     .with_transport(SimulatedTransport::new(120.0))
///     .with_motion_source(ScriptedMotionSource::new())
///     .with_location_source(ScriptedLocationSource::authorized())
///     .build()?;
///
/// screen.appear();
/// screen.tick();
/// # Ok(())
/// # }
/// ```
pub struct PlaybackScreenBuilder<T, M, L> {
    transport: Option<T>,
    motion_source: Option<M>,
    location_source: Option<L>,
    config: OverplayConfig,
    logger: Option<SharedLogger>,
    metrics: Option<Arc<ControlMetrics>>,
    runtime: Option<Handle>,
}

impl<T, M, L> Default for PlaybackScreenBuilder<T, M, L> {
    fn default() -> Self {
        Self {
            transport: None,
            motion_source: None,
            location_source: None,
            config: OverplayConfig::default(),
            logger: None,
            metrics: None,
            runtime: None,
        }
    }
}

impl<T, M, L> PlaybackScreenBuilder<T, M, L>
where
    T: MediaTransport,
    M: MotionSensorSource,
    L: LocationSensorSource,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_motion_source(mut self, source: M) -> Self {
        self.motion_source = Some(source);
        self
    }

    pub fn with_location_source(mut self, source: L) -> Self {
        self.location_source = Some(source);
        self
    }

    pub fn with_config(mut self, config: OverplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Defaults to [`TracingLogger`](crate::log::TracingLogger).
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ControlMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Runtime for the motion worker. Defaults to the current runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<PlaybackScreen<T, M, L>, BuildError> {
        self.config.validate()?;

        let transport = self.transport.ok_or(BuildError::MissingTransport)?;
        let motion_source = self.motion_source.ok_or(BuildError::MissingMotionSource)?;
        let location_source = self
            .location_source
            .ok_or(BuildError::MissingLocationSource)?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };
        let logger = self.logger.unwrap_or_else(default_logger);
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(ControlMetrics::new()));

        let config = self.config;
        let motion = MotionSession::new(
            motion_source,
            config.motion.clone(),
            logger.clone(),
            metrics.clone(),
            runtime,
        );
        let geofence = GeofenceSession::new(
            location_source,
            config.geofence.clone(),
            logger.clone(),
            metrics.clone(),
        );
        let controller = PlaybackController::new(
            transport,
            config.gesture.clone(),
            config.playback.clone(),
            logger.clone(),
            metrics.clone(),
        );

        Ok(PlaybackScreen::new(
            motion,
            geofence,
            controller,
            config.tick_interval,
            logger,
            metrics,
        ))
    }
}
