//! Runtime error types reported on component event streams.
//!
//! None of these are returned across a component boundary as `Err`. Sensor
//! and transport failures travel as events so the application decides what
//! the user sees.

use thiserror::Error;

/// A failure reported by a sensor source for a single callback.
///
/// Cloneable so it can ride broadcast event streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The motion source failed to deliver a sample.
    #[error("Motion update failed: {0}")]
    MotionUpdate(String),

    /// The location source failed to deliver a fix.
    #[error("Location update failed: {0}")]
    LocationUpdate(String),
}

/// A playback failure reported by the media transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport could not decode or play the media.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}
