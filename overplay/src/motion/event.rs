//! Events published by a running motion session.

use crate::attitude::AttitudeSample;
use crate::error::SensorError;

/// Output of the motion worker, in the order the filter produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    /// Steady-device roll and pitch.
    Attitude(AttitudeSample),

    /// Debounced shake state flipped.
    ShakeChanged(bool),

    /// The source reported a failure for one callback. The session keeps
    /// running.
    Error(SensorError),
}
