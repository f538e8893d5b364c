//! Per-sample attitude filtering.
//!
//! Combines shake detection with roll/pitch extraction. While the device is
//! shaking, or the latest sample alone is strong enough to start a shake,
//! attitude is withheld so violent motion never reads as a tilt gesture.

use super::quaternion::AttitudeSample;
use super::sample::MotionSample;
use super::shake::{ShakeConfig, ShakeDetector};

/// What one raw sample produced.
///
/// When both are present, the shake edge is delivered first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterOutput {
    /// New shake state, only on a transition.
    pub shake_changed: Option<bool>,

    /// Roll and pitch, only when the device is steady.
    pub attitude: Option<AttitudeSample>,
}

impl FilterOutput {
    pub fn is_empty(&self) -> bool {
        self.shake_changed.is_none() && self.attitude.is_none()
    }
}

/// Turns raw motion samples into shake edges and steady attitude.
#[derive(Debug, Clone, Default)]
pub struct AttitudeFilter {
    shake: ShakeDetector,
}

impl AttitudeFilter {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            shake: ShakeDetector::new(config),
        }
    }

    pub fn process(&mut self, sample: &MotionSample) -> FilterOutput {
        let shake_changed = self.shake.update(sample.user_acceleration.magnitude());

        let steady = !self.shake.is_shaking() && !self.shake.is_shake_possible();
        let attitude = steady.then(|| sample.attitude.attitude());

        FilterOutput {
            shake_changed,
            attitude,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_shaking()
    }

    pub fn reset(&mut self) {
        self.shake.reset();
    }
}
