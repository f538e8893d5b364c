//! Configuration for the whole gesture playback stack.
//!
//! Every component config has defaults matching the tuned values, so
//! `OverplayConfig::default()` is a working setup. The config can be
//! persisted as INI:
//!
//! ```ini
//! [motion]
//! update_rate_hz = 120
//! shake_window = 60
//! shake_start_threshold = 1.2
//! shake_stop_threshold = 0.9
//! sample_queue_capacity = 1
//!
//! [gesture]
//! seek_threshold = 0.5
//! volume_threshold = 0.1
//! seek_time_scale = 0.7
//! volume_scale = 0.1
//! tick_rate_hz = 60
//!
//! [playback]
//! seek_tolerance_ms = 33
//! start_playing = true
//!
//! [geofence]
//! distance_threshold_m = 10
//! ```

mod error;
mod file;
mod keys;

use std::time::Duration;

pub use error::ConfigError;
pub use file::{config_directory, config_file_path, CONFIG_FILE_NAME};
pub use keys::ConfigKey;

use crate::geofence::GeofenceConfig;
use crate::gesture::GestureConfig;
use crate::motion::MotionConfig;
use crate::playback::SequencerConfig;

/// Default render tick interval (60 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverplayConfig {
    pub motion: MotionConfig,
    pub gesture: GestureConfig,
    pub playback: SequencerConfig,
    pub geofence: GeofenceConfig,

    /// Interval between gesture interpretation ticks.
    pub tick_interval: Duration,
}

impl Default for OverplayConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            gesture: GestureConfig::default(),
            playback: SequencerConfig::default(),
            geofence: GeofenceConfig::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl OverplayConfig {
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn with_playback(mut self, playback: SequencerConfig) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_geofence(mut self, geofence: GeofenceConfig) -> Self {
        self.geofence = geofence;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shake = &self.motion.shake;
        if shake.window_size == 0 {
            return Err(ConfigError::Invalid(
                "motion.shake_window must be at least 1".to_string(),
            ));
        }
        if shake.start_threshold <= shake.stop_threshold {
            return Err(ConfigError::Invalid(format!(
                "motion.shake_start_threshold ({}) must be greater than motion.shake_stop_threshold ({})",
                shake.start_threshold, shake.stop_threshold
            )));
        }
        if self.motion.update_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "motion.update_rate_hz must be positive".to_string(),
            ));
        }
        if self.motion.sample_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "motion.sample_queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "gesture.tick_rate_hz must be positive".to_string(),
            ));
        }
        if self.geofence.distance_threshold_m <= 0.0 {
            return Err(ConfigError::Invalid(
                "geofence.distance_threshold_m must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attitude::ShakeConfig;

    #[test]
    fn test_default_is_valid() {
        assert!(OverplayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = OverplayConfig::default().with_motion(MotionConfig::default().with_shake(
            ShakeConfig {
                start_threshold: 0.8,
                stop_threshold: 0.9,
                ..Default::default()
            },
        ));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shake_start_threshold"));
    }

    #[test]
    fn test_zero_queue_rejected() {
        let config = OverplayConfig::default()
            .with_motion(MotionConfig::default().with_sample_queue_capacity(0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_distance_rejected() {
        let config = OverplayConfig::default()
            .with_geofence(GeofenceConfig::default().with_distance_threshold(0.0));
        assert!(config.validate().is_err());
    }
}
