//! Motion session configuration.

use std::time::Duration;

use crate::attitude::ShakeConfig;

/// Default sensor sampling interval (120 Hz).
pub const DEFAULT_MOTION_UPDATE_INTERVAL: Duration = Duration::from_nanos(8_333_333);

/// Default raw sample queue depth: a single slot, newest sample wins only
/// when the worker is idle.
pub const DEFAULT_SAMPLE_QUEUE_CAPACITY: usize = 1;

/// Motion session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Interval requested from the motion source.
    pub update_interval: Duration,

    /// Shake detector tuning.
    pub shake: ShakeConfig,

    /// Capacity of the raw sample queue between source and worker.
    pub sample_queue_capacity: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_MOTION_UPDATE_INTERVAL,
            shake: ShakeConfig::default(),
            sample_queue_capacity: DEFAULT_SAMPLE_QUEUE_CAPACITY,
        }
    }
}

impl MotionConfig {
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    pub fn with_shake(mut self, shake: ShakeConfig) -> Self {
        self.shake = shake;
        self
    }

    pub fn with_sample_queue_capacity(mut self, capacity: usize) -> Self {
        self.sample_queue_capacity = capacity;
        self
    }

    /// Sampling rate in Hz implied by `update_interval`.
    pub fn update_rate_hz(&self) -> f64 {
        let secs = self.update_interval.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::default();
        assert!((config.update_rate_hz() - 120.0).abs() < 1e-3);
        assert_eq!(config.sample_queue_capacity, 1);
        assert_eq!(config.shake.window_size, 60);
    }

    #[test]
    fn test_builder() {
        let config = MotionConfig::default()
            .with_update_interval(Duration::from_millis(10))
            .with_sample_queue_capacity(8);
        assert!((config.update_rate_hz() - 100.0).abs() < 1e-9);
        assert_eq!(config.sample_queue_capacity, 8);
    }
}
