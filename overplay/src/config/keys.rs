//! Addressable configuration keys in `section.key` form.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::error::ConfigError;
use super::OverplayConfig;

/// Every setting the INI file and `config get|set` understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    MotionUpdateRateHz,
    MotionShakeWindow,
    MotionShakeStartThreshold,
    MotionShakeStopThreshold,
    MotionSampleQueueCapacity,
    GestureSeekThreshold,
    GestureVolumeThreshold,
    GestureSeekTimeScale,
    GestureVolumeScale,
    GestureTickRateHz,
    PlaybackSeekToleranceMs,
    PlaybackStartPlaying,
    GeofenceDistanceThresholdM,
}

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::MotionUpdateRateHz,
            ConfigKey::MotionShakeWindow,
            ConfigKey::MotionShakeStartThreshold,
            ConfigKey::MotionShakeStopThreshold,
            ConfigKey::MotionSampleQueueCapacity,
            ConfigKey::GestureSeekThreshold,
            ConfigKey::GestureVolumeThreshold,
            ConfigKey::GestureSeekTimeScale,
            ConfigKey::GestureVolumeScale,
            ConfigKey::GestureTickRateHz,
            ConfigKey::PlaybackSeekToleranceMs,
            ConfigKey::PlaybackStartPlaying,
            ConfigKey::GeofenceDistanceThresholdM,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::MotionUpdateRateHz => "motion.update_rate_hz",
            ConfigKey::MotionShakeWindow => "motion.shake_window",
            ConfigKey::MotionShakeStartThreshold => "motion.shake_start_threshold",
            ConfigKey::MotionShakeStopThreshold => "motion.shake_stop_threshold",
            ConfigKey::MotionSampleQueueCapacity => "motion.sample_queue_capacity",
            ConfigKey::GestureSeekThreshold => "gesture.seek_threshold",
            ConfigKey::GestureVolumeThreshold => "gesture.volume_threshold",
            ConfigKey::GestureSeekTimeScale => "gesture.seek_time_scale",
            ConfigKey::GestureVolumeScale => "gesture.volume_scale",
            ConfigKey::GestureTickRateHz => "gesture.tick_rate_hz",
            ConfigKey::PlaybackSeekToleranceMs => "playback.seek_tolerance_ms",
            ConfigKey::PlaybackStartPlaying => "playback.start_playing",
            ConfigKey::GeofenceDistanceThresholdM => "geofence.distance_threshold_m",
        }
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        self.split().0
    }

    /// Key within the section.
    pub fn key_name(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or(("", name))
    }

    /// Current value, formatted for display and for the INI file.
    pub fn get(&self, config: &OverplayConfig) -> String {
        match self {
            ConfigKey::MotionUpdateRateHz => format_number(rate_hz(config.motion.update_interval)),
            ConfigKey::MotionShakeWindow => config.motion.shake.window_size.to_string(),
            ConfigKey::MotionShakeStartThreshold => {
                format_number(config.motion.shake.start_threshold)
            }
            ConfigKey::MotionShakeStopThreshold => {
                format_number(config.motion.shake.stop_threshold)
            }
            ConfigKey::MotionSampleQueueCapacity => {
                config.motion.sample_queue_capacity.to_string()
            }
            ConfigKey::GestureSeekThreshold => format_number(config.gesture.seek_threshold),
            ConfigKey::GestureVolumeThreshold => format_number(config.gesture.volume_threshold),
            ConfigKey::GestureSeekTimeScale => format_number(config.gesture.seek_time_scale),
            ConfigKey::GestureVolumeScale => format_number(config.gesture.volume_scale),
            ConfigKey::GestureTickRateHz => format_number(rate_hz(config.tick_interval)),
            ConfigKey::PlaybackSeekToleranceMs => {
                format_number(config.playback.seek_tolerance.as_secs_f64() * 1000.0)
            }
            ConfigKey::PlaybackStartPlaying => config.playback.start_playing.to_string(),
            ConfigKey::GeofenceDistanceThresholdM => {
                format_number(config.geofence.distance_threshold_m)
            }
        }
    }

    /// Parse `value` and store it.
    pub fn set(&self, config: &mut OverplayConfig, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::MotionUpdateRateHz => {
                config.motion.update_interval = interval_from_hz(self, value)?
            }
            ConfigKey::MotionShakeWindow => {
                config.motion.shake.window_size = parse_count(self, value)?
            }
            ConfigKey::MotionShakeStartThreshold => {
                config.motion.shake.start_threshold = parse_positive(self, value)?
            }
            ConfigKey::MotionShakeStopThreshold => {
                config.motion.shake.stop_threshold = parse_positive(self, value)?
            }
            ConfigKey::MotionSampleQueueCapacity => {
                config.motion.sample_queue_capacity = parse_count(self, value)?
            }
            ConfigKey::GestureSeekThreshold => {
                config.gesture.seek_threshold = parse_positive(self, value)?
            }
            ConfigKey::GestureVolumeThreshold => {
                config.gesture.volume_threshold = parse_positive(self, value)?
            }
            ConfigKey::GestureSeekTimeScale => {
                config.gesture.seek_time_scale = parse_positive(self, value)?
            }
            ConfigKey::GestureVolumeScale => {
                config.gesture.volume_scale = parse_positive(self, value)?
            }
            ConfigKey::GestureTickRateHz => config.tick_interval = interval_from_hz(self, value)?,
            ConfigKey::PlaybackSeekToleranceMs => {
                let ms = parse_number(self, value)?;
                if ms < 0.0 {
                    return Err(invalid(self, value, "must not be negative"));
                }
                config.playback.seek_tolerance = Duration::try_from_secs_f64(ms / 1000.0)
                    .map_err(|_| invalid(self, value, "too large"))?;
            }
            ConfigKey::PlaybackStartPlaying => {
                config.playback.start_playing = parse_bool(self, value)?
            }
            ConfigKey::GeofenceDistanceThresholdM => {
                config.geofence.distance_threshold_m = parse_positive(self, value)?
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

fn invalid(key: &ConfigKey, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.name().to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number(key: &ConfigKey, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(invalid(key, value, "expected a number")),
    }
}

fn parse_positive(key: &ConfigKey, value: &str) -> Result<f64, ConfigError> {
    let number = parse_number(key, value)?;
    if number <= 0.0 {
        return Err(invalid(key, value, "must be positive"));
    }
    Ok(number)
}

fn parse_count(key: &ConfigKey, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(invalid(key, value, "expected a whole number of at least 1")),
    }
}

fn parse_bool(key: &ConfigKey, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn interval_from_hz(key: &ConfigKey, value: &str) -> Result<Duration, ConfigError> {
    let hz = parse_positive(key, value)?;
    match Duration::try_from_secs_f64(1.0 / hz) {
        Ok(interval) if !interval.is_zero() => Ok(interval),
        Ok(_) => Err(invalid(key, value, "too high")),
        Err(_) => Err(invalid(key, value, "too low")),
    }
}

fn rate_hz(interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs > 0.0 {
        1.0 / secs
    } else {
        0.0
    }
}

/// Round to three decimals and drop trailing zeros.
fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
            assert_eq!(format!("{}.{}", key.section(), key.key_name()), key.name());
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            "motion.nope".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_default_values_format() {
        let config = OverplayConfig::default();
        assert_eq!(ConfigKey::MotionUpdateRateHz.get(&config), "120");
        assert_eq!(ConfigKey::GestureTickRateHz.get(&config), "60");
        assert_eq!(ConfigKey::PlaybackSeekToleranceMs.get(&config), "33");
        assert_eq!(ConfigKey::MotionShakeStartThreshold.get(&config), "1.2");
        assert_eq!(ConfigKey::PlaybackStartPlaying.get(&config), "true");
        assert_eq!(ConfigKey::GeofenceDistanceThresholdM.get(&config), "10");
    }

    #[test]
    fn test_set_values() {
        let mut config = OverplayConfig::default();
        ConfigKey::GestureVolumeThreshold
            .set(&mut config, "0.13")
            .unwrap();
        ConfigKey::PlaybackStartPlaying.set(&mut config, "no").unwrap();
        ConfigKey::MotionUpdateRateHz.set(&mut config, "100").unwrap();

        assert_eq!(config.gesture.volume_threshold, 0.13);
        assert!(!config.playback.start_playing);
        assert_eq!(config.motion.update_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = OverplayConfig::default();
        assert!(matches!(
            ConfigKey::MotionShakeWindow.set(&mut config, "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(ConfigKey::GeofenceDistanceThresholdM
            .set(&mut config, "far")
            .is_err());
        assert!(ConfigKey::PlaybackStartPlaying
            .set(&mut config, "maybe")
            .is_err());
        assert!(ConfigKey::GestureTickRateHz.set(&mut config, "-60").is_err());
        assert_eq!(config, OverplayConfig::default());
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        let mut config = OverplayConfig::default();
        for (key, value) in [
            (ConfigKey::MotionUpdateRateHz, "1e-30"),
            (ConfigKey::MotionUpdateRateHz, "1e300"),
            (ConfigKey::GestureTickRateHz, "1e-30"),
            (ConfigKey::PlaybackSeekToleranceMs, "1e300"),
        ] {
            assert!(
                matches!(key.set(&mut config, value), Err(ConfigError::InvalidValue { .. })),
                "{} = {} should be rejected",
                key,
                value
            );
        }
        assert_eq!(config, OverplayConfig::default());
    }

    #[test]
    fn test_out_of_range_duration_in_file_is_an_error() {
        let result = OverplayConfig::from_ini_str("[playback]\nseek_tolerance_ms = 1e300\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
