//! Gesture thresholds and scales.

use std::fmt;
use std::str::FromStr;

/// `|seekInput|` above which a tilt is a seek.
pub const DEFAULT_SEEK_THRESHOLD: f64 = 0.5;

/// `|volumeInput|` above which a tilt adjusts volume.
pub const DEFAULT_VOLUME_THRESHOLD: f64 = 0.1;

/// Volume threshold of the relaxed profile.
pub const RELAXED_VOLUME_THRESHOLD: f64 = 0.13;

/// Seconds of media per unit of seek input.
pub const DEFAULT_SEEK_TIME_SCALE: f64 = 0.7;

/// Volume change per unit of volume input.
pub const DEFAULT_VOLUME_SCALE: f64 = 0.1;

/// Named volume sensitivity presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureProfile {
    #[default]
    Standard,
    /// Needs a slightly larger forward/back tilt before volume moves.
    Relaxed,
}

impl GestureProfile {
    pub fn volume_threshold(self) -> f64 {
        match self {
            GestureProfile::Standard => DEFAULT_VOLUME_THRESHOLD,
            GestureProfile::Relaxed => RELAXED_VOLUME_THRESHOLD,
        }
    }
}

impl fmt::Display for GestureProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureProfile::Standard => write!(f, "standard"),
            GestureProfile::Relaxed => write!(f, "relaxed"),
        }
    }
}

impl FromStr for GestureProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(GestureProfile::Standard),
            "relaxed" => Ok(GestureProfile::Relaxed),
            other => Err(format!(
                "unknown gesture profile '{}' (expected standard or relaxed)",
                other
            )),
        }
    }
}

/// Gesture interpreter tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    pub seek_threshold: f64,
    pub volume_threshold: f64,
    pub seek_time_scale: f64,
    pub volume_scale: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            seek_threshold: DEFAULT_SEEK_THRESHOLD,
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            seek_time_scale: DEFAULT_SEEK_TIME_SCALE,
            volume_scale: DEFAULT_VOLUME_SCALE,
        }
    }
}

impl GestureConfig {
    pub fn for_profile(profile: GestureProfile) -> Self {
        Self::default().with_profile(profile)
    }

    pub fn with_profile(mut self, profile: GestureProfile) -> Self {
        self.volume_threshold = profile.volume_threshold();
        self
    }

    pub fn with_seek_threshold(mut self, threshold: f64) -> Self {
        self.seek_threshold = threshold;
        self
    }

    pub fn with_volume_threshold(mut self, threshold: f64) -> Self {
        self.volume_threshold = threshold;
        self
    }
}
