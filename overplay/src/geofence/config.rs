//! Geofence configuration.

/// Default displacement that restarts playback, in metres.
pub const DEFAULT_DISTANCE_THRESHOLD_M: f64 = 10.0;

/// Geofence session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceConfig {
    /// Distance from the reference point that counts as displacement.
    ///
    /// Also used as the location source's minimum-distance filter.
    pub distance_threshold_m: f64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            distance_threshold_m: DEFAULT_DISTANCE_THRESHOLD_M,
        }
    }
}

impl GeofenceConfig {
    pub fn with_distance_threshold(mut self, metres: f64) -> Self {
        self.distance_threshold_m = metres;
        self
    }
}
