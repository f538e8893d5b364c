//! Point-in-time view of the control counters.

use std::fmt;

use serde::Serialize;

/// Copy of [`super::ControlMetrics`] at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlSnapshot {
    pub seeks_issued: u64,
    pub seeks_coalesced: u64,
    pub stale_seek_completions: u64,
    pub volume_changes: u64,
    pub rate_changes: u64,
    pub restarts: u64,
    pub shake_toggles: u64,
    pub motion_samples: u64,
    pub dropped_motion_samples: u64,
    pub motion_errors: u64,
    pub displacement_events: u64,
}

impl ControlSnapshot {
    /// Fraction of seek intents that did not turn into a transport seek.
    pub fn coalesce_ratio(&self) -> f64 {
        let total = self.seeks_issued + self.seeks_coalesced;
        if total == 0 {
            0.0
        } else {
            self.seeks_coalesced as f64 / total as f64
        }
    }
}

impl fmt::Display for ControlSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seeks: {} issued, {} coalesced, {} stale completions",
            self.seeks_issued, self.seeks_coalesced, self.stale_seek_completions
        )?;
        writeln!(
            f,
            "transport: {} rate changes, {} volume changes, {} restarts",
            self.rate_changes, self.volume_changes, self.restarts
        )?;
        writeln!(
            f,
            "motion: {} samples, {} dropped, {} errors, {} shake toggles",
            self.motion_samples, self.dropped_motion_samples, self.motion_errors, self.shake_toggles
        )?;
        write!(f, "geofence: {} displacement events", self.displacement_events)
    }
}
