//! Lock-free counters for the gesture playback core.

use std::sync::atomic::{AtomicU64, Ordering};

use super::snapshot::ControlSnapshot;

/// Atomic counters shared by the sessions and the playback controller.
///
/// Typically held in an `Arc` and injected at construction.
#[derive(Debug, Default)]
pub struct ControlMetrics {
    seeks_issued: AtomicU64,
    seeks_coalesced: AtomicU64,
    stale_seek_completions: AtomicU64,
    volume_changes: AtomicU64,
    rate_changes: AtomicU64,
    restarts: AtomicU64,
    shake_toggles: AtomicU64,
    motion_samples: AtomicU64,
    dropped_motion_samples: AtomicU64,
    motion_errors: AtomicU64,
    displacement_events: AtomicU64,
}

impl ControlMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A seek command was sent to the transport.
    pub fn seek_issued(&self) {
        self.seeks_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// A seek intent was absorbed because a seek was in flight or the
    /// target had already been requested.
    pub fn seek_coalesced(&self) {
        self.seeks_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    /// A seek completion arrived for a seek that is no longer current.
    pub fn stale_seek_completion(&self) {
        self.stale_seek_completions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn volume_changed(&self) {
        self.volume_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rate_changed(&self) {
        self.rate_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn restarted(&self) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
    }

    /// Shake ended and play/pause was toggled.
    pub fn shake_toggled(&self) {
        self.shake_toggles.fetch_add(1, Ordering::Relaxed);
    }

    /// A raw motion sample was accepted into the sample queue.
    pub fn motion_sample_accepted(&self) {
        self.motion_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// A raw motion sample was dropped because the sample queue was full.
    pub fn motion_sample_dropped(&self) {
        self.dropped_motion_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn motion_error(&self) {
        self.motion_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn displacement_detected(&self) {
        self.displacement_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            seeks_issued: self.seeks_issued.load(Ordering::Relaxed),
            seeks_coalesced: self.seeks_coalesced.load(Ordering::Relaxed),
            stale_seek_completions: self.stale_seek_completions.load(Ordering::Relaxed),
            volume_changes: self.volume_changes.load(Ordering::Relaxed),
            rate_changes: self.rate_changes.load(Ordering::Relaxed),
            restarts: self.restarts.load(Ordering::Relaxed),
            shake_toggles: self.shake_toggles.load(Ordering::Relaxed),
            motion_samples: self.motion_samples.load(Ordering::Relaxed),
            dropped_motion_samples: self.dropped_motion_samples.load(Ordering::Relaxed),
            motion_errors: self.motion_errors.load(Ordering::Relaxed),
            displacement_events: self.displacement_events.load(Ordering::Relaxed),
        }
    }
}
