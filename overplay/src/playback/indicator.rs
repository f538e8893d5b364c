//! Loading / failed / ready indicator and playback progress.

use serde::Serialize;

use super::transport::{TimeControlStatus, TransportStatus};

/// What the screen should show over the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerIndicator {
    /// Media not ready yet, or the transport is buffering.
    Loading,
    Failed,
    Ready,
}

impl PlayerIndicator {
    /// Derive the indicator from the transport's two status values.
    ///
    /// Unsupported values read as `Loading`.
    pub fn from_status(status: &TransportStatus, time_control: TimeControlStatus) -> Self {
        match status {
            TransportStatus::Failed(_) => PlayerIndicator::Failed,
            TransportStatus::Unknown | TransportStatus::Unsupported => PlayerIndicator::Loading,
            TransportStatus::ReadyToPlay => match time_control {
                TimeControlStatus::Playing | TimeControlStatus::Paused => PlayerIndicator::Ready,
                TimeControlStatus::WaitingToPlay | TimeControlStatus::Unsupported => {
                    PlayerIndicator::Loading
                }
            },
        }
    }
}

/// Fraction of the media played, in `0.0..=1.0`. Zero when the duration is
/// unknown.
pub fn progress(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 && duration.is_finite() && current_time.is_finite() {
        (current_time / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
