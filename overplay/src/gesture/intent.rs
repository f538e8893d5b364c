//! Gesture intents and the playhead they are computed against.

use serde::Serialize;

/// What the user is asking for on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GestureIntent {
    /// Move the playhead to this time, in seconds.
    Seek(f64),
    /// Change the volume by this amount.
    VolumeAdjust(f32),
    Neutral,
}

impl GestureIntent {
    pub fn is_seek(&self) -> bool {
        matches!(self, GestureIntent::Seek(_))
    }
}

/// Current position and length of the media, in seconds.
///
/// Non-finite or negative values read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Playhead {
    pub current_time: f64,
    pub duration: f64,
}

impl Playhead {
    pub fn new(current_time: f64, duration: f64) -> Self {
        Self {
            current_time: sanitize(current_time),
            duration: sanitize(duration),
        }
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playhead_sanitizes() {
        let playhead = Playhead::new(f64::NAN, -3.0);
        assert_eq!(playhead, Playhead::default());
        assert_eq!(Playhead::new(12.5, f64::INFINITY).duration, 0.0);
    }
}
