//! Sequencer configuration.

use std::time::Duration;

/// Default seek tolerance on each side of the target.
pub const DEFAULT_SEEK_TOLERANCE: Duration = Duration::from_millis(33);

/// Playback sequencer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    /// How far before or after the target a seek may land.
    pub seek_tolerance: Duration,

    /// Initial play/pause flag.
    pub start_playing: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            seek_tolerance: DEFAULT_SEEK_TOLERANCE,
            start_playing: true,
        }
    }
}

impl SequencerConfig {
    pub fn with_seek_tolerance(mut self, tolerance: Duration) -> Self {
        self.seek_tolerance = tolerance;
        self
    }

    pub fn with_start_playing(mut self, playing: bool) -> Self {
        self.start_playing = playing;
        self
    }
}
