//! Playback command sequencing.
//!
//! # State Machine
//!
//! ```text
//! Playing --[Seek(t)]--------------> Seeking(t)
//! Playing --[shake began]----------> Shaken
//! Seeking --[Seek(t')]-------------> Seeking(t')      (coalesced)
//! Seeking --[Volume / Neutral]-----> Playing
//! Seeking --[shake began]----------> Shaken
//! Shaken  --[shake ended]----------> Playing          (toggles play/pause)
//! ```
//!
//! The [`PlaybackSequencer`] is a pure state machine producing
//! [`TransportCommand`]s. The [`PlaybackController`] owns the
//! [`MediaTransport`], runs the gesture interpreter every tick and applies
//! the commands.

mod config;
mod controller;
mod indicator;
mod sequencer;
mod transport;

pub use config::{SequencerConfig, DEFAULT_SEEK_TOLERANCE};
pub use controller::{PlaybackController, PlaybackEvent, PLAYBACK_EVENT_CAPACITY};
pub use indicator::{progress, PlayerIndicator};
pub use sequencer::{
    PlaybackSequencer, SeekState, SequencerInput, SequencerPhase, SequencerState,
    TransportCommand, TransportSnapshot,
};
pub use transport::{
    MediaTransport, SeekCompletion, SeekRequest, SeekTicket, TimeControlStatus, TransportStatus,
};
