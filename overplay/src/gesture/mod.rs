//! Tilt gesture interpretation.
//!
//! Runs once per render tick against the latest steady attitude:
//!
//! ```text
//! seekInput   = roll (revolutions) × 4
//! volumeInput = pitch (revolutions) − ¼
//!
//! |seekInput|   > seek threshold    →  Seek(clamp(now + seekInput × 0.7, 0, duration))
//! |volumeInput| > volume threshold  →  VolumeAdjust(volumeInput × 0.1)
//! otherwise                         →  Neutral
//! ```
//!
//! Seek takes priority over volume.

mod config;
mod intent;
mod interpreter;

pub use config::{
    GestureConfig, GestureProfile, DEFAULT_SEEK_THRESHOLD, DEFAULT_SEEK_TIME_SCALE,
    DEFAULT_VOLUME_SCALE, DEFAULT_VOLUME_THRESHOLD, RELAXED_VOLUME_THRESHOLD,
};
pub use intent::{GestureIntent, Playhead};
pub use interpreter::{GestureInputs, GestureInterpreter};
