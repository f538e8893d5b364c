//! Composition root for one playback screen.
//!
//! A [`PlaybackScreen`] owns both sensor sessions and the playback
//! controller, routes session events into the controller and drives the
//! render tick.

mod builder;
mod playback;

pub use builder::{BuildError, PlaybackScreenBuilder};
pub use playback::PlaybackScreen;
