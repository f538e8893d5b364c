//! OverPlay - tilt and shake playback control
//!
//! This library turns noisy device sensor streams (attitude, acceleration and
//! location) into discrete playback commands for a media transport:
//!
//! - tilt left/right to scrub through the video
//! - tilt forward/back to change the volume
//! - shake to pause or resume
//! - walk away from where playback started to restart it
//!
//! # Architecture
//!
//! ```text
//! MotionSensorSource ──► MotionSession ──► MotionEvent ─┐
//!   (AttitudeFilter on a worker task)                    │
//!                                                        ▼
//!                                   GestureInterpreter (per tick)
//!                                                        │ GestureIntent
//!                                                        ▼
//! LocationSensorSource ──► GeofenceSession ──► PlaybackSequencer ──► MediaTransport
//!                         (displacement → restart)
//! ```
//!
//! The real sensors and the media transport are external collaborators,
//! reached through the [`motion::MotionSensorSource`],
//! [`geofence::LocationSensorSource`] and [`playback::MediaTransport`] traits.
//! [`screen::PlaybackScreen`] wires everything together.

pub mod attitude;
pub mod config;
pub mod error;
pub mod geofence;
pub mod gesture;
pub mod log;
pub mod motion;
pub mod playback;
pub mod screen;
pub mod sim;
pub mod telemetry;

pub use config::OverplayConfig;
pub use error::{SensorError, TransportError};
pub use screen::{PlaybackScreen, PlaybackScreenBuilder};
