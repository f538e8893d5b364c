//! Attitude filtering for motion gestures.
//!
//! Converts raw device-motion samples into the two signals the gesture layer
//! cares about:
//!
//! - **Attitude**: roll and pitch derived from the rotation quaternion
//! - **Shake**: a debounced boolean derived from a rolling window of
//!   acceleration magnitudes
//!
//! # Signal Flow
//!
//! ```text
//! MotionSample ──► |a| ──► ShakeDetector ──► shake edge (Some(bool))
//!      │                        │
//!      │                        └─ shaking or shake-possible? ─► suppress attitude
//!      ▼
//!  Quaternion ──► roll / pitch ──► AttitudeSample
//! ```
//!
//! Accelerometer noise corrupts the attitude estimate near shake onset, so an
//! attitude sample is only produced while the device is neither shaking nor
//! showing a single-sample spike above the shake start threshold.
//!
//! Everything here is pure: no I/O, no clocks. The motion session runs the
//! filter on its worker task.

mod angle;
mod filter;
mod quaternion;
mod sample;
mod shake;

pub use angle::Angle;
pub use filter::{AttitudeFilter, FilterOutput};
pub use quaternion::{AttitudeSample, Quaternion};
pub use sample::{Acceleration, MotionSample};
pub use shake::{ShakeConfig, ShakeDetector};
