//! Motion session: sensor lifecycle around the attitude filter.
//!
//! # State Machine
//!
//! ```text
//! Initial --[start, available]------> Running
//! Initial --[start, unavailable]----> Unavailable (terminal)
//! Running --[stop]------------------> Stopped
//! Stopped --[start]-----------------> Running
//! ```
//!
//! While Running, raw samples from the [`MotionSensorSource`] cross a bounded
//! channel into a single worker task which runs a fresh
//! [`AttitudeFilter`](crate::attitude::AttitudeFilter) and publishes
//! [`MotionEvent`]s.

mod config;
mod event;
mod session;
mod source;
mod state;
mod worker;

pub use config::{MotionConfig, DEFAULT_MOTION_UPDATE_INTERVAL, DEFAULT_SAMPLE_QUEUE_CAPACITY};
pub use event::MotionEvent;
pub use session::{MotionSession, MOTION_EVENT_CAPACITY};
pub use source::{MotionSensorSource, MotionSink, MotionUpdate};
pub use state::{MotionCommand, MotionInput, MotionSessionState};
