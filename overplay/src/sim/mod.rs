//! In-process stand-ins for the sensors and the media transport.
//!
//! Used by the CLI `simulate` command and by tests. The scripted sources
//! are cheap to clone; clones share state so a test can keep one handle
//! while the session owns the other.

mod location;
mod motion;
mod scenario;
mod transport;

pub use location::ScriptedLocationSource;
pub use motion::ScriptedMotionSource;
pub use scenario::{Scenario, ScenarioFrame, SCENARIO_SAMPLES_PER_FRAME};
pub use transport::SimulatedTransport;
