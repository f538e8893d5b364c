//! Motion session lifecycle as a pure transition function.

use std::fmt;

/// Published motion session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionSessionState {
    /// Constructed, never started.
    #[default]
    Initial,
    /// The device has no motion sensor. Terminal.
    Unavailable,
    /// Sensor updates flowing into the worker.
    Running,
    /// Updates stopped; can be restarted.
    Stopped,
}

impl fmt::Display for MotionSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionSessionState::Initial => write!(f, "initial"),
            MotionSessionState::Unavailable => write!(f, "unavailable"),
            MotionSessionState::Running => write!(f, "running"),
            MotionSessionState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Inputs to the motion lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionInput {
    /// `start()` was called; `available` is the source's current answer.
    Start { available: bool },
    /// `stop()` was called.
    Stop,
}

/// Side effects the session must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    /// Spawn a fresh worker and start source updates.
    StartUpdates,
    /// Stop source updates and cancel the worker.
    StopUpdates,
}

impl MotionSessionState {
    /// Next state and the command to run, if any.
    pub fn transition(self, input: MotionInput) -> (Self, Option<MotionCommand>) {
        use MotionSessionState::*;

        match (self, input) {
            (Initial, MotionInput::Start { available: true }) => {
                (Running, Some(MotionCommand::StartUpdates))
            }
            (Initial, MotionInput::Start { available: false }) => (Unavailable, None),
            (Stopped, MotionInput::Start { .. }) => (Running, Some(MotionCommand::StartUpdates)),
            (Running, MotionInput::Stop) => (Stopped, Some(MotionCommand::StopUpdates)),
            (state, _) => (state, None),
        }
    }

    pub fn is_running(self) -> bool {
        self == MotionSessionState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MotionSessionState::*;

    #[test]
    fn test_initial_start_depends_on_availability() {
        assert_eq!(
            Initial.transition(MotionInput::Start { available: true }),
            (Running, Some(MotionCommand::StartUpdates))
        );
        assert_eq!(
            Initial.transition(MotionInput::Start { available: false }),
            (Unavailable, None)
        );
    }

    #[test]
    fn test_unavailable_is_terminal() {
        assert_eq!(
            Unavailable.transition(MotionInput::Start { available: true }),
            (Unavailable, None)
        );
        assert_eq!(Unavailable.transition(MotionInput::Stop), (Unavailable, None));
    }

    #[test]
    fn test_start_stop_idempotent() {
        assert_eq!(
            Running.transition(MotionInput::Start { available: true }),
            (Running, None)
        );
        assert_eq!(Stopped.transition(MotionInput::Stop), (Stopped, None));
        assert_eq!(Initial.transition(MotionInput::Stop), (Initial, None));
    }

    #[test]
    fn test_restart_after_stop() {
        let (state, command) = Running.transition(MotionInput::Stop);
        assert_eq!(state, Stopped);
        assert_eq!(command, Some(MotionCommand::StopUpdates));

        let (state, command) = state.transition(MotionInput::Start { available: true });
        assert_eq!(state, Running);
        assert_eq!(command, Some(MotionCommand::StartUpdates));
    }
}
