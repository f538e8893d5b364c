//! Pure playback state machine.
//!
//! The sequencer never touches the transport. Each input returns the
//! commands to send, computed against a [`TransportSnapshot`] so that rate
//! and volume commands are only produced when they change something.

use std::fmt;

use serde::Serialize;

use crate::gesture::GestureIntent;

use super::config::SequencerConfig;
use super::transport::{SeekRequest, SeekTicket};

/// Seek bookkeeping while in [`SequencerState::Seeking`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekState {
    /// Most recent requested position.
    pub target: f64,
    /// Position of the last seek sent during this visit to Seeking.
    pub last_requested: Option<f64>,
}

impl SeekState {
    fn new(target: f64) -> Self {
        Self {
            target,
            last_requested: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerState {
    Playing,
    Seeking(SeekState),
    Shaken,
}

/// Payload-free view of [`SequencerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencerPhase {
    Playing,
    Seeking,
    Shaken,
}

impl fmt::Display for SequencerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerPhase::Playing => write!(f, "playing"),
            SequencerPhase::Seeking => write!(f, "seeking"),
            SequencerPhase::Shaken => write!(f, "shaken"),
        }
    }
}

impl SequencerState {
    pub fn phase(&self) -> SequencerPhase {
        match self {
            SequencerState::Playing => SequencerPhase::Playing,
            SequencerState::Seeking(_) => SequencerPhase::Seeking,
            SequencerState::Shaken => SequencerPhase::Shaken,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerInput {
    Gesture(GestureIntent),
    ShakeBegan,
    ShakeEnded,
    /// The shake ended without completing, e.g. the motion sensors were
    /// stopped mid-shake. Leaves Shaken without toggling playback.
    ShakeCancelled,
    SeekCompleted(SeekTicket),
    /// Screen visibility changed.
    SetActive(bool),
    /// Jump back to the start without changing state.
    Restart,
}

/// An operation for the media transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum TransportCommand {
    SetRate { rate: f32 },
    SetVolume { volume: f32 },
    Seek { ticket: SeekTicket, request: SeekRequest },
    Restart,
}

/// The transport values the sequencer compares against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportSnapshot {
    pub rate: f32,
    pub volume: f32,
}

/// Collects commands while tracking the rate and volume they will leave
/// the transport at.
struct CommandBuffer {
    rate: f32,
    volume: f32,
    commands: Vec<TransportCommand>,
}

impl CommandBuffer {
    fn new(snapshot: TransportSnapshot) -> Self {
        Self {
            rate: snapshot.rate,
            volume: snapshot.volume,
            commands: Vec::new(),
        }
    }

    fn set_rate(&mut self, rate: f32) {
        if self.rate != rate {
            self.rate = rate;
            self.commands.push(TransportCommand::SetRate { rate });
        }
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.volume != volume {
            self.volume = volume;
            self.commands.push(TransportCommand::SetVolume { volume });
        }
    }

    fn push(&mut self, command: TransportCommand) {
        self.commands.push(command);
    }
}

/// Playing / Seeking / Shaken state machine with coalesced seeks.
///
/// The outstanding seek ticket lives outside the state so that it survives
/// leaving and re-entering Seeking: the transport never has more than one
/// seek running.
#[derive(Debug, Clone)]
pub struct PlaybackSequencer {
    state: SequencerState,
    outstanding: Option<SeekTicket>,
    is_playing: bool,
    is_active: bool,
    next_ticket: u64,
    seek_tolerance: f64,
}

impl PlaybackSequencer {
    /// A sequencer in `Playing`, inactive until told otherwise.
    ///
    /// Call [`enter`](Self::enter) once to apply the initial rate.
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            state: SequencerState::Playing,
            outstanding: None,
            is_playing: config.start_playing,
            is_active: false,
            next_ticket: 0,
            seek_tolerance: config.seek_tolerance.as_secs_f64(),
        }
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn phase(&self) -> SequencerPhase {
        self.state.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Ticket of the seek currently running on the transport, in any state.
    pub fn in_flight(&self) -> Option<SeekTicket> {
        self.outstanding
    }

    /// Rate the transport should be at in the current state.
    pub fn expected_rate(&self) -> f32 {
        match self.state {
            SequencerState::Playing if self.is_active && self.is_playing => 1.0,
            _ => 0.0,
        }
    }

    /// Run the current state's entry action.
    pub fn enter(&mut self, snapshot: TransportSnapshot) -> Vec<TransportCommand> {
        let mut buffer = CommandBuffer::new(snapshot);
        self.on_enter(&mut buffer);
        buffer.commands
    }

    pub fn handle(
        &mut self,
        input: SequencerInput,
        snapshot: TransportSnapshot,
    ) -> Vec<TransportCommand> {
        let mut buffer = CommandBuffer::new(snapshot);

        match input {
            SequencerInput::Restart => buffer.push(TransportCommand::Restart),
            SequencerInput::SetActive(active) => {
                self.is_active = active;
                if self.state == SequencerState::Playing {
                    buffer.set_rate(self.expected_rate());
                }
            }
            SequencerInput::Gesture(intent) => self.gesture(intent, &mut buffer),
            SequencerInput::ShakeBegan => {
                if self.state != SequencerState::Shaken {
                    self.transition(SequencerState::Shaken, &mut buffer);
                }
            }
            SequencerInput::ShakeEnded => {
                if self.state == SequencerState::Shaken {
                    self.is_playing = !self.is_playing;
                    self.transition(SequencerState::Playing, &mut buffer);
                }
            }
            SequencerInput::ShakeCancelled => {
                if self.state == SequencerState::Shaken {
                    self.transition(SequencerState::Playing, &mut buffer);
                }
            }
            SequencerInput::SeekCompleted(ticket) => {
                if self.outstanding == Some(ticket) {
                    self.outstanding = None;
                    self.pump(&mut buffer);
                }
            }
        }

        buffer.commands
    }

    fn gesture(&mut self, intent: GestureIntent, buffer: &mut CommandBuffer) {
        match (self.state, intent) {
            (SequencerState::Playing, GestureIntent::Seek(target)) => {
                self.transition(SequencerState::Seeking(SeekState::new(target)), buffer);
            }
            (SequencerState::Playing, GestureIntent::VolumeAdjust(delta)) => {
                buffer.set_volume(buffer.volume + delta);
            }
            (SequencerState::Seeking(mut seek), GestureIntent::Seek(target)) => {
                seek.target = target;
                self.state = SequencerState::Seeking(seek);
                self.pump(buffer);
            }
            (SequencerState::Seeking(_), other) => {
                self.transition(SequencerState::Playing, buffer);
                self.gesture(other, buffer);
            }
            (SequencerState::Playing, GestureIntent::Neutral) | (SequencerState::Shaken, _) => {}
        }
    }

    fn transition(&mut self, next: SequencerState, buffer: &mut CommandBuffer) {
        self.state = next;
        self.on_enter(buffer);
    }

    fn on_enter(&mut self, buffer: &mut CommandBuffer) {
        match self.state {
            SequencerState::Playing => buffer.set_rate(self.expected_rate()),
            SequencerState::Seeking(_) => {
                buffer.set_rate(0.0);
                self.pump(buffer);
            }
            SequencerState::Shaken => buffer.set_rate(0.0),
        }
    }

    /// Send a seek if none is running and the target moved.
    fn pump(&mut self, buffer: &mut CommandBuffer) {
        let SequencerState::Seeking(seek) = &mut self.state else {
            return;
        };
        if self.outstanding.is_some() || seek.last_requested == Some(seek.target) {
            return;
        }

        self.next_ticket += 1;
        let ticket = SeekTicket(self.next_ticket);
        self.outstanding = Some(ticket);
        seek.last_requested = Some(seek.target);
        buffer.push(TransportCommand::Seek {
            ticket,
            request: SeekRequest::new(seek.target, self.seek_tolerance),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rate: f32, volume: f32) -> TransportSnapshot {
        TransportSnapshot { rate, volume }
    }

    /// A sequencer that is active and playing at rate 1.
    fn playing() -> PlaybackSequencer {
        let mut sequencer = PlaybackSequencer::new(&SequencerConfig::default());
        sequencer.handle(SequencerInput::SetActive(true), snapshot(0.0, 0.5));
        sequencer
    }

    fn seeks(commands: &[TransportCommand]) -> Vec<(SeekTicket, f64)> {
        commands
            .iter()
            .filter_map(|command| match command {
                TransportCommand::Seek { ticket, request } => Some((*ticket, request.target)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_enter_pauses_until_active() {
        let mut sequencer = PlaybackSequencer::new(&SequencerConfig::default());
        assert_eq!(
            sequencer.enter(snapshot(1.0, 0.5)),
            vec![TransportCommand::SetRate { rate: 0.0 }]
        );
        assert!(sequencer.enter(snapshot(0.0, 0.5)).is_empty());

        let commands = sequencer.handle(SequencerInput::SetActive(true), snapshot(0.0, 0.5));
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 1.0 }]);
    }

    #[test]
    fn test_seek_from_playing() {
        let mut sequencer = playing();
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(60.56)),
            snapshot(1.0, 0.5),
        );

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], TransportCommand::SetRate { rate: 0.0 });
        match commands[1] {
            TransportCommand::Seek { request, .. } => {
                assert_eq!(request.target, 60.56);
                assert!((request.tolerance_before - 0.033).abs() < 1e-12);
                assert!((request.tolerance_after - 0.033).abs() < 1e-12);
            }
            other => panic!("expected seek, got {:?}", other),
        }
        assert_eq!(sequencer.phase(), SequencerPhase::Seeking);
    }

    #[test]
    fn test_repeated_target_is_coalesced() {
        let mut sequencer = playing();
        let mut all = Vec::new();
        all.extend(sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        ));
        let ticket = sequencer.in_flight().unwrap();
        all.extend(sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(0.0, 0.5),
        ));
        all.extend(sequencer.handle(SequencerInput::SeekCompleted(ticket), snapshot(0.0, 0.5)));
        all.extend(sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(0.0, 0.5),
        ));

        assert_eq!(seeks(&all).len(), 1);
    }

    #[test]
    fn test_last_write_wins_while_in_flight() {
        let mut sequencer = playing();
        let first = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let (t1, _) = seeks(&first)[0];

        for target in [11.0, 12.0, 13.0] {
            let commands = sequencer.handle(
                SequencerInput::Gesture(GestureIntent::Seek(target)),
                snapshot(0.0, 0.5),
            );
            assert!(commands.is_empty());
        }

        let commands = sequencer.handle(SequencerInput::SeekCompleted(t1), snapshot(0.0, 0.5));
        let issued = seeks(&commands);
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].1, 13.0);
        assert_ne!(issued[0].0, t1);
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut sequencer = playing();
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let current = sequencer.in_flight().unwrap();

        let commands = sequencer.handle(
            SequencerInput::SeekCompleted(SeekTicket(current.0 + 100)),
            snapshot(0.0, 0.5),
        );
        assert!(commands.is_empty());
        assert_eq!(sequencer.in_flight(), Some(current));

        // Completion after leaving Seeking only releases the ticket
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Neutral),
            snapshot(0.0, 0.5),
        );
        assert_eq!(sequencer.in_flight(), Some(current));
        let commands = sequencer.handle(SequencerInput::SeekCompleted(current), snapshot(1.0, 0.5));
        assert!(commands.is_empty());
        assert_eq!(sequencer.phase(), SequencerPhase::Playing);
        assert_eq!(sequencer.in_flight(), None);
    }

    #[test]
    fn test_reentering_seeking_waits_for_outstanding_seek() {
        let mut sequencer = playing();
        let first = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let (t1, _) = seeks(&first)[0];

        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Neutral),
            snapshot(0.0, 0.5),
        );
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(20.0)),
            snapshot(1.0, 0.5),
        );
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 0.0 }]);
        assert_eq!(sequencer.phase(), SequencerPhase::Seeking);
        assert_eq!(sequencer.in_flight(), Some(t1));

        let commands = sequencer.handle(SequencerInput::SeekCompleted(t1), snapshot(0.0, 0.5));
        let issued = seeks(&commands);
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].1, 20.0);
        assert_eq!(sequencer.in_flight(), Some(issued[0].0));
    }

    #[test]
    fn test_neutral_leaves_seeking_and_resumes() {
        let mut sequencer = playing();
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Neutral),
            snapshot(0.0, 0.5),
        );
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 1.0 }]);
        assert_eq!(sequencer.phase(), SequencerPhase::Playing);
    }

    #[test]
    fn test_volume_in_seeking_applies_after_leaving() {
        let mut sequencer = playing();
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::VolumeAdjust(0.25)),
            snapshot(0.0, 0.5),
        );
        assert_eq!(
            commands,
            vec![
                TransportCommand::SetRate { rate: 1.0 },
                TransportCommand::SetVolume { volume: 0.75 }
            ]
        );
    }

    #[test]
    fn test_volume_adjust_in_playing() {
        let mut sequencer = playing();
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::VolumeAdjust(0.02)),
            snapshot(1.0, 0.5),
        );
        assert_eq!(commands.len(), 1);
        match commands[0] {
            TransportCommand::SetVolume { volume } => assert!((volume - 0.52).abs() < 1e-6),
            other => panic!("expected volume, got {:?}", other),
        }
        assert_eq!(sequencer.phase(), SequencerPhase::Playing);
    }

    #[test]
    fn test_volume_clamps_and_skips_redundant() {
        let mut sequencer = playing();
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::VolumeAdjust(0.2)),
            snapshot(1.0, 0.95),
        );
        assert_eq!(commands, vec![TransportCommand::SetVolume { volume: 1.0 }]);

        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::VolumeAdjust(0.2)),
            snapshot(1.0, 1.0),
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn test_shake_toggles_playback() {
        let mut sequencer = playing();
        let commands = sequencer.handle(SequencerInput::ShakeBegan, snapshot(1.0, 0.5));
        assert_eq!(sequencer.phase(), SequencerPhase::Shaken);
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 0.0 }]);

        let commands = sequencer.handle(SequencerInput::ShakeEnded, snapshot(0.0, 0.5));
        assert_eq!(sequencer.phase(), SequencerPhase::Playing);
        assert!(!sequencer.is_playing());
        assert!(commands.is_empty());
        assert_eq!(sequencer.expected_rate(), 0.0);

        // Second shake resumes
        sequencer.handle(SequencerInput::ShakeBegan, snapshot(0.0, 0.5));
        let commands = sequencer.handle(SequencerInput::ShakeEnded, snapshot(0.0, 0.5));
        assert!(sequencer.is_playing());
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 1.0 }]);
    }

    #[test]
    fn test_shake_preempts_seeking() {
        let mut sequencer = playing();
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let ticket = sequencer.in_flight().unwrap();
        let commands = sequencer.handle(SequencerInput::ShakeBegan, snapshot(0.0, 0.5));
        assert!(commands.is_empty());
        assert_eq!(sequencer.phase(), SequencerPhase::Shaken);

        // The abandoned seek still occupies the transport until it completes
        assert_eq!(sequencer.in_flight(), Some(ticket));
        let commands = sequencer.handle(SequencerInput::SeekCompleted(ticket), snapshot(0.0, 0.5));
        assert!(commands.is_empty());
        assert_eq!(sequencer.in_flight(), None);
    }

    #[test]
    fn test_gestures_ignored_while_shaken() {
        let mut sequencer = playing();
        sequencer.handle(SequencerInput::ShakeBegan, snapshot(1.0, 0.5));
        for intent in [
            GestureIntent::Seek(3.0),
            GestureIntent::VolumeAdjust(0.1),
            GestureIntent::Neutral,
        ] {
            assert!(sequencer
                .handle(SequencerInput::Gesture(intent), snapshot(0.0, 0.5))
                .is_empty());
        }
        assert_eq!(sequencer.phase(), SequencerPhase::Shaken);
    }

    #[test]
    fn test_cancelled_shake_keeps_playback_state() {
        let mut sequencer = playing();
        sequencer.handle(SequencerInput::ShakeBegan, snapshot(1.0, 0.5));

        let commands = sequencer.handle(SequencerInput::ShakeCancelled, snapshot(0.0, 0.5));
        assert_eq!(sequencer.phase(), SequencerPhase::Playing);
        assert!(sequencer.is_playing());
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 1.0 }]);

        // Gestures are interpreted again
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        assert_eq!(sequencer.phase(), SequencerPhase::Seeking);

        // No effect outside Shaken
        assert!(sequencer
            .handle(SequencerInput::ShakeCancelled, snapshot(0.0, 0.5))
            .is_empty());
        assert_eq!(sequencer.phase(), SequencerPhase::Seeking);
    }

    #[test]
    fn test_shake_end_outside_shaken_is_ignored() {
        let mut sequencer = playing();
        assert!(sequencer
            .handle(SequencerInput::ShakeEnded, snapshot(1.0, 0.5))
            .is_empty());
        assert!(sequencer.is_playing());
    }

    #[test]
    fn test_restart_in_any_state() {
        let mut sequencer = playing();
        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(1.0, 0.5),
        );
        let commands = sequencer.handle(SequencerInput::Restart, snapshot(0.0, 0.5));
        assert_eq!(commands, vec![TransportCommand::Restart]);
        assert_eq!(sequencer.phase(), SequencerPhase::Seeking);

        sequencer.handle(SequencerInput::ShakeBegan, snapshot(0.0, 0.5));
        let commands = sequencer.handle(SequencerInput::Restart, snapshot(0.0, 0.5));
        assert_eq!(commands, vec![TransportCommand::Restart]);
        assert_eq!(sequencer.phase(), SequencerPhase::Shaken);
    }

    #[test]
    fn test_inactive_screen_holds_rate_at_zero() {
        let mut sequencer = playing();
        let commands = sequencer.handle(SequencerInput::SetActive(false), snapshot(1.0, 0.5));
        assert_eq!(commands, vec![TransportCommand::SetRate { rate: 0.0 }]);

        sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Seek(10.0)),
            snapshot(0.0, 0.5),
        );
        let commands = sequencer.handle(
            SequencerInput::Gesture(GestureIntent::Neutral),
            snapshot(0.0, 0.5),
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn test_tickets_are_unique() {
        let mut sequencer = playing();
        let mut tickets = Vec::new();
        for target in [1.0, 2.0, 3.0] {
            sequencer.handle(
                SequencerInput::Gesture(GestureIntent::Seek(target)),
                snapshot(0.0, 0.5),
            );
            let ticket = sequencer.in_flight().unwrap();
            tickets.push(ticket);
            sequencer.handle(SequencerInput::SeekCompleted(ticket), snapshot(0.0, 0.5));
        }
        tickets.dedup();
        assert_eq!(tickets.len(), 3);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// One step of a session: a sequencer input, or the transport
        /// finishing its oldest running seek.
        #[derive(Debug, Clone)]
        enum Step {
            Input(SequencerInput),
            CompleteSeek,
        }

        fn step_strategy() -> impl Strategy<Value = Step> {
            prop_oneof![
                4 => intent_strategy().prop_map(Step::Input),
                1 => Just(Step::CompleteSeek),
            ]
        }

        fn intent_strategy() -> impl Strategy<Value = SequencerInput> {
            prop_oneof![
                (0.0..100.0_f64).prop_map(|t| SequencerInput::Gesture(GestureIntent::Seek(t))),
                (-0.1..0.1_f32)
                    .prop_map(|d| SequencerInput::Gesture(GestureIntent::VolumeAdjust(d))),
                Just(SequencerInput::Gesture(GestureIntent::Neutral)),
                Just(SequencerInput::ShakeBegan),
                Just(SequencerInput::ShakeEnded),
                Just(SequencerInput::ShakeCancelled),
                any::<bool>().prop_map(SequencerInput::SetActive),
                Just(SequencerInput::Restart),
            ]
        }

        proptest! {
            #[test]
            fn test_rate_volume_and_seek_invariants(steps in prop::collection::vec(step_strategy(), 1..80)) {
                let mut sequencer = PlaybackSequencer::new(&SequencerConfig::default());
                let mut transport = snapshot(1.0, 0.5);
                let mut running: std::collections::VecDeque<SeekTicket> = Default::default();
                for command in sequencer.enter(transport) {
                    if let TransportCommand::SetRate { rate } = command {
                        transport.rate = rate;
                    }
                }

                for step in steps {
                    let input = match step {
                        Step::Input(input) => input,
                        Step::CompleteSeek => match running.pop_front() {
                            Some(ticket) => SequencerInput::SeekCompleted(ticket),
                            None => continue,
                        },
                    };
                    for command in sequencer.handle(input, transport) {
                        match command {
                            TransportCommand::SetRate { rate } => transport.rate = rate,
                            TransportCommand::SetVolume { volume } => transport.volume = volume,
                            TransportCommand::Seek { ticket, .. } => running.push_back(ticket),
                            TransportCommand::Restart => {}
                        }
                    }
                    prop_assert_eq!(transport.rate, sequencer.expected_rate());
                    prop_assert!((0.0..=1.0).contains(&transport.volume));
                    // The transport never runs two seeks at once
                    prop_assert!(running.len() <= 1, "{} seeks running", running.len());
                    prop_assert_eq!(running.front().copied(), sequencer.in_flight());
                }
            }
        }
    }
}
