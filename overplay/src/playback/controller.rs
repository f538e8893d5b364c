//! Playback controller: the per-tick driver around the sequencer.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::attitude::AttitudeSample;
use crate::error::TransportError;
use crate::geofence::GeofenceEvent;
use crate::gesture::{GestureConfig, GestureIntent, GestureInterpreter, Playhead};
use crate::log::SharedLogger;
use crate::motion::MotionEvent;
use crate::telemetry::ControlMetrics;

use super::config::SequencerConfig;
use super::indicator::{progress, PlayerIndicator};
use super::sequencer::{
    PlaybackSequencer, SequencerInput, SequencerPhase, TransportCommand, TransportSnapshot,
};
use super::transport::{
    MediaTransport, SeekCompletion, SeekTicket, TimeControlStatus, TransportStatus,
};

const COMPONENT: &str = "playback";

/// Capacity of the playback event broadcast channel.
pub const PLAYBACK_EVENT_CAPACITY: usize = 64;

/// Observable playback changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    PhaseChanged {
        from: SequencerPhase,
        to: SequencerPhase,
    },
    /// A shake toggled play/pause.
    PlaybackToggled { playing: bool },
    Restarted,
    /// The transport reported a failure. Not retried.
    TransportFailed(TransportError),
}

/// Owns the media transport and applies gestures, shakes and geofence
/// events to it through a [`PlaybackSequencer`].
///
/// Everything here runs on the caller's context. Seek completions may
/// arrive from any thread; they are queued and applied on the next
/// [`tick`](Self::tick).
pub struct PlaybackController<T: MediaTransport> {
    transport: T,
    interpreter: GestureInterpreter,
    sequencer: PlaybackSequencer,
    latest_attitude: Option<AttitudeSample>,
    shaking: bool,
    completions_tx: mpsc::UnboundedSender<SeekTicket>,
    completions_rx: mpsc::UnboundedReceiver<SeekTicket>,
    reported_failure: Option<TransportError>,
    warned_unsupported: bool,
    events_tx: broadcast::Sender<PlaybackEvent>,
    logger: SharedLogger,
    metrics: Arc<ControlMetrics>,
}

impl<T: MediaTransport> PlaybackController<T> {
    /// Take over `transport`. Playback stays paused until
    /// [`set_active(true)`](Self::set_active).
    pub fn new(
        transport: T,
        gesture: GestureConfig,
        sequencer: SequencerConfig,
        logger: SharedLogger,
        metrics: Arc<ControlMetrics>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(PLAYBACK_EVENT_CAPACITY);

        let mut controller = Self {
            transport,
            interpreter: GestureInterpreter::new(gesture),
            sequencer: PlaybackSequencer::new(&sequencer),
            latest_attitude: None,
            shaking: false,
            completions_tx,
            completions_rx,
            reported_failure: None,
            warned_unsupported: false,
            events_tx,
            logger,
            metrics,
        };

        let commands = controller.sequencer.enter(controller.snapshot());
        controller.execute(commands);
        controller
    }

    /// Apply one motion event. Attitude is buffered for the next tick;
    /// shake edges go to the sequencer immediately.
    pub fn handle_motion_event(&mut self, event: &MotionEvent) {
        match event {
            MotionEvent::Attitude(attitude) => self.latest_attitude = Some(*attitude),
            MotionEvent::ShakeChanged(shaking) => {
                self.shaking = *shaking;
                let input = if *shaking {
                    SequencerInput::ShakeBegan
                } else {
                    SequencerInput::ShakeEnded
                };
                self.dispatch(input);
            }
            MotionEvent::Error(error) => {
                self.logger
                    .debug(COMPONENT, &format!("Ignoring motion error: {}", error));
            }
        }
    }

    /// The motion sensors stopped. Forgets the buffered attitude and
    /// leaves an unfinished shake without toggling playback, since no
    /// closing shake edge will arrive.
    pub fn motion_stopped(&mut self) {
        self.latest_attitude = None;
        if self.shaking {
            self.shaking = false;
            self.logger
                .debug(COMPONENT, "Motion stopped mid-shake, shake cancelled");
            self.dispatch(SequencerInput::ShakeCancelled);
        }
    }

    pub fn handle_geofence_event(&mut self, event: &GeofenceEvent) {
        if let GeofenceEvent::DisplacementExceeded { distance_m } = event {
            self.logger.info(
                COMPONENT,
                &format!("Restarting after moving {:.1} m", distance_m),
            );
            self.restart();
        }
    }

    /// Jump back to the start. The sequencer state is unchanged.
    pub fn restart(&mut self) {
        self.dispatch(SequencerInput::Restart);
    }

    /// Mark the screen visible or hidden. Hidden screens never play.
    pub fn set_active(&mut self, active: bool) {
        if self.sequencer.is_active() != active {
            self.logger.debug(
                COMPONENT,
                if active {
                    "Playback activated"
                } else {
                    "Playback deactivated"
                },
            );
        }
        self.dispatch(SequencerInput::SetActive(active));
    }

    /// One render tick.
    ///
    /// Applies queued seek completions, reports a new transport failure,
    /// then interprets the latest attitude and feeds the intent to the
    /// sequencer. While shaking nothing is interpreted.
    ///
    /// # Returns
    ///
    /// The intent applied on this tick.
    pub fn tick(&mut self) -> GestureIntent {
        while let Ok(ticket) = self.completions_rx.try_recv() {
            let outstanding = self.sequencer.in_flight() == Some(ticket);
            if !outstanding || self.sequencer.phase() != SequencerPhase::Seeking {
                self.metrics.stale_seek_completion();
                self.logger
                    .trace(COMPONENT, &format!("Stale seek completion {}", ticket));
            }
            // An abandoned seek still frees the transport for the next one.
            if outstanding {
                self.dispatch(SequencerInput::SeekCompleted(ticket));
            }
        }

        self.check_transport_status();

        if self.shaking {
            return GestureIntent::Neutral;
        }

        let playhead = Playhead::new(self.transport.current_time(), self.transport.duration());
        let intent = self
            .interpreter
            .interpret(self.latest_attitude.as_ref(), playhead);

        let coalescible =
            intent.is_seek() && self.sequencer.phase() == SequencerPhase::Seeking;
        let issued = self.dispatch(SequencerInput::Gesture(intent));
        if coalescible && issued == 0 {
            self.metrics.seek_coalesced();
        }

        intent
    }

    pub fn phase(&self) -> SequencerPhase {
        self.sequencer.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn is_active(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn sequencer(&self) -> &PlaybackSequencer {
        &self.sequencer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Loading / failed / ready, from the transport's status values.
    pub fn indicator(&mut self) -> PlayerIndicator {
        let status = self.transport.status();
        let time_control = self.transport.time_control_status();
        if (status == TransportStatus::Unsupported
            || time_control == TimeControlStatus::Unsupported)
            && !self.warned_unsupported
        {
            self.warned_unsupported = true;
            self.logger
                .warn(COMPONENT, "Unsupported transport status, showing loading");
        }
        PlayerIndicator::from_status(&status, time_control)
    }

    /// Fraction of the media played.
    pub fn progress(&self) -> f64 {
        progress(self.transport.current_time(), self.transport.duration())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events_tx.subscribe()
    }

    fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            rate: self.transport.rate(),
            volume: self.transport.volume(),
        }
    }

    /// Feed one input to the sequencer and apply the result.
    ///
    /// Returns the number of seeks issued.
    fn dispatch(&mut self, input: SequencerInput) -> usize {
        let phase = self.sequencer.phase();
        let playing = self.sequencer.is_playing();

        let commands = self.sequencer.handle(input, self.snapshot());
        let seeks = self.execute(commands);

        let next_phase = self.sequencer.phase();
        if next_phase != phase {
            self.logger
                .debug(COMPONENT, &format!("Phase {} -> {}", phase, next_phase));
            let _ = self.events_tx.send(PlaybackEvent::PhaseChanged {
                from: phase,
                to: next_phase,
            });
        }

        let now_playing = self.sequencer.is_playing();
        if now_playing != playing {
            self.metrics.shake_toggled();
            self.logger.info(
                COMPONENT,
                if now_playing {
                    "Playback resumed"
                } else {
                    "Playback paused"
                },
            );
            let _ = self.events_tx.send(PlaybackEvent::PlaybackToggled {
                playing: now_playing,
            });
        }

        seeks
    }

    fn execute(&mut self, commands: Vec<TransportCommand>) -> usize {
        let mut seeks = 0;
        for command in commands {
            match command {
                TransportCommand::SetRate { rate } => {
                    self.metrics.rate_changed();
                    self.transport.set_rate(rate);
                }
                TransportCommand::SetVolume { volume } => {
                    self.metrics.volume_changed();
                    self.transport.set_volume(volume);
                }
                TransportCommand::Seek { ticket, request } => {
                    seeks += 1;
                    self.metrics.seek_issued();
                    self.logger.trace(
                        COMPONENT,
                        &format!("Seek {} to {:.3}s", ticket, request.target),
                    );
                    let completion = SeekCompletion::new(ticket, self.completions_tx.clone());
                    self.transport.seek(request, completion);
                }
                TransportCommand::Restart => {
                    self.metrics.restarted();
                    self.transport.restart();
                    let _ = self.events_tx.send(PlaybackEvent::Restarted);
                }
            }
        }
        seeks
    }

    fn check_transport_status(&mut self) {
        match self.transport.status() {
            TransportStatus::Failed(error) => {
                if self.reported_failure.as_ref() != Some(&error) {
                    self.logger.error(COMPONENT, &error.to_string());
                    self.reported_failure = Some(error.clone());
                    let _ = self.events_tx.send(PlaybackEvent::TransportFailed(error));
                }
            }
            _ => self.reported_failure = None,
        }
    }
}
