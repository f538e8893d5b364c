//! Motion session.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, watch};

use crate::log::SharedLogger;
use crate::telemetry::ControlMetrics;

use super::config::MotionConfig;
use super::event::MotionEvent;
use super::source::{MotionSensorSource, MotionSink};
use super::state::{MotionCommand, MotionInput, MotionSessionState};
use super::worker::MotionWorker;

const COMPONENT: &str = "motion";

/// Capacity of the motion event broadcast channel.
pub const MOTION_EVENT_CAPACITY: usize = 256;

/// Owns a motion source and turns its samples into [`MotionEvent`]s.
///
/// The worker task is spawned on the supplied runtime handle; the session
/// itself is driven synchronously from the caller's context.
pub struct MotionSession<S: MotionSensorSource> {
    source: S,
    config: MotionConfig,
    logger: SharedLogger,
    metrics: Arc<ControlMetrics>,
    runtime: Handle,
    state_tx: watch::Sender<MotionSessionState>,
    events_tx: broadcast::Sender<MotionEvent>,
    worker: Option<MotionWorker>,
}

impl<S: MotionSensorSource> MotionSession<S> {
    pub fn new(
        source: S,
        config: MotionConfig,
        logger: SharedLogger,
        metrics: Arc<ControlMetrics>,
        runtime: Handle,
    ) -> Self {
        let (state_tx, _) = watch::channel(MotionSessionState::Initial);
        let (events_tx, _) = broadcast::channel(MOTION_EVENT_CAPACITY);
        Self {
            source,
            config,
            logger,
            metrics,
            runtime,
            state_tx,
            events_tx,
            worker: None,
        }
    }

    /// Begin sampling. No effect when already running or unavailable.
    pub fn start(&mut self) {
        let available = self.source.is_available();
        self.apply(MotionInput::Start { available });
    }

    /// Stop sampling. No effect unless running.
    pub fn stop(&mut self) {
        self.apply(MotionInput::Stop);
    }

    pub fn state(&self) -> MotionSessionState {
        *self.state_tx.borrow()
    }

    /// State stream. The receiver sees the current state immediately.
    pub fn subscribe_state(&self) -> watch::Receiver<MotionSessionState> {
        self.state_tx.subscribe()
    }

    /// Event stream. Only events published after subscribing are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<MotionEvent> {
        self.events_tx.subscribe()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn apply(&mut self, input: MotionInput) {
        let previous = self.state();
        let (next, command) = previous.transition(input);

        if let Some(command) = command {
            self.execute(command);
        }

        if next != previous {
            match next {
                MotionSessionState::Unavailable => {
                    self.logger.error(COMPONENT, "Device motion not available")
                }
                MotionSessionState::Running => {
                    self.logger.debug(COMPONENT, "Motion session started")
                }
                MotionSessionState::Stopped => {
                    self.logger.debug(COMPONENT, "Motion session stopped")
                }
                MotionSessionState::Initial => {}
            }
            self.state_tx.send_replace(next);
        }
    }

    fn execute(&mut self, command: MotionCommand) {
        match command {
            MotionCommand::StartUpdates => {
                let capacity = self.config.sample_queue_capacity.max(1);
                let (tx, rx) = mpsc::channel(capacity);
                self.worker = Some(MotionWorker::spawn(
                    &self.runtime,
                    self.config.shake.clone(),
                    rx,
                    self.events_tx.clone(),
                    self.logger.clone(),
                    self.metrics.clone(),
                ));
                let sink = MotionSink::new(tx, self.metrics.clone());
                self.source.start_updates(self.config.update_interval, sink);
            }
            MotionCommand::StopUpdates => {
                self.source.stop_updates();
                if let Some(worker) = self.worker.take() {
                    worker.shutdown();
                }
            }
        }
    }
}

impl<S: MotionSensorSource> Drop for MotionSession<S> {
    fn drop(&mut self) {
        if self.state().is_running() {
            self.execute(MotionCommand::StopUpdates);
        }
    }
}
