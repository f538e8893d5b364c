//! Per-run filter worker.
//!
//! One worker exists for each Running period. It owns a fresh
//! [`AttitudeFilter`], drains the raw sample queue in order and publishes
//! the filter's output. Events are therefore never produced concurrently.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::attitude::{AttitudeFilter, ShakeConfig};
use crate::log::SharedLogger;
use crate::telemetry::ControlMetrics;

use super::event::MotionEvent;
use super::source::MotionUpdate;

const COMPONENT: &str = "motion";

/// Handle to a spawned worker.
pub(crate) struct MotionWorker {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MotionWorker {
    pub(crate) fn spawn(
        runtime: &Handle,
        shake: ShakeConfig,
        rx: mpsc::Receiver<MotionUpdate>,
        events: broadcast::Sender<MotionEvent>,
        logger: SharedLogger,
        metrics: Arc<ControlMetrics>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = runtime.spawn(run(
            AttitudeFilter::new(shake),
            rx,
            events,
            cancel.clone(),
            logger,
            metrics,
        ));
        Self { cancel, task }
    }

    /// Stop processing. Samples still queued are discarded.
    pub(crate) fn shutdown(self) {
        self.cancel.cancel();
        drop(self.task);
    }
}

async fn run(
    mut filter: AttitudeFilter,
    mut rx: mpsc::Receiver<MotionUpdate>,
    events: broadcast::Sender<MotionEvent>,
    cancel: CancellationToken,
    logger: SharedLogger,
    metrics: Arc<ControlMetrics>,
) {
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            update = rx.recv() => {
                let Some(update) = update else { break };
                match update {
                    Ok(sample) => {
                        let output = filter.process(&sample);
                        if let Some(shaking) = output.shake_changed {
                            logger.debug(
                                COMPONENT,
                                if shaking { "Shake began" } else { "Shake ended" },
                            );
                            let _ = events.send(MotionEvent::ShakeChanged(shaking));
                        }
                        if let Some(attitude) = output.attitude {
                            let _ = events.send(MotionEvent::Attitude(attitude));
                        }
                    }
                    Err(error) => {
                        metrics.motion_error();
                        logger.warn(COMPONENT, &error.to_string());
                        let _ = events.send(MotionEvent::Error(error));
                    }
                }
            }
        }
    }
    logger.trace(COMPONENT, "Motion worker exited");
}
