//! Motion sensor source abstraction.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::attitude::MotionSample;
use crate::error::SensorError;
use crate::telemetry::ControlMetrics;

/// One callback from the motion source: a sample or a failure.
pub type MotionUpdate = Result<MotionSample, SensorError>;

/// Device motion provider.
///
/// Implementations wrap the platform sensor API. After
/// [`start_updates`](Self::start_updates) they push every update into the
/// given sink, from any thread, until [`stop_updates`](Self::stop_updates).
pub trait MotionSensorSource: Send {
    /// Whether the device has the required sensors.
    fn is_available(&self) -> bool;

    /// Begin delivering updates at roughly `interval`.
    fn start_updates(&mut self, interval: Duration, sink: MotionSink);

    /// Stop delivering updates and release the sink.
    fn stop_updates(&mut self);
}

/// Producer end of the raw sample queue handed to a motion source.
///
/// Never blocks: when the queue is full the update is dropped and counted.
#[derive(Debug, Clone)]
pub struct MotionSink {
    tx: mpsc::Sender<MotionUpdate>,
    metrics: Arc<ControlMetrics>,
}

impl MotionSink {
    pub(crate) fn new(tx: mpsc::Sender<MotionUpdate>, metrics: Arc<ControlMetrics>) -> Self {
        Self { tx, metrics }
    }

    /// Offer one update to the worker.
    ///
    /// # Returns
    ///
    /// `true` if the update was queued, `false` if it was dropped because
    /// the queue is full or the session stopped.
    pub fn deliver(&self, update: MotionUpdate) -> bool {
        match self.tx.try_send(update) {
            Ok(()) => {
                self.metrics.motion_sample_accepted();
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.motion_sample_dropped();
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Whether the consuming worker has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attitude::Quaternion;

    #[test]
    fn test_full_queue_drops_and_counts() {
        let metrics = Arc::new(ControlMetrics::new());
        let (tx, mut rx) = mpsc::channel(1);
        let sink = MotionSink::new(tx, metrics.clone());

        let sample = MotionSample::at_rest(Quaternion::identity());
        assert!(sink.deliver(Ok(sample)));
        assert!(!sink.deliver(Ok(sample)));
        assert!(!sink.deliver(Ok(sample)));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.motion_samples, 1);
        assert_eq!(snapshot.dropped_motion_samples, 2);

        assert!(rx.try_recv().is_ok());
        assert!(sink.deliver(Ok(sample)));
    }

    #[test]
    fn test_closed_queue_is_not_counted_as_drop() {
        let metrics = Arc::new(ControlMetrics::new());
        let (tx, rx) = mpsc::channel(1);
        let sink = MotionSink::new(tx, metrics.clone());
        drop(rx);

        assert!(sink.is_closed());
        assert!(!sink.deliver(Err(SensorError::MotionUpdate("late".into()))));
        assert_eq!(metrics.snapshot().dropped_motion_samples, 0);
    }
}
