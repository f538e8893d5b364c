//! Scripted motion source.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::motion::{MotionSensorSource, MotionSink, MotionUpdate};

#[derive(Debug, Default)]
struct Inner {
    sink: Option<MotionSink>,
    interval: Option<Duration>,
    start_count: usize,
    stop_count: usize,
}

/// Motion source fed by hand through [`push`](Self::push).
#[derive(Debug, Clone)]
pub struct ScriptedMotionSource {
    available: bool,
    inner: Arc<Mutex<Inner>>,
}

impl Default for ScriptedMotionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedMotionSource {
    pub fn new() -> Self {
        Self {
            available: true,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// A source on a device without motion sensors.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Deliver one update as if from the sensor.
    ///
    /// Returns `false` if updates are not running or the sample was
    /// dropped because the session's queue is full.
    pub fn push(&self, update: MotionUpdate) -> bool {
        let sink = match self.inner.lock() {
            Ok(inner) => inner.sink.clone(),
            Err(_) => None,
        };
        match sink {
            Some(sink) => sink.deliver(update),
            None => false,
        }
    }

    pub fn is_updating(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.sink.is_some())
            .unwrap_or(false)
    }

    /// Interval requested by the last `start_updates`.
    pub fn interval(&self) -> Option<Duration> {
        self.inner.lock().ok().and_then(|inner| inner.interval)
    }

    pub fn start_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.start_count).unwrap_or(0)
    }

    pub fn stop_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.stop_count).unwrap_or(0)
    }
}

impl MotionSensorSource for ScriptedMotionSource {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start_updates(&mut self, interval: Duration, sink: MotionSink) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sink = Some(sink);
            inner.interval = Some(interval);
            inner.start_count += 1;
        }
    }

    fn stop_updates(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sink = None;
            inner.stop_count += 1;
        }
    }
}
