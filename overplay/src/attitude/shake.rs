//! Shake detection with hysteresis.
//!
//! # Detection Logic
//!
//! ```text
//! window  = last N acceleration magnitudes (FIFO)
//! mean    = sum(window) / N
//!
//! not shaking AND mean ≥ start  →  shaking
//! shaking     AND mean ≤ stop   →  not shaking
//! ```
//!
//! The mean always divides by the configured window size, so a window that
//! is still filling under-reads and a shake needs sustained energy before it
//! registers. Values strictly between the thresholds never change state.

use std::collections::VecDeque;

/// Default number of magnitudes in the rolling window (0.5 s at 120 Hz).
pub const DEFAULT_SHAKE_WINDOW: usize = 60;

/// Default mean magnitude (g) that starts a shake.
pub const DEFAULT_SHAKE_START_THRESHOLD: f64 = 1.2;

/// Default mean magnitude (g) that ends a shake.
pub const DEFAULT_SHAKE_STOP_THRESHOLD: f64 = 0.9;

/// Absorbs rounding in the window sum so that a series sitting exactly on a
/// threshold still crosses it.
const MEAN_TOLERANCE: f64 = 1e-9;

/// Shake detector tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ShakeConfig {
    /// Number of magnitudes in the rolling window.
    pub window_size: usize,

    /// Mean magnitude at or above which a shake starts.
    ///
    /// Also the single-sample level that marks a shake as possible.
    pub start_threshold: f64,

    /// Mean magnitude at or below which a shake stops.
    ///
    /// Must be below `start_threshold`.
    pub stop_threshold: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_SHAKE_WINDOW,
            start_threshold: DEFAULT_SHAKE_START_THRESHOLD,
            stop_threshold: DEFAULT_SHAKE_STOP_THRESHOLD,
        }
    }
}

/// Debounced shake classifier over a rolling magnitude window.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    config: ShakeConfig,
    window: VecDeque<f64>,
    shaking: bool,
    shake_possible: bool,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        let capacity = config.window_size.max(1);
        Self {
            config,
            window: VecDeque::with_capacity(capacity + 1),
            shaking: false,
            shake_possible: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ShakeConfig::default())
    }

    /// Feed one acceleration magnitude.
    ///
    /// # Returns
    ///
    /// `Some(shaking)` when this sample crosses a hysteresis threshold,
    /// `None` otherwise.
    pub fn update(&mut self, magnitude: f64) -> Option<bool> {
        let window_size = self.config.window_size.max(1);

        self.window.push_back(magnitude);
        while self.window.len() > window_size {
            self.window.pop_front();
        }

        self.shake_possible = magnitude >= self.config.start_threshold;

        let mean = self.mean();
        let shaking = if self.shaking {
            mean - MEAN_TOLERANCE > self.config.stop_threshold
        } else {
            mean + MEAN_TOLERANCE >= self.config.start_threshold
        };

        if shaking == self.shaking {
            return None;
        }
        self.shaking = shaking;
        Some(shaking)
    }

    /// Mean magnitude over the configured window size.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.window.iter().sum();
        sum / self.config.window_size.max(1) as f64
    }

    /// Debounced shake state.
    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// Whether the most recent single sample reached the start threshold.
    pub fn is_shake_possible(&self) -> bool {
        self.shake_possible
    }

    /// Number of samples currently in the window.
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Forget all samples and return to the not-shaking state.
    pub fn reset(&mut self) {
        self.window.clear();
        self.shaking = false;
        self.shake_possible = false;
    }
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
