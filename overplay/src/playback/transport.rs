//! Media transport abstraction.

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// Identifies one issued seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeekTicket(pub u64);

impl fmt::Display for SeekTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A seek with tolerances, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeekRequest {
    pub target: f64,
    pub tolerance_before: f64,
    pub tolerance_after: f64,
}

impl SeekRequest {
    pub fn new(target: f64, tolerance: f64) -> Self {
        Self {
            target,
            tolerance_before: tolerance,
            tolerance_after: tolerance,
        }
    }

    /// A seek that must land exactly on `target`.
    pub fn exact(target: f64) -> Self {
        Self::new(target, 0.0)
    }
}

/// One-shot handle the transport completes when a seek finishes.
///
/// May be completed from any thread. Completions are queued and applied on
/// the next controller tick. Dropping the handle without completing it
/// leaves the seek in flight.
#[derive(Debug)]
pub struct SeekCompletion {
    ticket: SeekTicket,
    tx: Option<mpsc::UnboundedSender<SeekTicket>>,
}

impl SeekCompletion {
    pub(crate) fn new(ticket: SeekTicket, tx: mpsc::UnboundedSender<SeekTicket>) -> Self {
        Self {
            ticket,
            tx: Some(tx),
        }
    }

    /// A completion nobody listens to, for seeks outside the sequencer.
    pub fn detached(ticket: SeekTicket) -> Self {
        Self { ticket, tx: None }
    }

    pub fn ticket(&self) -> SeekTicket {
        self.ticket
    }

    /// Report that the seek finished, successfully or not.
    pub fn complete(self) {
        if let Some(tx) = self.tx {
            let _ = tx.send(self.ticket);
        }
    }
}

/// Whether the transport can play its media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportStatus {
    Unknown,
    ReadyToPlay,
    Failed(TransportError),
    /// A platform value this crate does not know about.
    Unsupported,
}

/// What the transport is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControlStatus {
    Paused,
    WaitingToPlay,
    Playing,
    /// A platform value this crate does not know about.
    Unsupported,
}

/// Media player driven by the controller.
///
/// Times are in seconds. Volume is in `0.0..=1.0`.
pub trait MediaTransport: Send {
    fn rate(&self) -> f32;

    fn set_rate(&mut self, rate: f32);

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    /// Begin a seek. The transport must eventually call
    /// [`SeekCompletion::complete`] on `completion`.
    fn seek(&mut self, request: SeekRequest, completion: SeekCompletion);

    /// Jump back to the start of the media immediately.
    fn restart(&mut self);

    fn current_time(&self) -> f64;

    fn duration(&self) -> f64;

    fn status(&self) -> TransportStatus;

    fn time_control_status(&self) -> TimeControlStatus;
}
