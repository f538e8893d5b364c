//! Simulated media transport.

use std::collections::VecDeque;

use crate::playback::{
    MediaTransport, SeekCompletion, SeekRequest, SeekTicket, TimeControlStatus,
    TransportCommand, TransportStatus,
};

/// A media clock with a call log.
///
/// Seeks stay pending until [`complete_next_seek`](Self::complete_next_seek)
/// or [`advance`](Self::advance); the playhead lands on the target only
/// when the seek completes.
#[derive(Debug)]
pub struct SimulatedTransport {
    rate: f32,
    volume: f32,
    current_time: f64,
    duration: f64,
    status: TransportStatus,
    calls: Vec<TransportCommand>,
    pending: VecDeque<(SeekRequest, SeekCompletion)>,
}

impl SimulatedTransport {
    /// Ready-to-play media of `duration` seconds, paused at the start at
    /// full volume.
    pub fn new(duration: f64) -> Self {
        Self {
            rate: 0.0,
            volume: 1.0,
            current_time: 0.0,
            duration,
            status: TransportStatus::ReadyToPlay,
            calls: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_current_time(mut self, seconds: f64) -> Self {
        self.current_time = seconds;
        self
    }

    pub fn set_status(&mut self, status: TransportStatus) {
        self.status = status;
    }

    /// Every call received, in order.
    pub fn calls(&self) -> &[TransportCommand] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<TransportCommand> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Seek requests received, in order.
    pub fn seek_requests(&self) -> Vec<SeekRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                TransportCommand::Seek { request, .. } => Some(*request),
                _ => None,
            })
            .collect()
    }

    pub fn pending_seeks(&self) -> usize {
        self.pending.len()
    }

    /// Finish the oldest pending seek.
    pub fn complete_next_seek(&mut self) -> Option<SeekTicket> {
        let (request, completion) = self.pending.pop_front()?;
        self.current_time = request.target.clamp(0.0, self.duration.max(0.0));
        let ticket = completion.ticket();
        completion.complete();
        Some(ticket)
    }

    /// Finish pending seeks, then play for `seconds` at the current rate.
    pub fn advance(&mut self, seconds: f64) {
        while self.complete_next_seek().is_some() {}
        if self.rate > 0.0 {
            self.current_time =
                (self.current_time + seconds * f64::from(self.rate)).min(self.duration);
        }
    }
}

impl MediaTransport for SimulatedTransport {
    fn rate(&self) -> f32 {
        self.rate
    }

    fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
        self.calls.push(TransportCommand::SetRate { rate });
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.calls.push(TransportCommand::SetVolume { volume });
    }

    fn seek(&mut self, request: SeekRequest, completion: SeekCompletion) {
        self.calls.push(TransportCommand::Seek {
            ticket: completion.ticket(),
            request,
        });
        self.pending.push_back((request, completion));
    }

    fn restart(&mut self) {
        self.current_time = 0.0;
        self.calls.push(TransportCommand::Restart);
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn status(&self) -> TransportStatus {
        self.status.clone()
    }

    fn time_control_status(&self) -> TimeControlStatus {
        if self.rate > 0.0 {
            TimeControlStatus::Playing
        } else {
            TimeControlStatus::Paused
        }
    }
}
