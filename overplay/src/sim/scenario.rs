//! Canned sensor traces for the simulator.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::attitude::{Acceleration, Angle, MotionSample, Quaternion};
use crate::geofence::GeoPoint;

/// Motion samples generated per render frame (120 Hz sensor, 60 Hz ticks).
pub const SCENARIO_SAMPLES_PER_FRAME: usize = 2;

/// Walking speed for [`Scenario::Walk`], in metres per second.
const WALK_SPEED_M_PER_S: f64 = 1.5;

/// Starting point of [`Scenario::Walk`].
const WALK_ORIGIN: GeoPoint = GeoPoint {
    latitude: -33.9249,
    longitude: 18.4241,
};

/// Sensor input for one render frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioFrame {
    /// Seconds since the scenario began.
    pub time: f64,
    pub samples: Vec<MotionSample>,
    pub location: Option<GeoPoint>,
}

/// A scripted gesture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Hold upright, roll right to scrub forward, level out.
    TiltSeek,
    /// Hold upright, tip back to raise the volume, level out.
    TiltVolume,
    /// Shake hard for a second, then hold still.
    Shake,
    /// Hold upright while walking in a straight line.
    Walk,
}

impl Scenario {
    pub fn all() -> [Scenario; 4] {
        [
            Scenario::TiltSeek,
            Scenario::TiltVolume,
            Scenario::Shake,
            Scenario::Walk,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::TiltSeek => "tilt-seek",
            Scenario::TiltVolume => "tilt-volume",
            Scenario::Shake => "shake",
            Scenario::Walk => "walk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::TiltSeek => "roll the device to scrub forward",
            Scenario::TiltVolume => "tip the device back to raise the volume",
            Scenario::Shake => "shake the device to pause playback",
            Scenario::Walk => "walk 30 m so the geofence restarts playback",
        }
    }

    /// Length of the scenario, in seconds.
    pub fn duration_secs(self) -> f64 {
        match self {
            Scenario::TiltSeek => 3.5,
            Scenario::TiltVolume => 2.5,
            Scenario::Shake => 3.0,
            Scenario::Walk => 20.0,
        }
    }

    /// Sensor input for every frame at the given tick interval.
    pub fn frames(self, tick: Duration) -> Vec<ScenarioFrame> {
        let tick_secs = tick.as_secs_f64();
        if tick_secs <= 0.0 {
            return Vec::new();
        }
        let frame_count = (self.duration_secs() / tick_secs).round() as usize;
        let sample_step = tick_secs / SCENARIO_SAMPLES_PER_FRAME as f64;
        let location_every = (1.0 / tick_secs).round().max(1.0) as usize;

        (0..frame_count)
            .map(|frame| {
                let time = frame as f64 * tick_secs;
                let samples = (0..SCENARIO_SAMPLES_PER_FRAME)
                    .map(|i| self.sample_at(time + i as f64 * sample_step, frame * 2 + i))
                    .collect();
                let location = match self {
                    Scenario::Walk if frame % location_every == 0 => {
                        Some(WALK_ORIGIN.offset_north(time * WALK_SPEED_M_PER_S))
                    }
                    _ => None,
                };
                ScenarioFrame {
                    time,
                    samples,
                    location,
                }
            })
            .collect()
    }

    fn sample_at(self, time: f64, index: usize) -> MotionSample {
        match self {
            Scenario::TiltSeek if (0.5..2.5).contains(&time) => upright_with_roll(0.2),
            Scenario::TiltVolume if (0.5..2.0).contains(&time) => pose(0.0, 0.45),
            Scenario::Shake if (0.5..1.5).contains(&time) => {
                // Alternate direction so the attitude jitters as well
                let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
                MotionSample::new(
                    Quaternion::from_roll_pitch(
                        Angle::from_revolutions(0.03 * sign),
                        Angle::from_revolutions(0.25),
                    ),
                    Acceleration::new(1.6 * sign, 1.2 * sign, 0.0),
                )
            }
            _ => pose(0.0, 0.25),
        }
    }
}

fn pose(roll_rev: f64, pitch_rev: f64) -> MotionSample {
    MotionSample::at_rest(Quaternion::from_roll_pitch(
        Angle::from_revolutions(roll_rev),
        Angle::from_revolutions(pitch_rev),
    ))
}

fn upright_with_roll(roll_rev: f64) -> MotionSample {
    pose(roll_rev, 0.25)
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::all()
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Scenario::all().iter().map(|s| s.name()).collect();
                format!("unknown scenario '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_nanos(16_666_667);

    #[test]
    fn test_parse_names() {
        for scenario in Scenario::all() {
            assert_eq!(scenario.name().parse::<Scenario>(), Ok(scenario));
        }
        assert!("jump".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_frame_count_and_samples() {
        let frames = Scenario::TiltSeek.frames(TICK);
        assert_eq!(frames.len(), 210);
        assert!(frames
            .iter()
            .all(|frame| frame.samples.len() == SCENARIO_SAMPLES_PER_FRAME));
        assert!(frames.iter().all(|frame| frame.location.is_none()));
    }

    #[test]
    fn test_walk_emits_location_each_second() {
        let frames = Scenario::Walk.frames(TICK);
        let fixes: Vec<_> = frames.iter().filter_map(|frame| frame.location).collect();
        assert_eq!(fixes.len(), 20);
        let walked = fixes[0].distance_to(&fixes[19]);
        assert!((walked - 19.0 * WALK_SPEED_M_PER_S).abs() < 0.1);
    }

    #[test]
    fn test_shake_is_strong() {
        let frames = Scenario::Shake.frames(TICK);
        let peak = frames
            .iter()
            .flat_map(|frame| frame.samples.iter())
            .map(|sample| sample.user_acceleration.magnitude())
            .fold(0.0, f64::max);
        assert!(peak >= 2.0 - 1e-9);
    }
}
