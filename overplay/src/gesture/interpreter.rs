//! Attitude to intent mapping.

use crate::attitude::AttitudeSample;

use super::config::GestureConfig;
use super::intent::{GestureIntent, Playhead};

/// Normalised tilt inputs derived from an attitude sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInputs {
    /// Roll in quarter revolutions; ±1 at a full sideways tilt.
    pub seek: f64,
    /// Pitch offset from upright, in revolutions.
    pub volume: f64,
}

impl GestureInputs {
    pub fn from_attitude(attitude: &AttitudeSample) -> Self {
        Self {
            seek: attitude.roll.revolutions() * 4.0,
            volume: attitude.pitch.revolutions() - 0.25,
        }
    }
}

/// Stateless intent classifier.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    config: GestureConfig,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify the latest attitude. No attitude means no gesture.
    pub fn interpret(&self, attitude: Option<&AttitudeSample>, playhead: Playhead) -> GestureIntent {
        let Some(attitude) = attitude else {
            return GestureIntent::Neutral;
        };
        let inputs = GestureInputs::from_attitude(attitude);

        if inputs.seek.abs() > self.config.seek_threshold {
            let target = playhead.current_time + inputs.seek * self.config.seek_time_scale;
            return GestureIntent::Seek(target.max(0.0).min(playhead.duration));
        }

        if inputs.volume.abs() > self.config.volume_threshold {
            return GestureIntent::VolumeAdjust((inputs.volume * self.config.volume_scale) as f32);
        }

        GestureIntent::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attitude::Angle;
    use crate::gesture::GestureProfile;

    fn attitude(roll_rev: f64, pitch_rev: f64) -> AttitudeSample {
        AttitudeSample::new(
            Angle::from_revolutions(roll_rev),
            Angle::from_revolutions(pitch_rev),
        )
    }

    fn upright() -> AttitudeSample {
        attitude(0.0, 0.25)
    }

    #[test]
    fn test_no_attitude_is_neutral() {
        let interpreter = GestureInterpreter::default();
        assert_eq!(
            interpreter.interpret(None, Playhead::new(10.0, 100.0)),
            GestureIntent::Neutral
        );
    }

    #[test]
    fn test_upright_is_neutral() {
        let interpreter = GestureInterpreter::default();
        assert_eq!(
            interpreter.interpret(Some(&upright()), Playhead::new(10.0, 100.0)),
            GestureIntent::Neutral
        );
    }

    #[test]
    fn test_seek_target() {
        let interpreter = GestureInterpreter::default();
        let intent = interpreter.interpret(Some(&attitude(0.2, 0.25)), Playhead::new(60.0, 120.0));
        match intent {
            GestureIntent::Seek(target) => assert!((target - 60.56).abs() < 1e-9),
            other => panic!("expected seek, got {:?}", other),
        }
    }

    #[test]
    fn test_seek_clamps_to_media() {
        let interpreter = GestureInterpreter::default();
        let playhead = Playhead::new(0.2, 120.0);
        assert_eq!(
            interpreter.interpret(Some(&attitude(-0.2, 0.25)), playhead),
            GestureIntent::Seek(0.0)
        );

        let playhead = Playhead::new(119.9, 120.0);
        assert_eq!(
            interpreter.interpret(Some(&attitude(0.2, 0.25)), playhead),
            GestureIntent::Seek(120.0)
        );
    }

    #[test]
    fn test_seek_wins_over_volume() {
        let interpreter = GestureInterpreter::default();
        let intent = interpreter.interpret(Some(&attitude(0.2, 0.45)), Playhead::new(60.0, 120.0));
        assert!(intent.is_seek());
    }

    #[test]
    fn test_volume_adjust() {
        let interpreter = GestureInterpreter::default();
        match interpreter.interpret(Some(&attitude(0.0, 0.45)), Playhead::new(0.0, 10.0)) {
            GestureIntent::VolumeAdjust(delta) => assert!((delta - 0.02).abs() < 1e-6),
            other => panic!("expected volume, got {:?}", other),
        }
        match interpreter.interpret(Some(&attitude(0.0, 0.05)), Playhead::new(0.0, 10.0)) {
            GestureIntent::VolumeAdjust(delta) => assert!((delta + 0.02).abs() < 1e-6),
            other => panic!("expected volume, got {:?}", other),
        }
    }

    #[test]
    fn test_relaxed_profile_volume_threshold() {
        let standard = GestureInterpreter::default();
        let relaxed = GestureInterpreter::new(GestureConfig::for_profile(GestureProfile::Relaxed));
        let tilt = attitude(0.0, 0.37);
        let playhead = Playhead::new(0.0, 10.0);

        assert!(matches!(
            standard.interpret(Some(&tilt), playhead),
            GestureIntent::VolumeAdjust(_)
        ));
        assert_eq!(relaxed.interpret(Some(&tilt), playhead), GestureIntent::Neutral);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let interpreter = GestureInterpreter::default();
        let playhead = Playhead::new(5.0, 10.0);
        // seekInput exactly 0.5
        assert_eq!(
            interpreter.interpret(Some(&attitude(0.125, 0.25)), playhead),
            GestureIntent::Neutral
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_seek_target_within_media(
                roll in -0.5..0.5_f64,
                pitch in -0.5..0.5_f64,
                current in 0.0..500.0_f64,
                duration in 0.0..500.0_f64,
            ) {
                let interpreter = GestureInterpreter::default();
                let playhead = Playhead::new(current.min(duration), duration);
                if let GestureIntent::Seek(target) =
                    interpreter.interpret(Some(&attitude(roll, pitch)), playhead)
                {
                    prop_assert!(target >= 0.0);
                    prop_assert!(target <= duration);
                }
            }
        }
    }
}
