//! Raw device-motion samples as delivered by a motion sensor source.

use super::quaternion::Quaternion;

/// User acceleration (gravity removed), in g.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Acceleration {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the acceleration vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// One device-motion sample: rotation plus user acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub attitude: Quaternion,
    pub user_acceleration: Acceleration,
}

impl MotionSample {
    pub fn new(attitude: Quaternion, user_acceleration: Acceleration) -> Self {
        Self {
            attitude,
            user_acceleration,
        }
    }

    /// A motionless sample at the given attitude.
    pub fn at_rest(attitude: Quaternion) -> Self {
        Self::new(attitude, Acceleration::default())
    }
}
