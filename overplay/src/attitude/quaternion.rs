//! Rotation quaternion and the roll/pitch it implies.
//!
//! # Conversion
//!
//! ```text
//! roll  = atan2(2(y·w − x·z), 1 − 2y² − 2z²)
//! pitch = atan2(2(x·w + y·z), 1 − 2x² − 2z²)
//! ```
//!
//! With the device held upright in portrait, pitch sits at a quarter
//! revolution and roll at zero. Rolling the device left/right moves roll;
//! tipping it towards/away from the viewer moves pitch.

use serde::Serialize;

use super::angle::Angle;

/// Device orientation as roll and pitch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AttitudeSample {
    pub roll: Angle,
    pub pitch: Angle,
}

impl AttitudeSample {
    pub fn new(roll: Angle, pitch: Angle) -> Self {
        Self { roll, pitch }
    }
}

/// A rotation quaternion `(x, y, z, w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The zero rotation.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` about the x axis.
    pub fn about_x(angle: Angle) -> Self {
        let half = angle.radians() / 2.0;
        Self::new(half.sin(), 0.0, 0.0, half.cos())
    }

    /// Rotation of `angle` about the y axis.
    pub fn about_y(angle: Angle) -> Self {
        let half = angle.radians() / 2.0;
        Self::new(0.0, half.sin(), 0.0, half.cos())
    }

    /// Build a quaternion whose [`roll`](Self::roll) and [`pitch`](Self::pitch)
    /// come back as the given angles.
    ///
    /// Exact for `|roll| < π/2`, which covers every gesture the interpreter
    /// recognises. Used to synthesise sensor traces.
    pub fn from_roll_pitch(roll: Angle, pitch: Angle) -> Self {
        let roll_rad = roll.radians();
        let pitch_rad = pitch.radians();
        // The y-then-x composition scales pitch's sine by cos(roll).
        let x_angle = pitch_rad.sin().atan2(pitch_rad.cos() * roll_rad.cos());
        Self::about_y(roll).multiply(&Self::about_x(Angle::from_radians(x_angle)))
    }

    /// Hamilton product `self ⊗ other`.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        let (a, b) = (self, other);
        Quaternion {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Scale to unit length. Returns `None` for a zero quaternion.
    pub fn normalized(&self) -> Option<Quaternion> {
        let norm = self.norm();
        if norm <= f64::EPSILON || !norm.is_finite() {
            return None;
        }
        Some(Quaternion::new(
            self.x / norm,
            self.y / norm,
            self.z / norm,
            self.w / norm,
        ))
    }

    pub fn roll(&self) -> Angle {
        let Quaternion { x, y, z, w } = *self;
        Angle::from_radians((2.0 * (y * w - x * z)).atan2(1.0 - 2.0 * y * y - 2.0 * z * z))
    }

    pub fn pitch(&self) -> Angle {
        let Quaternion { x, y, z, w } = *self;
        Angle::from_radians((2.0 * (x * w + y * z)).atan2(1.0 - 2.0 * x * x - 2.0 * z * z))
    }

    pub fn attitude(&self) -> AttitudeSample {
        AttitudeSample::new(self.roll(), self.pitch())
    }
}
