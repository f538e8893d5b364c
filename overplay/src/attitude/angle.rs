//! Plane angle with explicit units.

use std::f64::consts::TAU;
use std::fmt;

use serde::Serialize;

/// An angle, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    /// One revolution is a full turn (2π radians).
    pub fn from_revolutions(revolutions: f64) -> Self {
        Self(revolutions * TAU)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn revolutions(self) -> f64 {
        self.0 / TAU
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}
