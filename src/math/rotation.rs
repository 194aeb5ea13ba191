use crate::math::Vector2;
use nalgebra as na;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 2D rotation stored as the cosine/sine pair of its angle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Rot {
    /// Sine of the angle
    pub s: f32,

    /// Cosine of the angle
    pub c: f32,
}

impl Rot {
    /// Creates a rotation from an angle in radians
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self { s, c }
    }

    #[inline]
    pub fn identity() -> Self {
        Self { s: 0.0, c: 1.0 }
    }

    /// Returns the angle in radians, in the range [-PI, PI]
    #[inline]
    pub fn angle(&self) -> f32 {
        self.s.atan2(self.c)
    }

    /// Rotates a vector
    #[inline]
    pub fn rotate(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.c * v.x - self.s * v.y, self.s * v.x + self.c * v.y)
    }

    /// Rotates a vector by the inverse of this rotation
    #[inline]
    pub fn inv_rotate(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.c * v.x + self.s * v.y, -self.s * v.x + self.c * v.y)
    }

    #[inline]
    pub fn to_nalgebra(&self) -> na::Rotation2<f32> {
        na::Rotation2::from_matrix_unchecked(na::Matrix2::new(self.c, -self.s, self.s, self.c))
    }

    #[inline]
    pub fn from_nalgebra(rotation: &na::Rotation2<f32>) -> Self {
        let m = rotation.matrix();
        Self { s: m[(1, 0)], c: m[(0, 0)] }
    }
}

impl Default for Rot {
    fn default() -> Self {
        Self::identity()
    }
}
