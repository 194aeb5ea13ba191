use crate::math::{Rot, Vector2};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A rigid 2D transform: translation followed by rotation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation
    pub p: Vector2,

    /// Rotation
    pub q: Rot,
}

impl Transform {
    #[inline]
    pub fn new(position: Vector2, rotation: Rot) -> Self {
        Self { p: position, q: rotation }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(Vector2::zero(), Rot::identity())
    }

    /// Creates a transform from a position and an angle in radians
    #[inline]
    pub fn from_position_angle(position: Vector2, angle: f32) -> Self {
        Self::new(position, Rot::from_angle(angle))
    }

    /// Maps a local point into the parent frame
    #[inline]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        self.q.rotate(point) + self.p
    }

    /// Maps a parent-frame point into the local frame
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector2) -> Vector2 {
        self.q.inv_rotate(point - self.p)
    }

    /// Writes the transform as `[p.x, p.y, q.c, q.s]`
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.p.x, self.p.y, self.q.c, self.q.s]
    }
}
