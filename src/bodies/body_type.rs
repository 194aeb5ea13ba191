use crate::error::PhysicsError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyType {
    /// Zero mass, zero velocity, moved only by the caller
    #[default]
    Static = 0,

    /// Zero mass, velocity set by the caller, moved by the solver
    Kinematic = 1,

    /// Positive mass, velocity determined by forces, moved by the solver
    Dynamic = 2,
}

impl BodyType {
    /// Decodes a boundary code, substituting `Static` for anything unrecognized
    pub fn from_code(code: i32) -> Self {
        Self::try_from(code).unwrap_or(BodyType::Static)
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for BodyType {
    type Error = PhysicsError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BodyType::Static),
            1 => Ok(BodyType::Kinematic),
            2 => Ok(BodyType::Dynamic),
            other => Err(PhysicsError::InvalidBodyType(other)),
        }
    }
}
