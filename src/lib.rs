//! Handle-based boundary layer over a 2D rigid-body engine core.
//!
//! The engine side (`math`, `shapes`, `bodies`, `core`) follows the Box2D
//! object model: worlds own bodies, bodies own fixtures, fixtures own a copy
//! of their shape. The [`bridge`] module exposes that model to a foreign
//! caller as a flat call table of integer handles, scalars and host arrays,
//! and [`ffi`] exports the same table with a C ABI.

pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod bridge;
pub mod ffi;

/// Re-export common types for easier usage
pub use crate::core::{BodyHandle, EngineConfig, FixtureHandle, PhysicsContext, ShapeHandle, WorldHandle};
pub use crate::bodies::{Body, BodyDef, BodyType, Filter, Fixture, FixtureDef};
pub use crate::bridge::{Bridge, BridgeConfig, RawHandle};
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use crate::shapes::ShapeType;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid {kind} handle: {handle:#x}")]
        InvalidHandle { kind: &'static str, handle: u64 },

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Unknown body type code: {0}")]
        InvalidBodyType(i32),

        #[error("Array range [{offset}, {offset} + {len}) exceeds capacity {capacity}")]
        BufferOutOfRange { offset: i32, len: i32, capacity: usize },

        #[error("Output array needs {required} elements, got {actual}")]
        BufferTooSmall { required: usize, actual: usize },

        #[error("Expected a {expected} shape, found {actual}")]
        ShapeMismatch { expected: ShapeType, actual: ShapeType },

        #[error("Shape {handle:#x} is owned by a fixture")]
        ShapeInUse { handle: u64 },

        #[error("{kind} {handle:#x} does not belong to {owner:#x}")]
        NotOwned { kind: &'static str, handle: u64, owner: u64 },

        #[error("Null pointer passed for {0}")]
        NullPointer(&'static str),
    }

    impl PhysicsError {
        /// Stable negative status code reported across the C ABI
        pub fn code(&self) -> i32 {
            match self {
                PhysicsError::InvalidHandle { .. } => -1,
                PhysicsError::InvalidParameter(_) => -2,
                PhysicsError::InvalidBodyType(_) => -3,
                PhysicsError::BufferOutOfRange { .. } => -4,
                PhysicsError::BufferTooSmall { .. } => -5,
                PhysicsError::ShapeMismatch { .. } => -6,
                PhysicsError::ShapeInUse { .. } => -7,
                PhysicsError::NotOwned { .. } => -8,
                PhysicsError::NullPointer(_) => -9,
            }
        }
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
