mod body;
mod body_type;
mod fixture;

pub use self::body::Body;
pub use self::body_type::BodyType;
pub use self::fixture::{Filter, Fixture, FixtureDef};

use crate::math::Vector2;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// State bits stored on every body
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u16 {
            /// Body is simulated this step
            const AWAKE = 0x0002;

            /// Body may fall asleep when it comes to rest
            const AUTO_SLEEP = 0x0004;

            /// Body uses continuous collision against other dynamic bodies
            const BULLET = 0x0008;

            /// Body never rotates
            const FIXED_ROTATION = 0x0010;

            /// Body participates in the world at all
            const ACTIVE = 0x0020;
        }
    }
}

/// Construction parameters for a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub body_type: BodyType,
    pub position: Vector2,
    pub angle: f32,
    pub linear_velocity: Vector2,
    pub angular_velocity: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub allow_sleep: bool,
    pub awake: bool,
    pub fixed_rotation: bool,
    pub bullet: bool,
    pub active: bool,
    pub gravity_scale: f32,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            position: Vector2::zero(),
            angle: 0.0,
            linear_velocity: Vector2::zero(),
            angular_velocity: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            allow_sleep: true,
            awake: true,
            fixed_rotation: false,
            bullet: false,
            active: true,
            gravity_scale: 1.0,
        }
    }
}

impl BodyDef {
    /// A default definition for a dynamic body at `position`
    pub fn dynamic(position: Vector2) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position,
            ..Self::default()
        }
    }
}
