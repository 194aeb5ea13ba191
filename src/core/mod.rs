pub mod config;
pub mod storage;
mod world;
mod context;

pub use self::config::EngineConfig;
pub use self::storage::Arena;
pub use self::world::World;
pub use self::context::PhysicsContext;

use slotmap::new_key_type;

new_key_type! {
    /// Identifies a simulation space
    pub struct WorldHandle;

    /// Identifies a rigid body within a world
    pub struct BodyHandle;

    /// Identifies a fixture attached to a body
    pub struct FixtureHandle;

    /// Identifies a standalone or fixture-owned shape
    pub struct ShapeHandle;
}
