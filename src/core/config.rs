use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Collision and constraint tolerance, in meters
pub const LINEAR_SLOP: f32 = 0.005;

/// Skin radius of polygon, edge and chain shapes
pub const POLYGON_RADIUS: f32 = 2.0 * LINEAR_SLOP;

/// Maximum number of vertices on a convex polygon
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Defaults applied when new worlds are created
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Gravity used by worlds created without an explicit value
    pub gravity: Vector2,

    /// Whether bodies in new worlds may fall asleep
    pub allow_sleep: bool,

    /// Whether accumulated forces are cleared after each step
    pub auto_clear_forces: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -10.0),
            allow_sleep: true,
            auto_clear_forces: true,
        }
    }
}
