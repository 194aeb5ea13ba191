use crate::math::{Transform, Vector2};
use std::any::Any;
use std::fmt::{self, Debug};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Geometry kind, with the integer codes used across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ShapeType {
    Circle = 0,
    Edge = 1,
    Polygon = 2,
    Chain = 3,
}

impl ShapeType {
    /// Returns the boundary code for this shape type
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ShapeType::Circle => "circle",
            ShapeType::Edge => "edge",
            ShapeType::Polygon => "polygon",
            ShapeType::Chain => "chain",
        };
        f.write_str(name)
    }
}

/// Mass properties of a shape or body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MassData {
    /// The mass of the shape, usually in kilograms
    pub mass: f32,

    /// The position of the center of mass relative to the shape origin
    pub center: Vector2,

    /// The rotational inertia of the shape about its local origin
    pub inertia: f32,
}

impl MassData {
    pub fn new(mass: f32, center: Vector2, inertia: f32) -> Self {
        Self { mass, center, inertia }
    }

    /// Flattens to the boundary field order `[mass, center.x, center.y, inertia]`
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.mass, self.center.x, self.center.y, self.inertia]
    }
}

/// Base trait for collision geometry
pub trait Shape: Send + Sync + Debug + 'static {
    /// Returns the kind of this shape
    fn shape_type(&self) -> ShapeType;

    /// Returns the skin radius of the shape
    fn radius(&self) -> f32;

    /// Sets the skin radius of the shape
    fn set_radius(&mut self, radius: f32);

    /// Computes mass properties for the given density
    fn compute_mass(&self, density: f32) -> MassData;

    /// Returns whether a world-space point lies inside the shape placed at `transform`
    fn test_point(&self, transform: &Transform, point: Vector2) -> bool;

    /// Returns a dynamic reference to any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Returns a dynamic mutable reference to any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone the shape to create a new box
    fn clone_shape(&self) -> Box<dyn Shape>;
}

/// Concrete shape types, for checked downcasts from `dyn Shape`
pub trait ShapeKind: Shape + Sized {
    const TYPE: ShapeType;
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_shape()
    }
}
