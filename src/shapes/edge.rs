use crate::core::config::POLYGON_RADIUS;
use crate::math::{Transform, Vector2};
use crate::shapes::{MassData, Shape, ShapeKind, ShapeType};
use std::any::Any;

/// A line segment, optionally with ghost vertices for smooth collision along chains
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    radius: f32,
    vertex1: Vector2,
    vertex2: Vector2,
    vertex0: Option<Vector2>,
    vertex3: Option<Vector2>,
}

impl EdgeShape {
    pub fn new() -> Self {
        Self {
            radius: POLYGON_RADIUS,
            vertex1: Vector2::zero(),
            vertex2: Vector2::zero(),
            vertex0: None,
            vertex3: None,
        }
    }

    /// Sets the segment end points and clears any ghost vertices
    pub fn set(&mut self, v1: Vector2, v2: Vector2) {
        self.vertex1 = v1;
        self.vertex2 = v2;
        self.vertex0 = None;
        self.vertex3 = None;
    }

    pub fn vertex1(&self) -> Vector2 {
        self.vertex1
    }

    pub fn vertex2(&self) -> Vector2 {
        self.vertex2
    }

    /// Ghost vertex preceding `vertex1`
    pub fn vertex0(&self) -> Option<Vector2> {
        self.vertex0
    }

    /// Ghost vertex following `vertex2`
    pub fn vertex3(&self) -> Option<Vector2> {
        self.vertex3
    }

    pub fn set_ghost_vertices(&mut self, vertex0: Option<Vector2>, vertex3: Option<Vector2>) {
        self.vertex0 = vertex0;
        self.vertex3 = vertex3;
    }
}

impl Default for EdgeShape {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeKind for EdgeShape {
    const TYPE: ShapeType = ShapeType::Edge;
}

impl Shape for EdgeShape {
    fn shape_type(&self) -> ShapeType {
        Self::TYPE
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    fn compute_mass(&self, _density: f32) -> MassData {
        MassData::new(0.0, (self.vertex1 + self.vertex2) * 0.5, 0.0)
    }

    fn test_point(&self, _transform: &Transform, _point: Vector2) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}
