use crate::math::{Transform, Vector2};
use crate::shapes::{MassData, Shape, ShapeKind, ShapeType};
use std::any::Any;
use std::f32::consts::PI;

/// A solid circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    radius: f32,

    /// Center relative to the body origin
    position: Vector2,
}

impl CircleShape {
    /// Creates a circle of the given radius centered on the body origin
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            position: Vector2::zero(),
        }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }
}

impl Default for CircleShape {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ShapeKind for CircleShape {
    const TYPE: ShapeType = ShapeType::Circle;
}

impl Shape for CircleShape {
    fn shape_type(&self) -> ShapeType {
        Self::TYPE
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    fn compute_mass(&self, density: f32) -> MassData {
        let r2 = self.radius * self.radius;
        let mass = density * PI * r2;
        // inertia about the local origin
        let inertia = mass * (0.5 * r2 + self.position.dot(&self.position));
        MassData::new(mass, self.position, inertia)
    }

    fn test_point(&self, transform: &Transform, point: Vector2) -> bool {
        let center = transform.transform_point(self.position);
        let d = point - center;
        d.dot(&d) <= self.radius * self.radius
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
