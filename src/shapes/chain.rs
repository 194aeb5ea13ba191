use crate::core::config::{LINEAR_SLOP, POLYGON_RADIUS};
use crate::error::PhysicsError;
use crate::math::{Transform, Vector2};
use crate::shapes::{MassData, Shape, ShapeKind, ShapeType};
use crate::Result;
use std::any::Any;

/// A free-form sequence of line segments with no interior
///
/// A chain is built once, either open ([`ChainShape::create_chain`]) or
/// closed ([`ChainShape::create_loop`]). A loop stores its first vertex
/// again at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainShape {
    radius: f32,
    vertices: Vec<Vector2>,
    is_loop: bool,
}

impl ChainShape {
    pub fn new() -> Self {
        Self {
            radius: POLYGON_RADIUS,
            vertices: Vec::new(),
            is_loop: false,
        }
    }

    /// Builds a closed loop; the first vertex is repeated at the end
    pub fn create_loop(&mut self, vertices: &[Vector2]) -> Result<()> {
        self.check_vertices(vertices, 3)?;
        let closing = vertices[0] - vertices[vertices.len() - 1];
        if closing.length_squared() <= LINEAR_SLOP * LINEAR_SLOP {
            return Err(PhysicsError::InvalidParameter(
                "loop closes on its first vertex; leave the repeat out".to_string(),
            ));
        }
        let mut stored = Vec::with_capacity(vertices.len() + 1);
        stored.extend_from_slice(vertices);
        stored.push(vertices[0]);
        self.vertices = stored;
        self.is_loop = true;
        Ok(())
    }

    /// Builds an open chain
    pub fn create_chain(&mut self, vertices: &[Vector2]) -> Result<()> {
        self.check_vertices(vertices, 2)?;
        self.vertices = vertices.to_vec();
        self.is_loop = false;
        Ok(())
    }

    fn check_vertices(&self, vertices: &[Vector2], min: usize) -> Result<()> {
        if !self.vertices.is_empty() {
            return Err(PhysicsError::InvalidParameter(
                "chain shape has already been created".to_string(),
            ));
        }
        if vertices.len() < min {
            return Err(PhysicsError::InvalidParameter(format!(
                "chain needs at least {} vertices, got {}",
                min,
                vertices.len()
            )));
        }
        for (i, pair) in vertices.windows(2).enumerate() {
            let d = pair[1] - pair[0];
            if d.length_squared() <= LINEAR_SLOP * LINEAR_SLOP {
                return Err(PhysicsError::InvalidParameter(format!(
                    "chain vertices {} and {} are too close",
                    i,
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Number of stored vertices, including the repeated closing vertex of a loop
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Option<Vector2> {
        self.vertices.get(index).copied()
    }

    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Number of edge children in this chain
    pub fn child_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

impl Default for ChainShape {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeKind for ChainShape {
    const TYPE: ShapeType = ShapeType::Chain;
}

impl Shape for ChainShape {
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
        MassData::default()
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
