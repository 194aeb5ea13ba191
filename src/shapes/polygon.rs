use crate::core::config::{MAX_POLYGON_VERTICES, POLYGON_RADIUS};
use crate::error::PhysicsError;
use crate::math::{Rot, Transform, Vector2, EPSILON};
use crate::shapes::{MassData, Shape, ShapeKind, ShapeType};
use crate::Result;
use std::any::Any;

/// A convex polygon with counter-clockwise winding
///
/// Vertices are stored in the order they were supplied. A freshly created
/// polygon has no vertices until one of the `set*` methods is called.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    radius: f32,
    centroid: Vector2,
    vertices: Vec<Vector2>,
    normals: Vec<Vector2>,
}

impl PolygonShape {
    pub fn new() -> Self {
        Self {
            radius: POLYGON_RADIUS,
            centroid: Vector2::zero(),
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Creates an axis-aligned box with the given half-extents
    pub fn new_box(hx: f32, hy: f32) -> Result<Self> {
        let mut polygon = Self::new();
        polygon.set_as_box(hx, hy)?;
        Ok(polygon)
    }

    /// Replaces the vertices of the polygon
    ///
    /// Requires between 3 and [`MAX_POLYGON_VERTICES`] points forming a convex
    /// counter-clockwise polygon with no zero-length edges.
    pub fn set(&mut self, vertices: &[Vector2]) -> Result<()> {
        let count = vertices.len();
        if !(3..=MAX_POLYGON_VERTICES).contains(&count) {
            return Err(PhysicsError::InvalidParameter(format!(
                "polygon needs 3..={} vertices, got {}",
                MAX_POLYGON_VERTICES, count
            )));
        }

        let mut normals = Vec::with_capacity(count);
        for i in 0..count {
            let edge = vertices[(i + 1) % count] - vertices[i];
            if edge.length_squared() <= EPSILON * EPSILON {
                return Err(PhysicsError::InvalidParameter(format!(
                    "polygon edge {} has zero length",
                    i
                )));
            }
            let next = vertices[(i + 2) % count] - vertices[(i + 1) % count];
            if edge.cross(&next) <= 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "polygon turns clockwise or straight at vertex {}",
                    (i + 1) % count
                )));
            }
            normals.push(edge.cross_scalar(1.0).normalize());
        }

        let centroid = compute_centroid(vertices)?;

        self.vertices = vertices.to_vec();
        self.normals = normals;
        self.centroid = centroid;
        Ok(())
    }

    /// Makes the polygon an axis-aligned box centered on the body origin
    ///
    /// Both half-extents must be positive.
    pub fn set_as_box(&mut self, hx: f32, hy: f32) -> Result<()> {
        if !(hx > 0.0 && hy > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "box half-extents must be positive, got {} x {}",
                hx, hy
            )));
        }
        self.vertices = vec![
            Vector2::new(-hx, -hy),
            Vector2::new(hx, -hy),
            Vector2::new(hx, hy),
            Vector2::new(-hx, hy),
        ];
        self.normals = vec![
            Vector2::new(0.0, -1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(-1.0, 0.0),
        ];
        self.centroid = Vector2::zero();
        Ok(())
    }

    /// Makes the polygon a box with the given center and rotation in body space
    pub fn set_as_box_oriented(&mut self, hx: f32, hy: f32, center: Vector2, angle: f32) -> Result<()> {
        self.set_as_box(hx, hy)?;
        self.centroid = center;

        let xf = Transform::new(center, Rot::from_angle(angle));
        for (vertex, normal) in self.vertices.iter_mut().zip(self.normals.iter_mut()) {
            *vertex = xf.transform_point(*vertex);
            *normal = xf.q.rotate(*normal);
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex at `index`, if present
    pub fn vertex(&self, index: usize) -> Option<Vector2> {
        self.vertices.get(index).copied()
    }

    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    pub fn centroid(&self) -> Vector2 {
        self.centroid
    }
}

impl Default for PolygonShape {
    fn default() -> Self {
        Self::new()
    }
}

/// Area-weighted centroid; fails for clockwise or collinear input
fn compute_centroid(vertices: &[Vector2]) -> Result<Vector2> {
    let origin = Vector2::zero();
    let mut c = Vector2::zero();
    let mut area = 0.0;
    const INV3: f32 = 1.0 / 3.0;

    for i in 0..vertices.len() {
        let p2 = vertices[i];
        let p3 = vertices[(i + 1) % vertices.len()];

        let e1 = p2 - origin;
        let e2 = p3 - origin;
        let triangle_area = 0.5 * e1.cross(&e2);
        area += triangle_area;
        c += triangle_area * INV3 * (origin + p2 + p3);
    }

    if area <= EPSILON {
        return Err(PhysicsError::InvalidParameter(
            "polygon must be convex with counter-clockwise winding".to_string(),
        ));
    }

    Ok(c * (1.0 / area))
}

impl ShapeKind for PolygonShape {
    const TYPE: ShapeType = ShapeType::Polygon;
}

impl Shape for PolygonShape {
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
        let count = self.vertices.len();
        if count < 3 {
            return MassData::default();
        }

        // Triangle fan about the vertex average keeps the reference point inside.
        let mut s = Vector2::zero();
        for v in &self.vertices {
            s += *v;
        }
        s *= 1.0 / count as f32;

        const INV3: f32 = 1.0 / 3.0;
        let mut center = Vector2::zero();
        let mut area = 0.0;
        let mut inertia = 0.0;

        for i in 0..count {
            let e1 = self.vertices[i] - s;
            let e2 = self.vertices[(i + 1) % count] - s;

            let d = e1.cross(&e2);
            let triangle_area = 0.5 * d;
            area += triangle_area;
            center += triangle_area * INV3 * (e1 + e2);

            let intx2 = e1.x * e1.x + e2.x * e1.x + e2.x * e2.x;
            let inty2 = e1.y * e1.y + e2.y * e1.y + e2.y * e2.y;
            inertia += (0.25 * INV3 * d) * (intx2 + inty2);
        }

        // degenerate outline carries no mass
        if area <= EPSILON {
            return MassData::default();
        }

        let mass = density * area;
        center *= 1.0 / area;
        let world_center = center + s;

        // shift inertia from the reference point to the polygon origin
        let inertia = density * inertia
            + mass * (world_center.dot(&world_center) - center.dot(&center));

        MassData::new(mass, world_center, inertia)
    }

    fn test_point(&self, transform: &Transform, point: Vector2) -> bool {
        if self.vertices.is_empty() {
            return false;
        }

        let local = transform.q.inv_rotate(point - transform.p);
        self.vertices
            .iter()
            .zip(self.normals.iter())
            .all(|(vertex, normal)| normal.dot(&(local - *vertex)) <= 0.0)
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
