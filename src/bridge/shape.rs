use crate::bridge::{count, decode, encode, to_points, ArrayLock, Bridge, HostArray, RawHandle};
use crate::core::ShapeHandle;
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::{ChainShape, CircleShape, EdgeShape, PolygonShape, ShapeKind};
use crate::Result;

impl Bridge {
    fn shape_key(&self, shape: RawHandle) -> Result<ShapeHandle> {
        decode("shape", shape)
    }

    fn shape_ref<T: ShapeKind>(&self, shape: RawHandle) -> Result<&T> {
        let shape = self.shape_key(shape)?;
        self.context.shape_as::<T>(shape)
    }

    fn shape_ref_mut<T: ShapeKind>(&mut self, shape: RawHandle) -> Result<&mut T> {
        let shape = self.shape_key(shape)?;
        self.context.shape_as_mut::<T>(shape)
    }

    /// Reads `len` interleaved coordinates starting at `offset` as points
    fn read_points<A>(vertices: &mut A, offset: i32, len: i32) -> Result<Vec<Vector2>>
    where
        A: HostArray<f32> + ?Sized,
    {
        let lock = ArrayLock::acquire(vertices);
        let points = to_points(lock.range(offset, len)?);
        Ok(points)
    }

    // --- any shape -------------------------------------------------------

    pub fn shape_get_type(&self, shape: RawHandle) -> Result<i32> {
        let shape = self.shape_key(shape)?;
        Ok(self.context.shape(shape)?.shape_type().code())
    }

    pub fn shape_get_radius(&self, shape: RawHandle) -> Result<f32> {
        let shape = self.shape_key(shape)?;
        Ok(self.context.shape(shape)?.radius())
    }

    pub fn shape_set_radius(&mut self, shape: RawHandle, radius: f32) -> Result<()> {
        let shape = self.shape_key(shape)?;
        self.context.shape_mut(shape)?.set_radius(radius);
        Ok(())
    }

    /// Frees a standalone shape
    pub fn shape_dispose(&mut self, shape: RawHandle) -> Result<()> {
        let shape = self.shape_key(shape)?;
        self.context.destroy_shape(shape)
    }

    // --- polygon ---------------------------------------------------------

    pub fn polygon_shape_new(&mut self) -> RawHandle {
        encode(self.context.create_shape(Box::new(PolygonShape::new())))
    }

    /// Replaces the polygon vertices with `vertices[offset .. offset + len]`
    /// read as `x, y` pairs
    pub fn polygon_shape_set<A>(&mut self, shape: RawHandle, vertices: &mut A, offset: i32, len: i32) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let points = Self::read_points(vertices, offset, len)?;
        self.shape_ref_mut::<PolygonShape>(shape)?.set(&points)
    }

    pub fn polygon_shape_set_as_box(&mut self, shape: RawHandle, hx: f32, hy: f32) -> Result<()> {
        self.shape_ref_mut::<PolygonShape>(shape)?.set_as_box(hx, hy)
    }

    pub fn polygon_shape_set_as_box_oriented(
        &mut self,
        shape: RawHandle,
        hx: f32,
        hy: f32,
        center_x: f32,
        center_y: f32,
        angle: f32,
    ) -> Result<()> {
        self.shape_ref_mut::<PolygonShape>(shape)?
            .set_as_box_oriented(hx, hy, Vector2::new(center_x, center_y), angle)
    }

    pub fn polygon_shape_get_vertex_count(&self, shape: RawHandle) -> Result<i32> {
        Ok(count(self.shape_ref::<PolygonShape>(shape)?.vertex_count()))
    }

    pub fn polygon_shape_get_vertex<A>(&self, shape: RawHandle, index: i32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let polygon = self.shape_ref::<PolygonShape>(shape)?;
        let vertex = vertex_at(index, polygon.vertex_count(), |i| polygon.vertex(i))?;
        ArrayLock::acquire(out).write(&[vertex.x, vertex.y])
    }

    // --- circle ----------------------------------------------------------

    pub fn circle_shape_new(&mut self) -> RawHandle {
        encode(self.context.create_shape(Box::new(CircleShape::default())))
    }

    pub fn circle_shape_get_position<A>(&self, shape: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let position = self.shape_ref::<CircleShape>(shape)?.position();
        ArrayLock::acquire(out).write(&[position.x, position.y])
    }

    pub fn circle_shape_set_position(&mut self, shape: RawHandle, x: f32, y: f32) -> Result<()> {
        self.shape_ref_mut::<CircleShape>(shape)?.set_position(Vector2::new(x, y));
        Ok(())
    }

    // --- edge ------------------------------------------------------------

    pub fn edge_shape_new(&mut self) -> RawHandle {
        encode(self.context.create_shape(Box::new(EdgeShape::new())))
    }

    pub fn edge_shape_set(&mut self, shape: RawHandle, v1x: f32, v1y: f32, v2x: f32, v2y: f32) -> Result<()> {
        self.shape_ref_mut::<EdgeShape>(shape)?
            .set(Vector2::new(v1x, v1y), Vector2::new(v2x, v2y));
        Ok(())
    }

    pub fn edge_shape_get_vertex1<A>(&self, shape: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let v = self.shape_ref::<EdgeShape>(shape)?.vertex1();
        ArrayLock::acquire(out).write(&[v.x, v.y])
    }

    pub fn edge_shape_get_vertex2<A>(&self, shape: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let v = self.shape_ref::<EdgeShape>(shape)?.vertex2();
        ArrayLock::acquire(out).write(&[v.x, v.y])
    }

    // --- chain -----------------------------------------------------------

    pub fn chain_shape_new(&mut self) -> RawHandle {
        encode(self.context.create_shape(Box::new(ChainShape::new())))
    }

    pub fn chain_shape_create_loop<A>(&mut self, shape: RawHandle, vertices: &mut A, offset: i32, len: i32) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let points = Self::read_points(vertices, offset, len)?;
        self.shape_ref_mut::<ChainShape>(shape)?.create_loop(&points)
    }

    pub fn chain_shape_create_chain<A>(&mut self, shape: RawHandle, vertices: &mut A, offset: i32, len: i32) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let points = Self::read_points(vertices, offset, len)?;
        self.shape_ref_mut::<ChainShape>(shape)?.create_chain(&points)
    }

    /// Stored vertex count; a loop counts its repeated first vertex
    pub fn chain_shape_get_vertex_count(&self, shape: RawHandle) -> Result<i32> {
        Ok(count(self.shape_ref::<ChainShape>(shape)?.vertex_count()))
    }

    pub fn chain_shape_get_vertex<A>(&self, shape: RawHandle, index: i32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let chain = self.shape_ref::<ChainShape>(shape)?;
        let vertex = vertex_at(index, chain.vertex_count(), |i| chain.vertex(i))?;
        ArrayLock::acquire(out).write(&[vertex.x, vertex.y])
    }
}

fn vertex_at(index: i32, count: usize, get: impl FnOnce(usize) -> Option<Vector2>) -> Result<Vector2> {
    usize::try_from(index)
        .ok()
        .and_then(get)
        .ok_or_else(|| PhysicsError::InvalidParameter(format!("vertex index {} out of range 0..{}", index, count)))
}
