use crate::bodies::{Body, Filter, FixtureDef};
use crate::bridge::{decode, encode, ArrayLock, Bridge, HostArray, RawHandle};
use crate::core::{BodyHandle, FixtureHandle, ShapeHandle};
use crate::math::Vector2;
use crate::shapes::MassData;
use crate::Result;

impl Bridge {
    fn body_key(&self, body: RawHandle) -> Result<BodyHandle> {
        decode("body", body)
    }

    fn with_body<R>(&self, body: RawHandle, f: impl FnOnce(&Body) -> R) -> Result<R> {
        let body = self.body_key(body)?;
        Ok(f(self.context.body(body)?))
    }

    fn with_body_mut<R>(&mut self, body: RawHandle, f: impl FnOnce(&mut Body) -> R) -> Result<R> {
        let body = self.body_key(body)?;
        Ok(f(self.context.body_mut(body)?))
    }

    /// Writes one vector computed from the body into `out` as `[x, y]`
    fn write_body_vector<A>(&self, body: RawHandle, out: &mut A, f: impl FnOnce(&Body) -> Vector2) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let v = self.with_body(body, f)?;
        ArrayLock::acquire(out).write(&[v.x, v.y])
    }

    // --- fixtures --------------------------------------------------------

    /// Attaches a copy of `shape` to the body
    ///
    /// Filter bits arrive as signed 16-bit values and are reinterpreted as
    /// the unsigned category and mask bit patterns.
    #[allow(clippy::too_many_arguments)]
    pub fn body_create_fixture(
        &mut self,
        body: RawHandle,
        shape: RawHandle,
        friction: f32,
        restitution: f32,
        density: f32,
        is_sensor: bool,
        category_bits: i16,
        mask_bits: i16,
        group_index: i16,
    ) -> Result<RawHandle> {
        let body = self.body_key(body)?;
        let shape: ShapeHandle = decode("shape", shape)?;
        let def = FixtureDef {
            friction,
            restitution,
            density,
            is_sensor,
            filter: Filter::from_raw(category_bits, mask_bits, group_index),
        };
        self.context.create_fixture(body, shape, &def).map(encode)
    }

    /// Attaches a copy of `shape` with default material and filter settings
    pub fn body_create_fixture_with_density(&mut self, body: RawHandle, shape: RawHandle, density: f32) -> Result<RawHandle> {
        let body = self.body_key(body)?;
        let shape: ShapeHandle = decode("shape", shape)?;
        self.context
            .create_fixture(body, shape, &FixtureDef::with_density(density))
            .map(encode)
    }

    pub fn body_destroy_fixture(&mut self, body: RawHandle, fixture: RawHandle) -> Result<()> {
        let body = self.body_key(body)?;
        let fixture: FixtureHandle = decode("fixture", fixture)?;
        self.context.destroy_fixture(body, fixture)
    }

    // --- transform -------------------------------------------------------

    pub fn body_set_transform(&mut self, body: RawHandle, x: f32, y: f32, angle: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_transform(Vector2::new(x, y), angle))
    }

    /// Writes `[p.x, p.y, cos, sin]`
    pub fn body_get_transform<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let transform = self.with_body(body, |b| b.transform())?;
        ArrayLock::acquire(out).write(&transform.to_array())
    }

    pub fn body_get_position<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.position())
    }

    pub fn body_get_angle(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.angle())
    }

    pub fn body_get_world_center<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.world_center())
    }

    pub fn body_get_local_center<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.local_center())
    }

    // --- velocity --------------------------------------------------------

    pub fn body_set_linear_velocity(&mut self, body: RawHandle, x: f32, y: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_linear_velocity(Vector2::new(x, y)))
    }

    pub fn body_get_linear_velocity<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.linear_velocity())
    }

    pub fn body_set_angular_velocity(&mut self, body: RawHandle, omega: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_angular_velocity(omega))
    }

    pub fn body_get_angular_velocity(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.angular_velocity())
    }

    pub fn body_get_linear_velocity_from_world_point<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.linear_velocity_from_world_point(Vector2::new(x, y)))
    }

    pub fn body_get_linear_velocity_from_local_point<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.linear_velocity_from_local_point(Vector2::new(x, y)))
    }

    // --- forces ----------------------------------------------------------

    pub fn body_apply_force(&mut self, body: RawHandle, fx: f32, fy: f32, px: f32, py: f32, wake: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.apply_force(Vector2::new(fx, fy), Vector2::new(px, py), wake))
    }

    pub fn body_apply_force_to_center(&mut self, body: RawHandle, fx: f32, fy: f32, wake: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.apply_force_to_center(Vector2::new(fx, fy), wake))
    }

    pub fn body_apply_torque(&mut self, body: RawHandle, torque: f32, wake: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.apply_torque(torque, wake))
    }

    pub fn body_apply_linear_impulse(&mut self, body: RawHandle, ix: f32, iy: f32, px: f32, py: f32, wake: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.apply_linear_impulse(Vector2::new(ix, iy), Vector2::new(px, py), wake))
    }

    pub fn body_apply_angular_impulse(&mut self, body: RawHandle, impulse: f32, wake: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.apply_angular_impulse(impulse, wake))
    }

    // --- mass ------------------------------------------------------------

    pub fn body_get_mass(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.mass())
    }

    /// Rotational inertia about the body origin
    pub fn body_get_inertia(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.inertia())
    }

    /// Writes `[mass, center.x, center.y, inertia]`
    pub fn body_get_mass_data<A>(&self, body: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let data = self.with_body(body, |b| b.mass_data())?;
        ArrayLock::acquire(out).write(&data.to_array())
    }

    pub fn body_set_mass_data(&mut self, body: RawHandle, mass: f32, center_x: f32, center_y: f32, inertia: f32) -> Result<()> {
        let data = MassData::new(mass, Vector2::new(center_x, center_y), inertia);
        self.with_body_mut(body, |b| b.set_mass_data(&data))
    }

    pub fn body_reset_mass_data(&mut self, body: RawHandle) -> Result<()> {
        let body = self.body_key(body)?;
        self.context.reset_mass_data(body)
    }

    // --- coordinate conversion -------------------------------------------

    pub fn body_get_world_point<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.world_point(Vector2::new(x, y)))
    }

    pub fn body_get_world_vector<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.world_vector(Vector2::new(x, y)))
    }

    pub fn body_get_local_point<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.local_point(Vector2::new(x, y)))
    }

    pub fn body_get_local_vector<A>(&self, body: RawHandle, x: f32, y: f32, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        self.write_body_vector(body, out, |b| b.local_vector(Vector2::new(x, y)))
    }

    // --- damping and type ------------------------------------------------

    pub fn body_get_linear_damping(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.linear_damping())
    }

    pub fn body_set_linear_damping(&mut self, body: RawHandle, damping: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_linear_damping(damping))
    }

    pub fn body_get_angular_damping(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.angular_damping())
    }

    pub fn body_set_angular_damping(&mut self, body: RawHandle, damping: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_angular_damping(damping))
    }

    pub fn body_get_gravity_scale(&self, body: RawHandle) -> Result<f32> {
        self.with_body(body, |b| b.gravity_scale())
    }

    pub fn body_set_gravity_scale(&mut self, body: RawHandle, scale: f32) -> Result<()> {
        self.with_body_mut(body, |b| b.set_gravity_scale(scale))
    }

    /// Changes the body type from its boundary code
    pub fn body_set_type(&mut self, body: RawHandle, code: i32) -> Result<()> {
        let body = self.body_key(body)?;
        let body_type = self.body_type(code)?;
        self.context.set_body_type(body, body_type)
    }

    pub fn body_get_type(&self, body: RawHandle) -> Result<i32> {
        self.with_body(body, |b| b.body_type().code())
    }

    // --- flags -----------------------------------------------------------

    pub fn body_set_bullet(&mut self, body: RawHandle, flag: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.set_bullet(flag))
    }

    pub fn body_is_bullet(&self, body: RawHandle) -> Result<bool> {
        self.with_body(body, |b| b.is_bullet())
    }

    pub fn body_set_sleeping_allowed(&mut self, body: RawHandle, flag: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.set_sleeping_allowed(flag))
    }

    pub fn body_is_sleeping_allowed(&self, body: RawHandle) -> Result<bool> {
        self.with_body(body, |b| b.is_sleeping_allowed())
    }

    pub fn body_set_awake(&mut self, body: RawHandle, flag: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.set_awake(flag))
    }

    pub fn body_is_awake(&self, body: RawHandle) -> Result<bool> {
        self.with_body(body, |b| b.is_awake())
    }

    pub fn body_set_active(&mut self, body: RawHandle, flag: bool) -> Result<()> {
        self.with_body_mut(body, |b| b.set_active(flag))
    }

    pub fn body_is_active(&self, body: RawHandle) -> Result<bool> {
        self.with_body(body, |b| b.is_active())
    }

    pub fn body_set_fixed_rotation(&mut self, body: RawHandle, flag: bool) -> Result<()> {
        let body = self.body_key(body)?;
        self.context.set_fixed_rotation(body, flag)
    }

    pub fn body_is_fixed_rotation(&self, body: RawHandle) -> Result<bool> {
        self.with_body(body, |b| b.is_fixed_rotation())
    }
}
