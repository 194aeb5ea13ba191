use crate::bodies::BodyDef;
use crate::bridge::{count, decode, encode, ArrayLock, Bridge, HostArray, RawHandle};
use crate::core::{BodyHandle, WorldHandle};
use crate::math::Vector2;
use crate::Result;

impl Bridge {
    fn world_key(&self, world: RawHandle) -> Result<WorldHandle> {
        decode("world", world)
    }

    /// Creates a world with the given gravity and sleep policy
    pub fn world_new(&mut self, gravity_x: f32, gravity_y: f32, do_sleep: bool) -> RawHandle {
        encode(self.context.create_world(Vector2::new(gravity_x, gravity_y), do_sleep))
    }

    /// Destroys a world and everything in it
    pub fn world_dispose(&mut self, world: RawHandle) -> Result<()> {
        let world = self.world_key(world)?;
        self.context.destroy_world(world)
    }

    pub fn world_set_gravity(&mut self, world: RawHandle, x: f32, y: f32) -> Result<()> {
        let world = self.world_key(world)?;
        self.context.world_mut(world)?.set_gravity(Vector2::new(x, y));
        Ok(())
    }

    /// Writes `[x, y]`
    pub fn world_get_gravity<A>(&self, world: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<f32> + ?Sized,
    {
        let world = self.world_key(world)?;
        let gravity = self.context.world(world)?.gravity();
        ArrayLock::acquire(out).write(&[gravity.x, gravity.y])
    }

    pub fn world_get_body_count(&self, world: RawHandle) -> Result<i32> {
        let world = self.world_key(world)?;
        Ok(count(self.context.world(world)?.body_count()))
    }

    /// Creates a body; `body_type` uses the 0/1/2 static/kinematic/dynamic codes
    #[allow(clippy::too_many_arguments)]
    pub fn world_create_body(
        &mut self,
        world: RawHandle,
        body_type: i32,
        position_x: f32,
        position_y: f32,
        angle: f32,
        linear_velocity_x: f32,
        linear_velocity_y: f32,
        angular_velocity: f32,
        linear_damping: f32,
        angular_damping: f32,
        allow_sleep: bool,
        awake: bool,
        fixed_rotation: bool,
        bullet: bool,
        active: bool,
        gravity_scale: f32,
    ) -> Result<RawHandle> {
        let world = self.world_key(world)?;
        let def = BodyDef {
            body_type: self.body_type(body_type)?,
            position: Vector2::new(position_x, position_y),
            angle,
            linear_velocity: Vector2::new(linear_velocity_x, linear_velocity_y),
            angular_velocity,
            linear_damping,
            angular_damping,
            allow_sleep,
            awake,
            fixed_rotation,
            bullet,
            active,
            gravity_scale,
        };
        self.context.create_body(world, &def).map(encode)
    }

    pub fn world_destroy_body(&mut self, world: RawHandle, body: RawHandle) -> Result<()> {
        let world = self.world_key(world)?;
        let body: BodyHandle = decode("body", body)?;
        self.context.destroy_body(world, body)
    }

    pub fn world_clear_forces(&mut self, world: RawHandle) -> Result<()> {
        let world = self.world_key(world)?;
        self.context.clear_forces(world)
    }

    pub fn world_set_auto_clear_forces(&mut self, world: RawHandle, flag: bool) -> Result<()> {
        let world = self.world_key(world)?;
        self.context.world_mut(world)?.set_auto_clear_forces(flag);
        Ok(())
    }

    pub fn world_get_auto_clear_forces(&self, world: RawHandle) -> Result<bool> {
        let world = self.world_key(world)?;
        Ok(self.context.world(world)?.auto_clear_forces())
    }

    pub fn world_set_allow_sleep(&mut self, world: RawHandle, flag: bool) -> Result<()> {
        let world = self.world_key(world)?;
        self.context.set_allow_sleep(world, flag)
    }

    pub fn world_get_allow_sleep(&self, world: RawHandle) -> Result<bool> {
        let world = self.world_key(world)?;
        Ok(self.context.world(world)?.allow_sleep())
    }
}
