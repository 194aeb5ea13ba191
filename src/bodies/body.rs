use crate::bodies::body_flags::BodyFlags;
use crate::bodies::{BodyDef, BodyType};
use crate::core::{FixtureHandle, WorldHandle};
use crate::math::{Rot, Transform, Vector2};
use crate::shapes::MassData;

/// Center-of-mass motion of a body
#[derive(Debug, Clone, Copy, Default)]
struct Sweep {
    /// Center of mass in body space
    local_center: Vector2,

    /// World center of mass
    c: Vector2,

    /// World angle
    a: f32,
}

/// A rigid body
///
/// Bodies are created and destroyed through [`crate::core::PhysicsContext`],
/// which also owns their fixtures. Operations that need the fixture list
/// (mass reset, type changes, fixed rotation) take the per-fixture mass data
/// computed by the context.
#[derive(Debug, Clone)]
pub struct Body {
    world: WorldHandle,
    body_type: BodyType,
    flags: BodyFlags,

    xf: Transform,
    sweep: Sweep,

    linear_velocity: Vector2,
    angular_velocity: f32,

    force: Vector2,
    torque: f32,

    mass: f32,
    inv_mass: f32,

    /// Rotational inertia about the center of mass
    inertia: f32,
    inv_inertia: f32,

    linear_damping: f32,
    angular_damping: f32,
    gravity_scale: f32,

    fixtures: Vec<FixtureHandle>,
}

impl Body {
    /// Creates a body in `world` from a definition
    pub fn new(world: WorldHandle, def: &BodyDef) -> Self {
        let mut flags = BodyFlags::empty();
        flags.set(BodyFlags::BULLET, def.bullet);
        flags.set(BodyFlags::FIXED_ROTATION, def.fixed_rotation);
        flags.set(BodyFlags::AUTO_SLEEP, def.allow_sleep);
        flags.set(BodyFlags::AWAKE, def.awake);
        flags.set(BodyFlags::ACTIVE, def.active);

        let xf = Transform::from_position_angle(def.position, def.angle);
        let sweep = Sweep {
            local_center: Vector2::zero(),
            c: xf.p,
            a: def.angle,
        };

        let (mass, inv_mass) = if def.body_type == BodyType::Dynamic {
            (1.0, 1.0)
        } else {
            (0.0, 0.0)
        };

        Self {
            world,
            body_type: def.body_type,
            flags,
            xf,
            sweep,
            linear_velocity: def.linear_velocity,
            angular_velocity: def.angular_velocity,
            force: Vector2::zero(),
            torque: 0.0,
            mass,
            inv_mass,
            inertia: 0.0,
            inv_inertia: 0.0,
            linear_damping: def.linear_damping,
            angular_damping: def.angular_damping,
            gravity_scale: def.gravity_scale,
            fixtures: Vec::new(),
        }
    }

    /// Returns the world this body belongs to
    pub fn world(&self) -> WorldHandle {
        self.world
    }

    /// Returns the fixtures attached to this body, most recent first
    pub fn fixtures(&self) -> impl ExactSizeIterator<Item = FixtureHandle> + '_ {
        self.fixtures.iter().rev().copied()
    }

    pub(crate) fn attach_fixture(&mut self, fixture: FixtureHandle) {
        self.fixtures.push(fixture);
    }

    pub(crate) fn detach_fixture(&mut self, fixture: FixtureHandle) -> bool {
        match self.fixtures.iter().position(|f| *f == fixture) {
            Some(index) => {
                self.fixtures.remove(index);
                true
            }
            None => false,
        }
    }

    // --- transform -------------------------------------------------------

    pub fn transform(&self) -> Transform {
        self.xf
    }

    /// Moves the origin of the body to `position` with rotation `angle`
    pub fn set_transform(&mut self, position: Vector2, angle: f32) {
        self.xf.q = Rot::from_angle(angle);
        self.xf.p = position;

        self.sweep.c = self.xf.transform_point(self.sweep.local_center);
        self.sweep.a = angle;
    }

    pub fn position(&self) -> Vector2 {
        self.xf.p
    }

    pub fn angle(&self) -> f32 {
        self.sweep.a
    }

    pub fn world_center(&self) -> Vector2 {
        self.sweep.c
    }

    pub fn local_center(&self) -> Vector2 {
        self.sweep.local_center
    }

    pub fn world_point(&self, local_point: Vector2) -> Vector2 {
        self.xf.transform_point(local_point)
    }

    pub fn world_vector(&self, local_vector: Vector2) -> Vector2 {
        self.xf.q.rotate(local_vector)
    }

    pub fn local_point(&self, world_point: Vector2) -> Vector2 {
        self.xf.inverse_transform_point(world_point)
    }

    pub fn local_vector(&self, world_vector: Vector2) -> Vector2 {
        self.xf.q.inv_rotate(world_vector)
    }

    // --- velocity --------------------------------------------------------

    pub fn linear_velocity(&self) -> Vector2 {
        self.linear_velocity
    }

    /// Ignored on static bodies; a non-zero velocity wakes the body
    pub fn set_linear_velocity(&mut self, v: Vector2) {
        if self.body_type == BodyType::Static {
            return;
        }
        if v.dot(&v) > 0.0 {
            self.set_awake(true);
        }
        self.linear_velocity = v;
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Ignored on static bodies; a non-zero velocity wakes the body
    pub fn set_angular_velocity(&mut self, w: f32) {
        if self.body_type == BodyType::Static {
            return;
        }
        if w * w > 0.0 {
            self.set_awake(true);
        }
        self.angular_velocity = w;
    }

    /// Velocity of a world point attached to this body
    pub fn linear_velocity_from_world_point(&self, world_point: Vector2) -> Vector2 {
        self.linear_velocity + Vector2::scalar_cross(self.angular_velocity, &(world_point - self.sweep.c))
    }

    /// Velocity of a body-local point attached to this body
    pub fn linear_velocity_from_local_point(&self, local_point: Vector2) -> Vector2 {
        self.linear_velocity_from_world_point(self.world_point(local_point))
    }

    // --- forces ----------------------------------------------------------

    /// Returns whether a force request should accumulate, waking the body if asked
    fn accepts_force(&mut self, wake: bool) -> bool {
        if self.body_type != BodyType::Dynamic {
            return false;
        }
        if wake && !self.is_awake() {
            self.set_awake(true);
        }
        self.is_awake()
    }

    /// Applies a force at a world point, producing torque about the center of mass
    pub fn apply_force(&mut self, force: Vector2, point: Vector2, wake: bool) {
        if self.accepts_force(wake) {
            self.force += force;
            self.torque += (point - self.sweep.c).cross(&force);
        }
    }

    pub fn apply_force_to_center(&mut self, force: Vector2, wake: bool) {
        if self.accepts_force(wake) {
            self.force += force;
        }
    }

    pub fn apply_torque(&mut self, torque: f32, wake: bool) {
        if self.accepts_force(wake) {
            self.torque += torque;
        }
    }

    /// Applies an impulse at a world point, changing velocity immediately
    pub fn apply_linear_impulse(&mut self, impulse: Vector2, point: Vector2, wake: bool) {
        if self.accepts_force(wake) {
            self.linear_velocity += self.inv_mass * impulse;
            self.angular_velocity += self.inv_inertia * (point - self.sweep.c).cross(&impulse);
        }
    }

    pub fn apply_angular_impulse(&mut self, impulse: f32, wake: bool) {
        if self.accepts_force(wake) {
            self.angular_velocity += self.inv_inertia * impulse;
        }
    }

    /// Force accumulated since the last clear
    pub fn force(&self) -> Vector2 {
        self.force
    }

    /// Torque accumulated since the last clear
    pub fn torque(&self) -> f32 {
        self.torque
    }

    pub fn clear_forces(&mut self) {
        self.force = Vector2::zero();
        self.torque = 0.0;
    }

    // --- mass ------------------------------------------------------------

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Rotational inertia about the body origin
    pub fn inertia(&self) -> f32 {
        self.inertia + self.mass * self.sweep.local_center.dot(&self.sweep.local_center)
    }

    /// Mass properties with inertia reported about the body origin
    pub fn mass_data(&self) -> MassData {
        MassData::new(self.mass, self.sweep.local_center, self.inertia())
    }

    /// Overrides the mass properties; ignored on non-dynamic bodies
    pub fn set_mass_data(&mut self, data: &MassData) {
        if self.body_type != BodyType::Dynamic {
            return;
        }

        self.inv_mass = 0.0;
        self.inertia = 0.0;
        self.inv_inertia = 0.0;

        self.mass = data.mass;
        if self.mass <= 0.0 {
            self.mass = 1.0;
        }
        self.inv_mass = 1.0 / self.mass;

        if data.inertia > 0.0 && !self.is_fixed_rotation() {
            self.inertia = data.inertia - self.mass * data.center.dot(&data.center);
            if self.inertia > 0.0 {
                self.inv_inertia = 1.0 / self.inertia;
            }
        }

        self.move_center(data.center);
    }

    /// Recomputes mass from the mass data of fixtures with non-zero density
    pub fn reset_mass_data(&mut self, fixture_masses: &[MassData]) {
        self.mass = 0.0;
        self.inv_mass = 0.0;
        self.inertia = 0.0;
        self.inv_inertia = 0.0;
        self.sweep.local_center = Vector2::zero();

        if self.body_type != BodyType::Dynamic {
            self.sweep.c = self.xf.p;
            return;
        }

        let mut local_center = Vector2::zero();
        for data in fixture_masses {
            self.mass += data.mass;
            local_center += data.mass * data.center;
            self.inertia += data.inertia;
        }

        if self.mass > 0.0 {
            self.inv_mass = 1.0 / self.mass;
            local_center *= self.inv_mass;
        } else {
            self.mass = 1.0;
            self.inv_mass = 1.0;
        }

        if self.inertia > 0.0 && !self.is_fixed_rotation() {
            // shift to the center of mass
            self.inertia -= self.mass * local_center.dot(&local_center);
            self.inv_inertia = if self.inertia > 0.0 { 1.0 / self.inertia } else { 0.0 };
        } else {
            self.inertia = 0.0;
            self.inv_inertia = 0.0;
        }

        self.move_center(local_center);
    }

    /// Relocates the center of mass, keeping the velocity of the origin
    fn move_center(&mut self, local_center: Vector2) {
        let old_center = self.sweep.c;
        self.sweep.local_center = local_center;
        self.sweep.c = self.xf.transform_point(local_center);

        self.linear_velocity += Vector2::scalar_cross(self.angular_velocity, &(self.sweep.c - old_center));
    }

    // --- type & flags ----------------------------------------------------

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Changes the body type, recomputing mass and waking the body
    pub fn set_type(&mut self, body_type: BodyType, fixture_masses: &[MassData]) {
        if self.body_type == body_type {
            return;
        }
        self.body_type = body_type;
        self.reset_mass_data(fixture_masses);

        if body_type == BodyType::Static {
            self.linear_velocity = Vector2::zero();
            self.angular_velocity = 0.0;
        }

        self.set_awake(true);
        self.clear_forces();
    }

    pub fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping;
    }

    pub fn angular_damping(&self) -> f32 {
        self.angular_damping
    }

    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping;
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    pub fn is_bullet(&self) -> bool {
        self.flags.contains(BodyFlags::BULLET)
    }

    pub fn set_bullet(&mut self, flag: bool) {
        self.flags.set(BodyFlags::BULLET, flag);
    }

    pub fn is_sleeping_allowed(&self) -> bool {
        self.flags.contains(BodyFlags::AUTO_SLEEP)
    }

    /// Disallowing sleep wakes the body
    pub fn set_sleeping_allowed(&mut self, flag: bool) {
        if flag {
            self.flags.insert(BodyFlags::AUTO_SLEEP);
        } else {
            self.flags.remove(BodyFlags::AUTO_SLEEP);
            self.set_awake(true);
        }
    }

    pub fn is_awake(&self) -> bool {
        self.flags.contains(BodyFlags::AWAKE)
    }

    /// Putting a body to sleep zeroes its velocities and accumulated forces
    pub fn set_awake(&mut self, flag: bool) {
        if flag {
            self.flags.insert(BodyFlags::AWAKE);
        } else {
            self.flags.remove(BodyFlags::AWAKE);
            self.linear_velocity = Vector2::zero();
            self.angular_velocity = 0.0;
            self.clear_forces();
        }
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(BodyFlags::ACTIVE)
    }

    pub fn set_active(&mut self, flag: bool) {
        self.flags.set(BodyFlags::ACTIVE, flag);
    }

    pub fn is_fixed_rotation(&self) -> bool {
        self.flags.contains(BodyFlags::FIXED_ROTATION)
    }

    /// Fixing rotation stops any spin and recomputes the mass
    pub fn set_fixed_rotation(&mut self, flag: bool, fixture_masses: &[MassData]) {
        if self.is_fixed_rotation() == flag {
            return;
        }
        self.flags.set(BodyFlags::FIXED_ROTATION, flag);
        self.angular_velocity = 0.0;
        self.reset_mass_data(fixture_masses);
    }

    pub fn flags(&self) -> BodyFlags {
        self.flags
    }
}
