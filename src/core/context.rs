use crate::bodies::{Body, BodyDef, BodyType, Filter, Fixture, FixtureDef};
use crate::core::{Arena, BodyHandle, EngineConfig, FixtureHandle, ShapeHandle, World, WorldHandle};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::{MassData, Shape, ShapeKind};
use crate::Result;
use slotmap::Key;

/// A shape together with the fixture that owns it, if any
#[derive(Debug)]
struct ShapeSlot {
    shape: Box<dyn Shape>,
    owner: Option<FixtureHandle>,
}

/// Owner of every engine object
///
/// Worlds, bodies, fixtures and shapes live in separate generation-checked
/// arenas. Ownership follows the object model: a world owns its bodies, a
/// body owns its fixtures and a fixture owns a private copy of the shape it
/// was created with. Destroying a parent destroys its children.
pub struct PhysicsContext {
    config: EngineConfig,
    worlds: Arena<WorldHandle, World>,
    bodies: Arena<BodyHandle, Body>,
    fixtures: Arena<FixtureHandle, Fixture>,
    shapes: Arena<ShapeHandle, ShapeSlot>,
}

impl PhysicsContext {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            worlds: Arena::new("world"),
            bodies: Arena::new("body"),
            fixtures: Arena::new("fixture"),
            shapes: Arena::new("shape"),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- worlds ----------------------------------------------------------

    /// Creates a world with explicit gravity and sleep policy
    pub fn create_world(&mut self, gravity: Vector2, allow_sleep: bool) -> WorldHandle {
        let mut world = World::new(gravity, allow_sleep);
        world.set_auto_clear_forces(self.config.auto_clear_forces);
        let handle = self.worlds.insert(world);
        log::debug!("created world {:?} gravity={}", handle, gravity);
        handle
    }

    /// Creates a world from the configured defaults
    pub fn create_default_world(&mut self) -> WorldHandle {
        self.create_world(self.config.gravity, self.config.allow_sleep)
    }

    /// Destroys a world together with all of its bodies
    pub fn destroy_world(&mut self, handle: WorldHandle) -> Result<()> {
        let world = self.worlds.remove(handle)?;
        for body in world.bodies() {
            self.release_body(body);
        }
        log::debug!("destroyed world {:?} with {} bodies", handle, world.body_count());
        Ok(())
    }

    pub fn world(&self, handle: WorldHandle) -> Result<&World> {
        self.worlds.get(handle)
    }

    pub fn world_mut(&mut self, handle: WorldHandle) -> Result<&mut World> {
        self.worlds.get_mut(handle)
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Changes the world sleep policy; disallowing sleep wakes every body
    pub fn set_allow_sleep(&mut self, handle: WorldHandle, flag: bool) -> Result<()> {
        let world = self.worlds.get_mut(handle)?;
        if world.allow_sleep() == flag {
            return Ok(());
        }
        world.set_allow_sleep_flag(flag);

        if !flag {
            for body in world.bodies() {
                if let Ok(body) = self.bodies.get_mut(body) {
                    body.set_awake(true);
                }
            }
        }
        Ok(())
    }

    /// Zeroes the accumulated force and torque of every body in the world
    pub fn clear_forces(&mut self, handle: WorldHandle) -> Result<()> {
        let world = self.worlds.get(handle)?;
        for body in world.bodies() {
            if let Ok(body) = self.bodies.get_mut(body) {
                body.clear_forces();
            }
        }
        Ok(())
    }

    // --- bodies ----------------------------------------------------------

    /// Creates a body inside `world`
    pub fn create_body(&mut self, world: WorldHandle, def: &BodyDef) -> Result<BodyHandle> {
        // validate the world before allocating
        self.worlds.get(world)?;
        let handle = self.bodies.insert(Body::new(world, def));
        self.worlds.get_mut(world)?.add_body(handle);
        log::debug!("created {:?} body {:?} in world {:?}", def.body_type, handle, world);
        Ok(handle)
    }

    /// Destroys a body and all of its fixtures
    pub fn destroy_body(&mut self, world: WorldHandle, body: BodyHandle) -> Result<()> {
        let owner = self.bodies.get(body)?.world();
        if owner != world {
            return Err(not_owned("body", body, world));
        }
        let world_ref = self.worlds.get_mut(world)?;
        world_ref.remove_body(body);
        for fixture in self.bodies.get(body)?.fixtures() {
            world_ref.forget_fixture(fixture);
        }
        self.release_body(body);
        log::debug!("destroyed body {:?} in world {:?}", body, world);
        Ok(())
    }

    /// Frees a body and its fixtures without touching the world body list
    fn release_body(&mut self, body: BodyHandle) {
        if let Ok(removed) = self.bodies.remove(body) {
            for fixture in removed.fixtures() {
                self.release_fixture(fixture);
            }
        }
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Mass data of every fixture on the body that has non-zero density
    fn fixture_masses(&self, body: BodyHandle) -> Result<Vec<MassData>> {
        let body = self.bodies.get(body)?;
        let mut masses = Vec::with_capacity(body.fixtures().len());
        for fixture in body.fixtures() {
            let fixture = self.fixtures.get(fixture)?;
            if fixture.density() == 0.0 {
                continue;
            }
            let slot = self.shapes.get(fixture.shape())?;
            masses.push(slot.shape.compute_mass(fixture.density()));
        }
        Ok(masses)
    }

    /// Recomputes body mass from its fixtures
    pub fn reset_mass_data(&mut self, body: BodyHandle) -> Result<()> {
        let masses = self.fixture_masses(body)?;
        self.bodies.get_mut(body)?.reset_mass_data(&masses);
        Ok(())
    }

    pub fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType) -> Result<()> {
        let masses = self.fixture_masses(body)?;
        self.bodies.get_mut(body)?.set_type(body_type, &masses);
        Ok(())
    }

    pub fn set_fixed_rotation(&mut self, body: BodyHandle, flag: bool) -> Result<()> {
        let masses = self.fixture_masses(body)?;
        self.bodies.get_mut(body)?.set_fixed_rotation(flag, &masses);
        Ok(())
    }

    // --- fixtures --------------------------------------------------------

    /// Attaches a copy of `shape` to `body`
    ///
    /// A positive density recomputes the body mass.
    pub fn create_fixture(&mut self, body: BodyHandle, shape: ShapeHandle, def: &FixtureDef) -> Result<FixtureHandle> {
        self.bodies.get(body)?;
        let copy = self.shapes.get(shape)?.shape.clone_shape();

        let shape_copy = self.shapes.insert(ShapeSlot { shape: copy, owner: None });
        let handle = self.fixtures.insert(Fixture::new(body, shape_copy, def));
        self.shapes.get_mut(shape_copy)?.owner = Some(handle);
        self.bodies.get_mut(body)?.attach_fixture(handle);

        if def.density > 0.0 {
            self.reset_mass_data(body)?;
        }

        log::debug!("created fixture {:?} on body {:?} from shape {:?}", handle, body, shape);
        Ok(handle)
    }

    /// Detaches and frees a fixture, recomputing the body mass
    pub fn destroy_fixture(&mut self, body: BodyHandle, fixture: FixtureHandle) -> Result<()> {
        let owner = self.fixtures.get(fixture)?.body();
        if owner != body {
            return Err(not_owned("fixture", fixture, body));
        }

        let world = {
            let body = self.bodies.get_mut(body)?;
            body.detach_fixture(fixture);
            body.world()
        };
        if let Ok(world) = self.worlds.get_mut(world) {
            world.forget_fixture(fixture);
        }
        self.release_fixture(fixture);
        self.reset_mass_data(body)?;

        log::debug!("destroyed fixture {:?} on body {:?}", fixture, body);
        Ok(())
    }

    fn release_fixture(&mut self, fixture: FixtureHandle) {
        if let Ok(removed) = self.fixtures.remove(fixture) {
            let _ = self.shapes.remove(removed.shape());
        }
    }

    pub fn fixture(&self, handle: FixtureHandle) -> Result<&Fixture> {
        self.fixtures.get(handle)
    }

    pub fn fixture_mut(&mut self, handle: FixtureHandle) -> Result<&mut Fixture> {
        self.fixtures.get_mut(handle)
    }

    /// Changes the sensor flag, waking the owning body when it flips
    pub fn set_sensor(&mut self, handle: FixtureHandle, flag: bool) -> Result<()> {
        let fixture = self.fixtures.get_mut(handle)?;
        if fixture.is_sensor() == flag {
            return Ok(());
        }
        fixture.set_sensor_flag(flag);
        let body = fixture.body();
        self.bodies.get_mut(body)?.set_awake(true);
        Ok(())
    }

    /// Replaces filter data and flags the fixture for refiltering
    pub fn set_filter_data(&mut self, handle: FixtureHandle, filter: Filter) -> Result<()> {
        self.fixtures.get_mut(handle)?.set_filter(filter);
        self.refilter(handle)
    }

    /// Flags the fixture so its contacts are re-evaluated against its filter
    pub fn refilter(&mut self, handle: FixtureHandle) -> Result<()> {
        let body = self.fixtures.get(handle)?.body();
        let world = self.bodies.get(body)?.world();
        self.worlds.get_mut(world)?.flag_refilter(handle);
        log::trace!("fixture {:?} flagged for refilter", handle);
        Ok(())
    }

    /// Tests a world-space point against the fixture shape at the body transform
    pub fn test_point(&self, handle: FixtureHandle, point: Vector2) -> Result<bool> {
        let fixture = self.fixtures.get(handle)?;
        let transform = self.bodies.get(fixture.body())?.transform();
        let slot = self.shapes.get(fixture.shape())?;
        Ok(slot.shape.test_point(&transform, point))
    }

    // --- shapes ----------------------------------------------------------

    /// Takes ownership of a standalone shape
    pub fn create_shape(&mut self, shape: Box<dyn Shape>) -> ShapeHandle {
        let kind = shape.shape_type();
        let handle = self.shapes.insert(ShapeSlot { shape, owner: None });
        log::debug!("created {} shape {:?}", kind, handle);
        handle
    }

    /// Frees a standalone shape; fixture-owned shapes go away with their fixture
    pub fn destroy_shape(&mut self, handle: ShapeHandle) -> Result<()> {
        if self.shapes.get(handle)?.owner.is_some() {
            return Err(PhysicsError::ShapeInUse {
                handle: handle.data().as_ffi(),
            });
        }
        self.shapes.remove(handle)?;
        log::debug!("destroyed shape {:?}", handle);
        Ok(())
    }

    pub fn shape(&self, handle: ShapeHandle) -> Result<&dyn Shape> {
        Ok(self.shapes.get(handle)?.shape.as_ref())
    }

    pub fn shape_mut(&mut self, handle: ShapeHandle) -> Result<&mut dyn Shape> {
        Ok(self.shapes.get_mut(handle)?.shape.as_mut())
    }

    /// Returns the fixture owning this shape, if any
    pub fn shape_owner(&self, handle: ShapeHandle) -> Result<Option<FixtureHandle>> {
        Ok(self.shapes.get(handle)?.owner)
    }

    /// Downcasts a shape to its concrete type
    pub fn shape_as<T: ShapeKind>(&self, handle: ShapeHandle) -> Result<&T> {
        let shape = self.shape(handle)?;
        let actual = shape.shape_type();
        shape
            .as_any()
            .downcast_ref::<T>()
            .ok_or(PhysicsError::ShapeMismatch { expected: T::TYPE, actual })
    }

    /// Mutably downcasts a shape to its concrete type
    pub fn shape_as_mut<T: ShapeKind>(&mut self, handle: ShapeHandle) -> Result<&mut T> {
        let shape = self.shape_mut(handle)?;
        let actual = shape.shape_type();
        shape
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(PhysicsError::ShapeMismatch { expected: T::TYPE, actual })
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

impl Default for PhysicsContext {
    fn default() -> Self {
        Self::new()
    }
}

fn not_owned<C: Key, P: Key>(kind: &'static str, child: C, parent: P) -> PhysicsError {
    PhysicsError::NotOwned {
        kind,
        handle: child.data().as_ffi(),
        owner: parent.data().as_ffi(),
    }
}
