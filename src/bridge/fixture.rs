use crate::bodies::{Filter, Fixture};
use crate::bridge::{decode, encode, ArrayLock, Bridge, HostArray, RawHandle};
use crate::core::FixtureHandle;
use crate::math::Vector2;
use crate::Result;

impl Bridge {
    fn fixture_key(&self, fixture: RawHandle) -> Result<FixtureHandle> {
        decode("fixture", fixture)
    }

    fn with_fixture<R>(&self, fixture: RawHandle, f: impl FnOnce(&Fixture) -> R) -> Result<R> {
        let fixture = self.fixture_key(fixture)?;
        Ok(f(self.context.fixture(fixture)?))
    }

    fn with_fixture_mut<R>(&mut self, fixture: RawHandle, f: impl FnOnce(&mut Fixture) -> R) -> Result<R> {
        let fixture = self.fixture_key(fixture)?;
        Ok(f(self.context.fixture_mut(fixture)?))
    }

    /// Shape type code of the fixture's shape
    pub fn fixture_get_type(&self, fixture: RawHandle) -> Result<i32> {
        let shape = self.with_fixture(fixture, |f| f.shape())?;
        Ok(self.context.shape(shape)?.shape_type().code())
    }

    /// Handle of the fixture's own shape copy
    ///
    /// The returned shape can be read and modified but not disposed; it is
    /// released together with the fixture.
    pub fn fixture_get_shape(&self, fixture: RawHandle) -> Result<RawHandle> {
        self.with_fixture(fixture, |f| encode(f.shape()))
    }

    pub fn fixture_set_sensor(&mut self, fixture: RawHandle, flag: bool) -> Result<()> {
        let fixture = self.fixture_key(fixture)?;
        self.context.set_sensor(fixture, flag)
    }

    pub fn fixture_is_sensor(&self, fixture: RawHandle) -> Result<bool> {
        self.with_fixture(fixture, |f| f.is_sensor())
    }

    pub fn fixture_set_filter_data(
        &mut self,
        fixture: RawHandle,
        category_bits: i16,
        mask_bits: i16,
        group_index: i16,
    ) -> Result<()> {
        let fixture = self.fixture_key(fixture)?;
        let filter = Filter::from_raw(category_bits, mask_bits, group_index);
        self.context.set_filter_data(fixture, filter)
    }

    /// Writes `[category, mask, group]` as signed 16-bit bit patterns
    pub fn fixture_get_filter_data<A>(&self, fixture: RawHandle, out: &mut A) -> Result<()>
    where
        A: HostArray<i16> + ?Sized,
    {
        let filter = self.with_fixture(fixture, |f| f.filter())?;
        ArrayLock::acquire(out).write(&filter.to_raw())
    }

    pub fn fixture_refilter(&mut self, fixture: RawHandle) -> Result<()> {
        let fixture = self.fixture_key(fixture)?;
        self.context.refilter(fixture)
    }

    /// Tests a world-space point against the fixture
    pub fn fixture_test_point(&self, fixture: RawHandle, x: f32, y: f32) -> Result<bool> {
        let fixture = self.fixture_key(fixture)?;
        self.context.test_point(fixture, Vector2::new(x, y))
    }

    pub fn fixture_set_density(&mut self, fixture: RawHandle, density: f32) -> Result<()> {
        self.with_fixture_mut(fixture, |f| f.set_density(density))
    }

    pub fn fixture_get_density(&self, fixture: RawHandle) -> Result<f32> {
        self.with_fixture(fixture, |f| f.density())
    }

    pub fn fixture_set_friction(&mut self, fixture: RawHandle, friction: f32) -> Result<()> {
        self.with_fixture_mut(fixture, |f| f.set_friction(friction))
    }

    pub fn fixture_get_friction(&self, fixture: RawHandle) -> Result<f32> {
        self.with_fixture(fixture, |f| f.friction())
    }

    pub fn fixture_set_restitution(&mut self, fixture: RawHandle, restitution: f32) -> Result<()> {
        self.with_fixture_mut(fixture, |f| f.set_restitution(restitution))
    }

    pub fn fixture_get_restitution(&self, fixture: RawHandle) -> Result<f32> {
        self.with_fixture(fixture, |f| f.restitution())
    }
}
