use crate::core::{BodyHandle, ShapeHandle};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Collision filtering data
///
/// Two fixtures sharing a non-zero group index always collide (positive)
/// or never collide (negative). Otherwise each fixture's category must be
/// accepted by the other's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Filter {
    /// Collision category bits, usually a single bit
    pub category_bits: u16,

    /// Categories this fixture accepts collisions with
    pub mask_bits: u16,

    /// Group override for the category/mask test
    pub group_index: i16,
}

impl Filter {
    pub fn new(category_bits: u16, mask_bits: u16, group_index: i16) -> Self {
        Self {
            category_bits,
            mask_bits,
            group_index,
        }
    }

    /// Builds a filter from the signed 16-bit values used across the boundary
    pub fn from_raw(category_bits: i16, mask_bits: i16, group_index: i16) -> Self {
        Self::new(category_bits as u16, mask_bits as u16, group_index)
    }

    /// Returns `[category, mask, group]` as signed 16-bit values
    pub fn to_raw(&self) -> [i16; 3] {
        [self.category_bits as i16, self.mask_bits as i16, self.group_index]
    }

    /// Returns whether fixtures with these two filters may collide
    pub fn should_collide(&self, other: &Filter) -> bool {
        if self.group_index == other.group_index && self.group_index != 0 {
            return self.group_index > 0;
        }
        (self.mask_bits & other.category_bits) != 0 && (self.category_bits & other.mask_bits) != 0
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(0x0001, 0xFFFF, 0)
    }
}

/// Material and filtering used when attaching a shape to a body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FixtureDef {
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub is_sensor: bool,
    pub filter: Filter,
}

impl Default for FixtureDef {
    fn default() -> Self {
        Self {
            friction: 0.2,
            restitution: 0.0,
            density: 0.0,
            is_sensor: false,
            filter: Filter::default(),
        }
    }
}

impl FixtureDef {
    /// A default definition with the given density
    pub fn with_density(density: f32) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }
}

/// A shape attached to a body together with its material
///
/// The shape referenced by a fixture is a private copy made at creation;
/// it lives exactly as long as the fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    body: BodyHandle,
    shape: ShapeHandle,
    density: f32,
    friction: f32,
    restitution: f32,
    is_sensor: bool,
    filter: Filter,
}

impl Fixture {
    pub(crate) fn new(body: BodyHandle, shape: ShapeHandle, def: &FixtureDef) -> Self {
        Self {
            body,
            shape,
            density: def.density,
            friction: def.friction,
            restitution: def.restitution,
            is_sensor: def.is_sensor,
            filter: def.filter,
        }
    }

    /// Returns the owning body
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Returns the fixture-owned shape
    pub fn shape(&self) -> ShapeHandle {
        self.shape
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Changing density does not update the body mass until it is reset
    pub fn set_density(&mut self, density: f32) {
        self.density = density;
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution;
    }

    pub fn is_sensor(&self) -> bool {
        self.is_sensor
    }

    pub(crate) fn set_sensor_flag(&mut self, flag: bool) {
        self.is_sensor = flag;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub(crate) fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }
}
