use crate::core::{BodyHandle, FixtureHandle};
use crate::math::Vector2;

/// A simulation space and the bodies created in it
#[derive(Debug, Clone)]
pub struct World {
    gravity: Vector2,
    allow_sleep: bool,
    auto_clear_forces: bool,
    bodies: Vec<BodyHandle>,
    pending_refilter: Vec<FixtureHandle>,
}

impl World {
    pub fn new(gravity: Vector2, allow_sleep: bool) -> Self {
        Self {
            gravity,
            allow_sleep,
            auto_clear_forces: true,
            bodies: Vec::new(),
            pending_refilter: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
    }

    pub fn allow_sleep(&self) -> bool {
        self.allow_sleep
    }

    pub(crate) fn set_allow_sleep_flag(&mut self, flag: bool) {
        self.allow_sleep = flag;
    }

    pub fn auto_clear_forces(&self) -> bool {
        self.auto_clear_forces
    }

    pub fn set_auto_clear_forces(&mut self, flag: bool) {
        self.auto_clear_forces = flag;
    }

    /// Bodies in this world, most recently created first
    pub fn bodies(&self) -> impl ExactSizeIterator<Item = BodyHandle> + '_ {
        self.bodies.iter().rev().copied()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub(crate) fn add_body(&mut self, body: BodyHandle) {
        self.bodies.push(body);
    }

    pub(crate) fn remove_body(&mut self, body: BodyHandle) -> bool {
        match self.bodies.iter().position(|b| *b == body) {
            Some(index) => {
                self.bodies.remove(index);
                true
            }
            None => false,
        }
    }

    /// Queues a fixture whose filter must be re-evaluated by the collision pipeline
    pub(crate) fn flag_refilter(&mut self, fixture: FixtureHandle) {
        if !self.pending_refilter.contains(&fixture) {
            self.pending_refilter.push(fixture);
        }
    }

    pub(crate) fn forget_fixture(&mut self, fixture: FixtureHandle) {
        self.pending_refilter.retain(|f| *f != fixture);
    }

    /// Fixtures flagged for refiltering since the last call, in flag order
    pub fn take_pending_refilter(&mut self) -> Vec<FixtureHandle> {
        std::mem::take(&mut self.pending_refilter)
    }

    pub fn pending_refilter(&self) -> &[FixtureHandle] {
        &self.pending_refilter
    }
}
