// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulation state driven explicitly by an external loop.

use crate::body::{BodyHandle, BodySet, RigidBody};
use crate::collider::Collider;
use crate::error::SimError;
use crate::integrator::{StepReport, SubStepIntegrator};
use crate::snapshot::{compute_state_hash, Snapshot};
use crate::transform::Transform;

/// Bodies, colliders and the integrator that advances them.
///
/// There is no frame callback: the driver owns the clock, calls
/// [`World::step`] once per presentation frame and then pulls poses with
/// [`World::pose`]. The world never holds references into rendering state.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    bodies: BodySet,
    colliders: Vec<Collider>,
    integrator: SubStepIntegrator,
    frame: u64,
    elapsed: f64,
}

impl World {
    /// Empty world stepped by `integrator`.
    pub fn new(integrator: SubStepIntegrator) -> Self {
        Self {
            bodies: BodySet::new(),
            colliders: Vec::new(),
            integrator,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Adds a body; call during setup only.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    /// Adds a collider.
    ///
    /// # Errors
    /// [`SimError::UnknownBody`] when the collider's body is not in this world.
    pub fn add_collider(&mut self, collider: Collider) -> Result<(), SimError> {
        self.bodies.validate(collider.body())?;
        self.colliders.push(collider);
        Ok(())
    }

    /// Advances the world by `dt` seconds.
    ///
    /// # Errors
    /// Propagates [`SubStepIntegrator::integrate`] boundary errors; the world
    /// is left untouched on error.
    pub fn step(&mut self, dt: f64) -> Result<StepReport, SimError> {
        let report = self
            .integrator
            .integrate(&mut self.bodies, &self.colliders, dt)?;
        self.frame += 1;
        self.elapsed += dt;
        Ok(report)
    }

    /// All bodies.
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// One body.
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// One body, mutably (e.g. to change its external force between frames).
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Current pose of a body, for copying into a renderable transform.
    pub fn pose(&self, handle: BodyHandle) -> Option<Transform> {
        self.bodies.get(handle).map(RigidBody::pose)
    }

    /// Colliders in registration order.
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Integrator configuration.
    pub fn integrator(&self) -> SubStepIntegrator {
        self.integrator
    }

    /// Outer steps taken.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Hash identity of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            hash: compute_state_hash(&self.bodies, self.frame),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::body::BodyHandle;
    use crate::math::Vec3;
    use crate::shape::{Plane, Shape};

    #[test]
    fn step_counts_frames_and_time() {
        let mut world = World::new(SubStepIntegrator::new(2).expect("sub-step count"));
        world.step(0.25).expect("step");
        world.step(0.25).expect("step");
        assert_eq!(world.frame(), 2);
        assert!((world.elapsed() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn failed_step_leaves_frame_untouched() {
        let mut world = World::new(SubStepIntegrator::new(2).expect("sub-step count"));
        assert!(world.step(-0.1).is_err());
        assert_eq!(world.frame(), 0);
    }

    #[test]
    fn collider_must_reference_existing_body() {
        let mut world = World::new(SubStepIntegrator::new(1).expect("sub-step count"));
        let floor = world.add_body(RigidBody::fixed(Transform::identity()));
        let plane = Shape::Plane(Plane::ground(0.0));
        assert!(world.add_collider(Collider::new(floor, plane)).is_ok());
        let dangling = BodyHandle::from_raw(9);
        assert_eq!(
            world.add_collider(Collider::new(dangling, plane)),
            Err(SimError::UnknownBody(9))
        );
        assert_eq!(world.pose(floor).map(|p| p.translation()), Some(Vec3::ZERO));
    }
}
