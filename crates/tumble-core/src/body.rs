// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rigid-body state and the arena that owns it.

use crate::error::SimError;
use crate::math::{Quat, Vec3};
use crate::transform::{derive_angular_velocity, Transform};

/// State of one rigid body.
///
/// Velocities are derived values: after every sub-step they are rebuilt from
/// the `pose` / `previous_pose` pair, never integrated on their own.
/// A body with zero inverse mass is static: prediction, velocity
/// reconstruction and constraint correction all leave it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    inverse_mass: f64,
    pose: Transform,
    previous_pose: Transform,
    velocity: Vec3,
    angular_velocity: Vec3,
    external_force: Vec3,
}

impl RigidBody {
    /// Creates a body at the given pose and velocities.
    ///
    /// `mass == 0` creates a static body (velocities are discarded).
    ///
    /// # Errors
    /// [`SimError::InvalidMass`] for a negative or non-finite mass.
    pub fn new(
        mass: f64,
        position: Vec3,
        orientation: Quat,
        velocity: Vec3,
        angular_velocity: Vec3,
    ) -> Result<Self, SimError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        let pose = Transform::new(position, orientation);
        if mass == 0.0 {
            return Ok(Self::fixed(pose));
        }
        Ok(Self {
            inverse_mass: 1.0 / mass,
            pose,
            previous_pose: pose,
            velocity,
            angular_velocity,
            external_force: Vec3::ZERO,
        })
    }

    /// Creates an immovable body (zero inverse mass) at `pose`.
    pub fn fixed(pose: Transform) -> Self {
        Self {
            inverse_mass: 0.0,
            pose,
            previous_pose: pose,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            external_force: Vec3::ZERO,
        }
    }

    /// Builder-style setter for the external force.
    #[must_use]
    pub fn with_external_force(mut self, force: Vec3) -> Self {
        self.external_force = force;
        self
    }

    /// Returns `true` for infinite-mass bodies.
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Mass, or `None` for a static body.
    pub fn mass(&self) -> Option<f64> {
        if self.is_static() {
            None
        } else {
            Some(1.0 / self.inverse_mass)
        }
    }

    /// Inverse mass (`0` for static bodies).
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Current pose.
    pub fn pose(&self) -> Transform {
        self.pose
    }

    /// Pose at the start of the most recent sub-step.
    pub fn previous_pose(&self) -> Transform {
        self.previous_pose
    }

    /// World-space linear velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// World-space angular velocity (radians per second).
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// External force applied every sub-step.
    pub fn external_force(&self) -> Vec3 {
        self.external_force
    }

    /// Sets the external force; ignored by static bodies.
    pub fn set_external_force(&mut self, force: Vec3) {
        self.external_force = force;
    }

    /// Overrides the linear velocity; no-op for static bodies.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        if !self.is_static() {
            self.velocity = velocity;
        }
    }

    /// Overrides the angular velocity; no-op for static bodies.
    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        if !self.is_static() {
            self.angular_velocity = angular_velocity;
        }
    }

    /// `true` when pose, velocities and force are all finite.
    pub fn is_finite(&self) -> bool {
        self.pose.translation().is_finite()
            && self.pose.rotation().is_finite()
            && self.velocity.is_finite()
            && self.angular_velocity.is_finite()
            && self.external_force.is_finite()
    }

    /// Records the current pose as the sub-step's starting pose.
    pub fn snapshot_previous(&mut self) {
        self.previous_pose = self.pose;
    }

    /// Semi-implicit Euler prediction over `h`, ignoring constraints.
    ///
    /// `velocity += h * force / mass`, then the pose advances by `h * velocity`
    /// and by the quaternion increment of the current angular velocity.
    pub fn apply_prediction(&mut self, h: f64) {
        if self.is_static() {
            return;
        }
        self.velocity = self
            .velocity
            .add(&self.external_force.scale(h * self.inverse_mass));
        let increment = Transform::rotation_increment(self.pose.rotation(), self.angular_velocity, h);
        self.pose = self.pose.compose(self.velocity.scale(h), increment);
    }

    /// Rebuilds both velocities from the pose delta over `h`.
    pub fn reconcile_velocity(&mut self, h: f64) {
        if self.is_static() {
            return;
        }
        self.velocity = self
            .pose
            .translation()
            .sub(&self.previous_pose.translation())
            .scale(1.0 / h);
        self.angular_velocity = derive_angular_velocity(&self.pose, &self.previous_pose, h);
    }

    /// Applies a positional correction; static bodies never move.
    pub(crate) fn correct_position(&mut self, delta: Vec3) {
        if !self.is_static() {
            self.pose = self.pose.translated(delta);
        }
    }
}

/// Opaque index of a body inside a [`BodySet`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Raw index, stable for the lifetime of the set.
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(index: usize) -> Self {
        Self(index)
    }
}

/// Insert-only arena of rigid bodies.
///
/// Bodies are never removed during a run, so handles stay valid and
/// iteration order (insertion order) is fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body and returns its handle.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// `true` when no body has been inserted.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Shared access to a body.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// Mutable access to a body.
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    /// Checks that `handle` belongs to this set.
    ///
    /// # Errors
    /// [`SimError::UnknownBody`] when the index is out of range.
    pub fn validate(&self, handle: BodyHandle) -> Result<(), SimError> {
        if handle.0 < self.bodies.len() {
            Ok(())
        } else {
            Err(SimError::UnknownBody(handle.0))
        }
    }

    /// Bodies with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyHandle(i), b))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> + '_ {
        self.bodies.iter_mut()
    }

    /// Two distinct bodies borrowed mutably at once.
    pub(crate) fn pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a.0 == b.0 || a.0 >= self.bodies.len() || b.0 >= self.bodies.len() {
            return None;
        }
        if a.0 < b.0 {
            let (lo, hi) = self.bodies.split_at_mut(b.0);
            Some((&mut lo[a.0], &mut hi[0]))
        } else {
            let (lo, hi) = self.bodies.split_at_mut(a.0);
            Some((&mut hi[0], &mut lo[b.0]))
        }
    }
}
