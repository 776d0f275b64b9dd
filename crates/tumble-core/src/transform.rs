// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rigid pose: translation plus unit-quaternion orientation.

use crate::math::{Mat4, Quat, Vec3};

/// Rigid transform used for body poses.
///
/// Conventions:
/// - `translation` in meters (world space).
/// - `rotation` is a unit quaternion at the start and end of every public
///   operation. Intermediate sums inside [`Transform::compose`] are
///   renormalised before the value is stored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
}

impl Transform {
    /// Identity transform (origin, no rotation).
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::identity(),
        }
    }

    /// Creates a transform; `rotation` is normalised.
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
        }
    }

    /// Pure translation.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::identity(),
        }
    }

    /// Translation component.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Rotation component.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// First-order orientation increment `0.5 * (0, ω) * rotation * dt`.
    ///
    /// Adding this to `rotation` and renormalising integrates the angular
    /// velocity `ω` over `dt`. The approximation only holds for small
    /// `|ω| * dt`, which is what sub-stepping guarantees.
    pub fn rotation_increment(rotation: Quat, angular_velocity: Vec3, dt: f64) -> Quat {
        Quat::from_vector(angular_velocity)
            .multiply(&rotation)
            .scale(0.5 * dt)
    }

    /// Returns `translation + delta_translation` and
    /// `normalize(rotation + delta_rotation)`.
    pub fn compose(&self, delta_translation: Vec3, delta_rotation: Quat) -> Self {
        Self {
            translation: self.translation.add(&delta_translation),
            rotation: self.rotation.add(&delta_rotation).normalize(),
        }
    }

    /// Shifts the translation, leaving the rotation untouched.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            translation: self.translation.add(&delta),
            rotation: self.rotation,
        }
    }

    /// Maps a body-local point into world space.
    pub fn act(&self, point: &Vec3) -> Vec3 {
        self.rotation.rotate(point).add(&self.translation)
    }

    /// Maps a body-local direction into world space.
    pub fn act_direction(&self, direction: &Vec3) -> Vec3 {
        self.rotation.rotate(direction)
    }

    /// Interpolates towards `other` by `t ∈ [0, 1]`.
    ///
    /// Translation is lerped; rotation is lerped along the shorter arc and
    /// renormalised.
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        let target = if self.rotation.dot(&other.rotation) < 0.0 {
            -other.rotation
        } else {
            other.rotation
        };
        let rotation = self
            .rotation
            .scale(1.0 - t)
            .add(&target.scale(t))
            .normalize();
        Self {
            translation: self.translation.lerp(&other.translation, t),
            rotation,
        }
    }

    /// Column-major `T * R` matrix for renderers.
    pub fn to_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.translation.to_array();
        Mat4::translation(tx, ty, tz).multiply(&self.rotation.to_mat4())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Angular velocity that rotates `previous` into `current` over `dt`.
///
/// `delta = normalize(current.rotation * inverse(previous.rotation))`; the
/// result is `2 * delta.vector / dt`, negated when `delta.real < 0` so the
/// shorter of the two equivalent arcs is always chosen. Passing `q` or `-q`
/// as either rotation therefore yields the same velocity.
pub fn derive_angular_velocity(current: &Transform, previous: &Transform, dt: f64) -> Vec3 {
    let delta = current
        .rotation
        .multiply(&previous.rotation.inverse())
        .normalize();
    let omega = delta.vector().scale(2.0 / dt);
    if delta.real() < 0.0 {
        omega.scale(-1.0)
    } else {
        omega
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn quat_distance(a: &Quat, b: &Quat) -> f64 {
        a.add(&b.scale(-1.0)).norm()
    }

    #[test]
    fn new_normalises_rotation() {
        let t = Transform::new(Vec3::ZERO, Quat::new(0.0, 0.0, 2.0, 2.0));
        assert!((t.rotation().norm() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn act_rotates_then_translates() {
        let t = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2),
        );
        let p = t.act(&Vec3::UNIT_X);
        assert!(p.sub(&Vec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
        let m = t.to_mat4().transform_point(&Vec3::UNIT_X);
        assert!(m.sub(&p).length() < 1e-12);
    }

    #[test]
    fn compose_integrates_small_rotation() {
        let omega = Vec3::new(0.0, 0.0, 1.0);
        let dt = 1e-3;
        let mut pose = Transform::identity();
        for _ in 0..1_000 {
            let inc = Transform::rotation_increment(pose.rotation(), omega, dt);
            pose = pose.compose(Vec3::ZERO, inc);
        }
        // One radian about +z after 1000 small steps.
        let expected = Quat::from_axis_angle(Vec3::UNIT_Z, 1.0);
        assert!(quat_distance(&pose.rotation(), &expected) < 1e-3);
        assert!((pose.rotation().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn derive_recovers_applied_angular_velocity() {
        let omega = Vec3::new(1.0, 2.0, 0.5);
        let h = 1.0 / 600.0;
        let previous = Transform::new(
            Vec3::ZERO,
            Quat::from_axis_angle(Vec3::new(0.5, 1.0, 0.0), 0.3),
        );
        let current = previous.compose(
            Vec3::ZERO,
            Transform::rotation_increment(previous.rotation(), omega, h),
        );
        let derived = derive_angular_velocity(&current, &previous, h);
        assert!(derived.sub(&omega).length() < 1e-2);
    }

    #[test]
    fn interpolate_endpoints_and_short_arc() {
        let a = Transform::identity();
        let b = Transform::new(
            Vec3::new(2.0, 0.0, 0.0),
            Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2),
        );
        assert_eq!(a.interpolate(&b, 0.0).translation(), a.translation());
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.translation().x() - 1.0).abs() < 1e-12);
        // Negated target describes the same orientation and must give the same midpoint.
        let b_neg = Transform::new(b.translation(), -b.rotation());
        let mid_neg = a.interpolate(&b_neg, 0.5);
        assert!(quat_distance(&mid.rotation(), &mid_neg.rotation()) < 1e-12);
    }
}
