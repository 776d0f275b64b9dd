// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision shape descriptors used for constraint generation.

use crate::error::SimError;
use crate::math::Vec3;
use crate::transform::Transform;

/// Box described by its half-extents in body-local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cuboid {
    half_extents: Vec3,
}

impl Cuboid {
    /// Creates a cuboid from half-extents.
    ///
    /// # Errors
    /// [`SimError::InvalidShape`] when any extent is non-positive or non-finite.
    pub fn new(half_extents: Vec3) -> Result<Self, SimError> {
        let valid = half_extents
            .to_array()
            .iter()
            .all(|e| e.is_finite() && *e > 0.0);
        if !valid {
            return Err(SimError::InvalidShape("cuboid half-extents must be positive"));
        }
        Ok(Self { half_extents })
    }

    /// Cube with edge length `2 * half_extent`.
    ///
    /// # Errors
    /// See [`Cuboid::new`].
    pub fn cube(half_extent: f64) -> Result<Self, SimError> {
        Self::new(Vec3::new(half_extent, half_extent, half_extent))
    }

    /// Half-extents.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// The eight local corners, `x` varying slowest.
    pub fn corners(&self) -> [Vec3; 8] {
        let [hx, hy, hz] = self.half_extents.to_array();
        [
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(hx, hy, hz),
        ]
    }

    /// Lowest signed height of any corner along `normal` under `pose`.
    pub fn min_height(&self, pose: &Transform, normal: &Vec3) -> f64 {
        self.corners()
            .iter()
            .map(|c| pose.act(c).dot(normal))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Supporting plane `normal · x = offset` in body-local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f64,
}

impl Plane {
    /// Creates a plane; `normal` is normalised.
    ///
    /// # Errors
    /// [`SimError::InvalidShape`] for a degenerate normal or non-finite offset.
    pub fn new(normal: Vec3, offset: f64) -> Result<Self, SimError> {
        let n = normal.normalize();
        if n == Vec3::ZERO || !n.is_finite() || !offset.is_finite() {
            return Err(SimError::InvalidShape("plane needs a unit normal and finite offset"));
        }
        Ok(Self { normal: n, offset })
    }

    /// Horizontal ground at `z = height`.
    pub fn ground(height: f64) -> Self {
        Self {
            normal: Vec3::UNIT_Z,
            offset: height,
        }
    }

    /// Local unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Local offset along the normal.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// World-space `(normal, height)` of this plane when attached to `pose`.
    pub fn in_world(&self, pose: &Transform) -> (Vec3, f64) {
        let normal = pose.act_direction(&self.normal);
        let height = self.offset + normal.dot(&pose.translation());
        (normal, height)
    }
}

/// Shape carried by a collider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Oriented box.
    Cuboid(Cuboid),
    /// Infinite supporting plane.
    Plane(Plane),
}
