// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::Neg;

use crate::math::{Mat4, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)`; `w` is the real part.
///
/// * All angles are expressed in radians.
/// * Orientation quaternions are kept at unit norm by their owners; the raw
///   arithmetic here (`add`, `scale`) does not renormalise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f64; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Pure quaternion `(v, 0)`.
    pub fn from_vector(v: Vec3) -> Self {
        Self::new(v.x(), v.y(), v.z(), 0.0)
    }

    /// Returns the quaternion as an array `(x, y, z, w)`.
    pub fn to_array(self) -> [f64; 4] {
        self.data
    }

    fn component(&self, idx: usize) -> f64 {
        self.data[idx]
    }

    /// Imaginary (vector) part.
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.component(0), self.component(1), self.component(2))
    }

    /// Real (scalar) part.
    pub fn real(&self) -> f64 {
        self.component(3)
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: applied to a vector, the product rotates by
    /// `other` first and then by `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let aw = self.component(3);

        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        let bw = other.component(3);

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) + other.component(0),
            self.component(1) + other.component(1),
            self.component(2) + other.component(2),
            self.component(3) + other.component(3),
        )
    }

    /// Scales every component by `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
            self.component(3) * scalar,
        )
    }

    /// Four-dimensional dot product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
            + self.component(3) * other.component(3)
    }

    /// Squared norm.
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Conjugate `(-v, w)`.
    pub fn conjugate(&self) -> Self {
        Self::new(
            -self.component(0),
            -self.component(1),
            -self.component(2),
            self.component(3),
        )
    }

    /// Multiplicative inverse; identity when the norm is ~0.
    pub fn inverse(&self) -> Self {
        let n2 = self.norm_squared();
        if n2 <= EPSILON * EPSILON {
            return Self::identity();
        }
        self.conjugate().scale(1.0 / n2)
    }

    /// Normalises the quaternion; returns identity when norm is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.norm();
        if len <= EPSILON {
            return Self::identity();
        }
        self.scale(1.0 / len)
    }

    /// Rotates `v` by this (unit) quaternion.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let u = self.vector();
        let t = u.cross(v).scale(2.0);
        v.add(&t.scale(self.real())).add(&u.cross(&t))
    }

    /// Returns `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Converts the quaternion to a rotation matrix (column-major 4×4).
    pub fn to_mat4(&self) -> Mat4 {
        let q = self.normalize();
        let x = q.component(0);
        let y = q.component(1);
        let z = q.component(2);
        let w = q.component(3);

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat4::new([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

/// Converts `(x, y, z, w)` into a `Quat`; components are taken verbatim.
impl From<[f64; 4]> for Quat {
    fn from(value: [f64; 4]) -> Self {
        Self { data: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.sub(&b).length() < 1e-12
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let q = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
        assert!(close(q.rotate(&Vec3::UNIT_X), Vec3::UNIT_Y));
        assert!(close(q.rotate(&Vec3::UNIT_Y), -Vec3::UNIT_X));
    }

    #[test]
    fn rotate_matches_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 0.5, 0.2), 1.0);
        let v = Vec3::new(0.3, -1.2, 2.0);
        assert!(close(q.rotate(&v), q.to_mat4().transform_direction(&v)));
    }

    #[test]
    fn inverse_cancels() {
        let q = Quat::from_axis_angle(Vec3::new(0.5, 1.0, 0.0), 0.7);
        let r = q.multiply(&q.inverse());
        assert!((r.real() - 1.0).abs() < 1e-12);
        assert!(r.vector().length() < 1e-12);
    }

    #[test]
    fn degenerate_axis_yields_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::identity());
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::identity());
    }
}
