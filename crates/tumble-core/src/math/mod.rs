// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic math helpers: vectors, quaternions, a presentation matrix and
//! a seeded PRNG for scene setup.
//!
//! Everything is `f64`. No operation uses fused multiply-add, so identical
//! inputs round identically on every supported target.

mod mat4;
mod prng;
mod quat;
mod vec3;

pub use mat4::Mat4;
pub use prng::Prng;
pub use quat::Quat;
pub use vec3::Vec3;

/// Degeneracy threshold used when normalising vectors and quaternions.
///
/// Lengths at or below this value are treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Returns `true` when `a` and `b` differ by at most `tolerance`.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
