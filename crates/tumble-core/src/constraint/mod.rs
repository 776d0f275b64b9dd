// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Positional constraint projection.
//!
//! A constraint reports a [`Violation`] for the current (predicted) poses of
//! its two participants; [`project`] removes it in one analytic pass by
//! displacing the participants along the gradient, weighted by inverse mass.
//! There is no relaxation loop: one evaluation per constraint per sub-step.

mod ground;

pub use ground::{ground_contacts, GroundContact};

use crate::body::{BodyHandle, BodySet};
use crate::math::Vec3;

/// Ephemeral violation record, recomputed every sub-step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Violation {
    /// Unit direction along which moving the first participant reduces the
    /// violation fastest.
    pub gradient: Vec3,
    /// Signed penetration depth; positive means violated.
    pub magnitude: f64,
}

/// Displacements applied by [`project`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Correction {
    /// Translation applied to the first participant.
    pub first: Vec3,
    /// Translation applied to the second participant.
    pub second: Vec3,
    /// Depth that was removed.
    pub depth: f64,
}

/// A constraint between two bodies that is solved by moving their poses.
pub trait PositionConstraint {
    /// `(first, second)` bodies; `first` moves along `+gradient`.
    fn participants(&self) -> (BodyHandle, BodyHandle);

    /// Measures the violation, or `None` when satisfied (`magnitude <= 0`).
    fn evaluate(&self, bodies: &BodySet) -> Option<Violation>;
}

/// Evaluates `constraint` and, if violated, applies the inverse-mass weighted
/// correction to both participants.
///
/// Returns `None` when nothing moved: no violation, an unknown handle, or two
/// static participants.
pub fn project<C>(bodies: &mut BodySet, constraint: &C) -> Option<Correction>
where
    C: PositionConstraint + ?Sized,
{
    let violation = constraint.evaluate(bodies)?;
    let (a, b) = constraint.participants();
    let (first, second) = bodies.pair_mut(a, b)?;

    let w1 = first.inverse_mass();
    let w2 = second.inverse_mass();
    let w = w1 + w2;
    if w <= 0.0 {
        return None;
    }

    let full = violation.gradient.scale(violation.magnitude);
    let correction = Correction {
        first: full.scale(w1 / w),
        second: full.scale(-w2 / w),
        depth: violation.magnitude,
    };
    first.correct_position(correction.first);
    second.correct_position(correction.second);
    Some(correction)
}
