// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors raised at the solver's construction and call boundaries.
use thiserror::Error;

/// Configuration and boundary errors.
///
/// None of these are recoverable by substituting a default: a zero sub-step
/// count or a non-positive time step is a caller bug and is reported as such.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The integrator was asked to run zero sub-steps per frame.
    #[error("sub-step count must be at least 1")]
    InvalidSubStepCount,
    /// `integrate` received a time step that is non-positive or non-finite.
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
    /// A body was constructed with a negative or non-finite mass.
    #[error("mass must be finite and non-negative, got {0}")]
    InvalidMass(f64),
    /// A shape descriptor has non-positive or non-finite extents.
    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),
    /// A handle does not refer to a body in this set.
    #[error("unknown body handle {0}")]
    UnknownBody(usize),
    /// The requested frame is older than every retained timeline state.
    #[error("frame {0} is no longer retained")]
    FrameEvicted(u64),
    /// A body carries NaN or infinite state.
    #[error("body {body} has non-finite state")]
    NonFiniteState {
        /// Index of the offending body.
        body: usize,
    },
}
