// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Body/shape pairing consumed by the integrator.

use crate::body::BodyHandle;
use crate::shape::Shape;

/// Pairs a body (by handle, non-owning) with a collision shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Collider {
    body: BodyHandle,
    shape: Shape,
}

impl Collider {
    /// Attaches `shape` to `body`.
    pub fn new(body: BodyHandle, shape: Shape) -> Self {
        Self { body, shape }
    }

    /// Owning body.
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Collision shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}
