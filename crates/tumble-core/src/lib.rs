// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! tumble-core: sub-stepped, position-based rigid-body dynamics.
//!
//! Bodies are advanced by [`SubStepIntegrator`]: each outer step is split
//! into `N` sub-steps of prediction, positional constraint projection and
//! velocity reconstruction from the pose delta. Contacts are cuboid corners
//! against supporting planes, resolved by translation only.
//!
//! Design notes:
//! - Deterministic: fixed body and constraint order, no ambient RNG, no
//!   parallelism; identical inputs give bit-identical poses.
//! - `f64` throughout. The per-sub-step loop performs no allocation and no
//!   error handling; inputs are validated once at the call boundary.
//! - The presentation layer pulls poses after each step; the core holds no
//!   references into rendering state.
#![forbid(unsafe_code)]

pub mod math;

mod body;
mod collider;
pub mod constraint;
pub mod demo;
mod error;
mod integrator;
mod shape;
mod snapshot;
mod telemetry;
mod timeline;
mod transform;
mod world;

pub use body::{BodyHandle, BodySet, RigidBody};
pub use collider::Collider;
pub use error::SimError;
pub use integrator::{check_finite, StepReport, SubStepIntegrator};
pub use shape::{Cuboid, Plane, Shape};
pub use snapshot::{Hash, Snapshot};
pub use timeline::Timeline;
pub use transform::{derive_angular_velocity, Transform};
pub use world::World;
