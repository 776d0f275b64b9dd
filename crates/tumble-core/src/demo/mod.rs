// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ready-made scenes used by the CLI, benches and tests.

mod scenes;

pub use scenes::{build_world, scattered_cubes, tumbling_cube, tumbling_cube_with, Scene, SceneParams};

/// Presentation frame interval the demos are tuned for (60 Hz).
pub const FRAME_TIME: f64 = 1.0 / 60.0;
