// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted run settings for the Tumble driver loop.

use serde::{Deserialize, Serialize};
use tumble_core::demo::{self, Scene, SceneParams};
use tumble_core::math::Vec3;
use tumble_core::SimError;

use crate::config::ConfigError;

/// Store key the CLI uses for [`SimConfig`].
pub const SIM_CONFIG_KEY: &str = "sim";

/// Which demo scene a run builds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// One cube thrown sideways with spin above the floor.
    #[default]
    TumblingCube,
    /// `cube_count` cubes with seeded random poses and velocities.
    Scattered,
}

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Integrator sub-steps per frame.
    pub sub_step_count: u32,
    /// Outer frame duration in seconds.
    pub frame_dt: f64,
    /// Frames to simulate.
    pub frames: u64,
    /// Gravitational acceleration (z-up world).
    pub gravity: [f64; 3],
    /// Height of the ground plane.
    pub plane_height: f64,
    /// Scene to build.
    pub scene: SceneKind,
    /// Seed for [`SceneKind::Scattered`].
    pub seed: u64,
    /// Cube count for [`SceneKind::Scattered`].
    pub cube_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sub_step_count: 10,
            frame_dt: demo::FRAME_TIME,
            frames: 240,
            gravity: [0.0, 0.0, -9.81],
            plane_height: 0.0,
            scene: SceneKind::TumblingCube,
            seed: 0,
            cube_count: 8,
        }
    }
}

impl SimConfig {
    /// Rejects settings the solver would refuse, before any world is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sub_step_count == 0 {
            return Err(ConfigError::Invalid("sub_step_count must be at least 1".into()));
        }
        if !(self.frame_dt.is_finite() && self.frame_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_dt must be positive and finite, got {}",
                self.frame_dt
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        if !self.plane_height.is_finite() {
            return Err(ConfigError::Invalid("plane_height must be finite".into()));
        }
        if self.scene == SceneKind::Scattered && self.cube_count == 0 {
            return Err(ConfigError::Invalid("cube_count must be at least 1".into()));
        }
        Ok(())
    }

    /// Scene knobs derived from this config.
    pub fn scene_params(&self) -> SceneParams {
        SceneParams {
            sub_step_count: self.sub_step_count,
            gravity: Vec3::from(self.gravity),
            plane_height: self.plane_height,
        }
    }

    /// Builds the configured scene.
    pub fn build_scene(&self) -> Result<Scene, SimError> {
        let params = self.scene_params();
        match self.scene {
            SceneKind::TumblingCube => demo::tumbling_cube_with(&params),
            SceneKind::Scattered => demo::scattered_cubes(self.seed, self.cube_count, &params),
        }
    }
}
