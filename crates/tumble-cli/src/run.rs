// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config resolution and the fixed-step driver loop.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tumble_app_core::config::ConfigService;
use tumble_app_core::{SimConfig, SIM_CONFIG_KEY};
use tumble_config_fs::FsConfigStore;
use tumble_core::{check_finite, BodyHandle, World};

use crate::cli::SimArgs;

/// Opens the config store at `dir`, or the platform default.
pub fn open_store(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("opening config store")?;
    Ok(ConfigService::new(store))
}

/// Defaults, then stored (or `--config` file) settings, then flags.
pub fn resolve_config(args: &SimArgs, config_dir: Option<&Path>) -> Result<SimConfig> {
    let base = match &args.config {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => open_store(config_dir)?
            .load_or_default(SIM_CONFIG_KEY)
            .context("loading stored config")?,
    };
    let cfg = args.apply(base);
    cfg.validate().context("invalid run settings")?;
    Ok(cfg)
}

/// Final state of one body.
#[derive(Debug, Serialize)]
pub struct BodySummary {
    /// Arena index.
    pub body: usize,
    /// World position.
    pub position: [f64; 3],
    /// Orientation quaternion (x, y, z, w).
    pub orientation: [f64; 4],
    /// Linear velocity.
    pub velocity: [f64; 3],
    /// Angular velocity.
    pub angular_velocity: [f64; 3],
}

/// Outcome of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Frames stepped.
    pub frames: u64,
    /// Simulated seconds.
    pub elapsed: f64,
    /// Hex snapshot hash of the final state.
    pub hash: String,
    /// Dynamic bodies in creation order.
    pub bodies: Vec<BodySummary>,
}

/// Builds the configured scene and steps it `cfg.frames` times.
pub fn simulate(cfg: &SimConfig) -> Result<RunSummary> {
    let mut scene = cfg.build_scene().context("building scene")?;
    info!(
        scene = ?cfg.scene,
        frames = cfg.frames,
        dt = cfg.frame_dt,
        sub_steps = cfg.sub_step_count,
        "run started"
    );
    let mut contacts = 0_u64;
    for _ in 0..cfg.frames {
        let report = scene.world.step(cfg.frame_dt)?;
        check_finite(scene.world.bodies())
            .with_context(|| format!("frame {}", scene.world.frame()))?;
        contacts += u64::from(report.contacts_resolved);
    }
    let snapshot = scene.world.snapshot();
    debug!(contacts, hash = %snapshot.hash_hex(), "run finished");
    Ok(RunSummary {
        frames: snapshot.frame,
        elapsed: scene.world.elapsed(),
        hash: snapshot.hash_hex(),
        bodies: summarize(&scene.world, &scene.cubes),
    })
}

fn summarize(world: &World, cubes: &[BodyHandle]) -> Vec<BodySummary> {
    cubes
        .iter()
        .filter_map(|&handle| {
            let body = world.body(handle)?;
            let pose = body.pose();
            Some(BodySummary {
                body: handle.index(),
                position: pose.translation().to_array(),
                orientation: pose.rotation().to_array(),
                velocity: body.velocity().to_array(),
                angular_velocity: body.angular_velocity().to_array(),
            })
        })
        .collect()
}
