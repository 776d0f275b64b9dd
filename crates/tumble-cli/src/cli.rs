// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tumble_app_core::{SceneKind, SimConfig};

/// Tumble: deterministic sub-stepped rigid-body runs.
#[derive(Parser, Debug)]
#[command(name = "tumble", author, version, about)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding stored config (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the driver loop and print final poses plus the snapshot hash.
    Run {
        /// Run settings.
        #[command(flatten)]
        sim: SimArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Run the driver loop and print only the snapshot hash.
    Hash {
        /// Run settings.
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Manage the stored run config.
    Config {
        /// Config action.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `tumble config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write the default config to the store.
    Init {
        /// Overwrite an existing stored config.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective stored config as JSON.
    Show,
}

/// Output formats for `tumble run`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable table.
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Scene selector mirrored from [`SceneKind`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SceneArg {
    /// Single spinning cube thrown across the floor.
    TumblingCube,
    /// Seeded scatter of cubes.
    Scattered,
}

impl From<SceneArg> for SceneKind {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::TumblingCube => Self::TumblingCube,
            SceneArg::Scattered => Self::Scattered,
        }
    }
}

/// Flags that override stored or file config.
#[derive(Args, Debug, Default)]
pub struct SimArgs {
    /// Read settings from this JSON file instead of the store.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Frames to simulate.
    #[arg(long)]
    pub frames: Option<u64>,
    /// Frame duration in seconds.
    #[arg(long)]
    pub dt: Option<f64>,
    /// Sub-steps per frame.
    #[arg(long)]
    pub substeps: Option<u32>,
    /// Scene to build.
    #[arg(long, value_enum)]
    pub scene: Option<SceneArg>,
    /// Seed for the scattered scene.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Cube count for the scattered scene.
    #[arg(long)]
    pub cubes: Option<usize>,
}

impl SimArgs {
    /// Layers command-line flags over `base`.
    pub fn apply(&self, mut base: SimConfig) -> SimConfig {
        if let Some(frames) = self.frames {
            base.frames = frames;
        }
        if let Some(dt) = self.dt {
            base.frame_dt = dt;
        }
        if let Some(substeps) = self.substeps {
            base.sub_step_count = substeps;
        }
        if let Some(scene) = self.scene {
            base.scene = scene.into();
        }
        if let Some(seed) = self.seed {
            base.seed = seed;
        }
        if let Some(cubes) = self.cubes {
            base.cube_count = cubes;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_base() {
        let args = SimArgs {
            frames: Some(5),
            substeps: Some(3),
            scene: Some(SceneArg::Scattered),
            ..SimArgs::default()
        };
        let cfg = args.apply(SimConfig {
            seed: 11,
            ..SimConfig::default()
        });
        assert_eq!(cfg.frames, 5);
        assert_eq!(cfg.sub_step_count, 3);
        assert_eq!(cfg.scene, SceneKind::Scattered);
        assert_eq!(cfg.seed, 11);
    }
}
