// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Tumble tools (config storage, run settings).
//! Keeps the CLI thin and the solver free of I/O.

pub mod config;
pub mod sim_config;

pub use sim_config::{SceneKind, SimConfig, SIM_CONFIG_KEY};
