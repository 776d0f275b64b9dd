// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tumble CLI entrypoint.
//!
//! # Usage
//! ```text
//! tumble run [--frames N] [--dt S] [--substeps N] [--scene S] [--format table|json]
//! tumble hash [same flags as run]
//! tumble config init|show
//! ```
//!
//! Settings resolve as defaults, then the stored config (or `--config` file),
//! then command-line flags. Exits non-zero on any error.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod output;
mod run;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tumble_app_core::{SimConfig, SIM_CONFIG_KEY};

use crate::cli::{Cli, Command, ConfigAction, Format};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        Command::Run { sim, format } => {
            let cfg = run::resolve_config(&sim, config_dir)?;
            let summary = run::simulate(&cfg)?;
            let text = match format {
                Format::Table => output::render_table(&summary),
                Format::Json => output::render_json(&summary)?,
            };
            println!("{text}");
        }
        Command::Hash { sim } => {
            let cfg = run::resolve_config(&sim, config_dir)?;
            println!("{}", run::simulate(&cfg)?.hash);
        }
        Command::Config { action } => {
            let svc = run::open_store(config_dir)?;
            match action {
                ConfigAction::Init { force } => {
                    let path = svc.store().path_for(SIM_CONFIG_KEY);
                    if path.exists() && !force {
                        bail!("{} already exists (use --force)", path.display());
                    }
                    svc.save(SIM_CONFIG_KEY, &SimConfig::default())
                        .context("writing default config")?;
                    println!("wrote {}", path.display());
                }
                ConfigAction::Show => {
                    let cfg: SimConfig = svc
                        .load_or_default(SIM_CONFIG_KEY)
                        .context("loading stored config")?;
                    println!("{}", serde_json::to_string_pretty(&cfg)?);
                }
            }
        }
    }
    Ok(())
}
