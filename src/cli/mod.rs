//! Command-line interface for lastbuild.
//!
//! Thin adapter over the orchestrator: subcommands map directly onto the run
//! flags ([`latest`] locates, [`fetch`] downloads and optionally installs),
//! and the global flags control logging verbosity and the config file
//! location. All real sequencing lives in [`crate::upgrade`].

pub mod common;
pub mod fetch;
pub mod latest;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lastbuild",
    about = "Locate, download, and install the latest Nimbus desktop build",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom config file (default: ~/.lastbuild/config.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the latest verified build without downloading.
    Latest(latest::LatestArgs),
    /// Download the latest verified build, optionally installing it.
    Fetch(fetch::FetchArgs),
}

impl Cli {
    /// The default log directive implied by the verbosity flags, or `None`
    /// when logging should stay off entirely.
    #[must_use]
    pub fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            None
        } else if self.verbose {
            Some("debug")
        } else {
            Some("info")
        }
    }

    /// Dispatch to the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        let config_path = self.config;
        match self.command {
            Commands::Latest(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Fetch(cmd) => cmd.execute(config_path.as_deref()).await,
        }
    }
}
