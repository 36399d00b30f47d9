//! The `fetch` subcommand: download the latest build, optionally install it.
//!
//! `fetch` always downloads. With `--install` it also stops the running
//! application, optionally archives its data directory (`--backup`), and runs
//! the platform install command. Requesting an install for a platform other
//! than this host downgrades to download-only with a warning.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::GlobalConfig;
use crate::platform::Platform;
use crate::upgrade::{Orchestrator, RunConfig};
use super::common::SelectArgs;

/// Download the latest verified build, optionally installing it in place.
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// Directory to store the downloaded installer in.
    #[arg(short = 's', long, value_name = "DIR")]
    store_path: Option<PathBuf>,

    /// Install the downloaded build on this host.
    #[arg(short, long)]
    install: bool,

    /// Archive the application data directory before installing.
    #[arg(short, long)]
    backup: bool,

    /// Seconds to wait for the application to exit before giving up.
    #[arg(long, value_name = "SECS")]
    stop_timeout: Option<u64>,
}

impl FetchArgs {
    /// Execute the download (and install, when requested).
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let start = Instant::now();
        let global = GlobalConfig::load(config_path).await?;

        let mut params = self.select.into_params()?;
        params.download = true;
        params.install = self.install;
        params.backup = self.backup;
        params.store_path = self.store_path;
        params.stop_timeout = self.stop_timeout.map(std::time::Duration::from_secs);

        let config = RunConfig::resolve(params, &global, Platform::detect())?;
        let outcome = Orchestrator::new(config).run().await?;

        println!("build: {}", outcome.build.label.bold());
        if let Some(artifact) = &outcome.artifact {
            println!("saved: {}", artifact.display());
        }
        if let Some(backup) = &outcome.backup {
            println!("backup: {}", backup.display());
        }
        if outcome.installed {
            println!("{}", "installed".green().bold());
        }

        info!("completed in {} ms", start.elapsed().as_millis());
        Ok(())
    }
}
