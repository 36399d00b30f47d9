//! The `latest` subcommand: discovery without download.
//!
//! Resolves the version line against the build server and prints the latest
//! verified build label, nothing else. Useful for checking what an update run
//! would pick before committing to one.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::GlobalConfig;
use crate::platform::Platform;
use crate::upgrade::{Orchestrator, RunConfig};
use super::common::SelectArgs;

/// Show the latest verified build without downloading anything.
#[derive(Args, Debug)]
pub struct LatestArgs {
    #[command(flatten)]
    select: SelectArgs,
}

impl LatestArgs {
    /// Execute the discovery and print its winner.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let start = Instant::now();
        let global = GlobalConfig::load(config_path).await?;

        let params = self.select.into_params()?;
        let config = RunConfig::resolve(params, &global, Platform::detect())?;
        let outcome = Orchestrator::new(config).run().await?;

        println!("build: {}", outcome.build.label.bold());
        if let Some(revision) = outcome.build.revision {
            println!("revision: {revision}");
        }

        info!("completed in {} ms", start.elapsed().as_millis());
        Ok(())
    }
}
