//! lastbuild CLI entry point.
//!
//! Parses arguments, wires up logging from the verbosity flags, and executes
//! the selected subcommand. Failures are rendered through the user-friendly
//! error layer with a non-zero exit status.

use anyhow::Result;
use clap::Parser;
use lastbuild::cli::Cli;
use lastbuild::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the flag-derived default.
    if let Some(directive) = cli.log_directive() {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
