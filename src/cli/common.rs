//! Selection flags shared by the `latest` and `fetch` subcommands.

use clap::Args;

use crate::core::UpdateError;
use crate::platform::Platform;
use crate::upgrade::RunParams;

/// Which build to look for, and where.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Version line to search (e.g. "master" or a release branch name).
    #[arg(value_name = "VERSION_LINE")]
    pub version_line: String,

    /// Target platform: Win, Mac, or Lin. Defaults to the host platform.
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Build type (Debug, Release, QA). Defaults per version line.
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub build_type: Option<String>,

    /// Build server root URL.
    #[arg(short, long, value_name = "URL")]
    pub root: Option<String>,

    /// Use the Fedora (.rpm) packaging on Linux.
    #[arg(long)]
    pub fedora: bool,
}

impl SelectArgs {
    /// Convert into run parameters, parsing the platform name if one was
    /// given. Download/install flags stay at their defaults; each subcommand
    /// sets its own.
    pub fn into_params(self) -> Result<RunParams, UpdateError> {
        let platform = self
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()?;

        Ok(RunParams {
            version_line: self.version_line,
            platform,
            build_type: self.build_type,
            root_url: self.root,
            fedora: self.fedora,
            ..RunParams::default()
        })
    }
}
