//! The upgrade orchestrator: locate, download, and install as one linear run.
//!
//! # Run flow
//!
//! ```text
//! 1. Resolve
//!    ├── merge CLI flags, config file, and platform detection
//!    └── downgrade a wrong-platform install request to download-only
//!
//! 2. Locate
//!    └── latest verified build under the version line (fatal if none)
//!
//! 3. Download (when requested; install always requests it)
//!    └── stream the installer into the store directory
//!
//! 4. Install (when requested)
//!    ├── stop the running instance gracefully
//!    ├── archive the data directory (when backup was requested)
//!    └── run the platform install command
//! ```
//!
//! Every stage's failure is terminal for the run: nothing is retried and no
//! rollback is attempted. Until the install command itself runs, nothing
//! destructive has happened, so a failed stop or backup simply leaves the
//! prior install untouched.

pub mod backup;
pub mod install;
pub mod process;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::GlobalConfig;
use crate::constants::{DEFAULT_ROOT_URL, DEFAULT_STOP_TIMEOUT, UNBOUNDED_LINE_PREFIX};
use crate::core::UpdateError;
use crate::download::{ArtifactDownloader, download_url, urljoin};
use crate::locate::{BuildLocator, LocatedBuild};
use crate::platform::{Platform, PlatformProfile};
use backup::BackupManager;
use install::{install_command, run_installer};
use process::ProcessLifecycle;

/// Raw run parameters as supplied by the CLI, before resolution.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    /// Version line to search (e.g. `master` or a release branch name).
    pub version_line: String,
    /// Requested platform; `None` means the detected host platform.
    pub platform: Option<Platform>,
    /// Explicit build type; `None` selects the per-line default.
    pub build_type: Option<String>,
    /// Build server root URL override.
    pub root_url: Option<String>,
    /// Artifact store directory override.
    pub store_path: Option<PathBuf>,
    /// Download the located artifact.
    pub download: bool,
    /// Install the downloaded artifact (forces `download`).
    pub install: bool,
    /// Archive the data directory before installing.
    pub backup: bool,
    /// Use the Fedora (`.rpm`) packaging on Linux.
    pub fedora: bool,
    /// Override for the graceful-shutdown wait bound.
    pub stop_timeout: Option<Duration>,
}

/// Fully resolved parameters for one orchestrator run.
///
/// Produced by [`RunConfig::resolve`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Version line to search.
    pub version_line: String,
    /// Target platform.
    pub platform: Platform,
    /// Install profile for the target platform.
    pub profile: PlatformProfile,
    /// Resolved build type (`Release`, `Debug`, `QA`, or explicit).
    pub build_type: String,
    /// Build server root URL.
    pub root_url: String,
    /// Artifact store directory.
    pub store_path: PathBuf,
    /// Download the located artifact.
    pub download: bool,
    /// Install the downloaded artifact.
    pub install: bool,
    /// Archive the data directory before installing.
    pub backup: bool,
    /// Upper bound on the graceful-shutdown wait.
    pub stop_timeout: Duration,
}

impl RunConfig {
    /// Merge CLI parameters, the global config file, and the detected host
    /// platform into a resolved run configuration.
    ///
    /// Two adjustments happen here, mirroring what the tool has always done:
    /// an install requested for a platform other than the detected host is
    /// downgraded to download-only with a warning, and any install request
    /// forces the download flag on.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Config`] when the platform can neither be parsed nor
    /// detected, or a required parameter resolves to nothing.
    pub fn resolve(
        params: RunParams,
        global: &GlobalConfig,
        detected: Option<Platform>,
    ) -> Result<Self, UpdateError> {
        let platform = params
            .platform
            .or(detected)
            .ok_or_else(|| UpdateError::Config {
                message: "platform could not be detected; pass --platform".to_string(),
            })?
            .with_fedora(params.fedora);

        let mut install = params.install;
        let mut download = params.download;
        if install {
            let host_matches = detected.is_some_and(|host| host.same_os(platform));
            if !host_matches {
                warn!(
                    "install requested for {platform} but this host is {}; downloading only",
                    detected.map_or_else(|| "unsupported".to_string(), |p| p.to_string())
                );
                install = false;
            }
            download = true;
        }

        let build_type = params
            .build_type
            .filter(|t| !t.trim().is_empty())
            .or_else(|| global.build_type.clone())
            .unwrap_or_else(|| default_build_type(&params.version_line, platform).to_string());

        let root_url = params
            .root_url
            .or_else(|| global.root_url.clone())
            .unwrap_or_else(|| DEFAULT_ROOT_URL.to_string());

        let store_path = match params.store_path {
            Some(path) => path,
            None => match &global.store_path {
                Some(configured) => PathBuf::from(shellexpand::tilde(configured).into_owned()),
                None => dirs::download_dir()
                    .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
                    .ok_or_else(|| UpdateError::Config {
                        message: "could not determine a download directory; pass --store-path"
                            .to_string(),
                    })?,
            },
        };

        let stop_timeout = params
            .stop_timeout
            .or_else(|| global.stop_timeout_secs.map(Duration::from_secs))
            .unwrap_or(DEFAULT_STOP_TIMEOUT);

        require("version line", &params.version_line)?;
        require("root url", &root_url)?;
        require("build type", &build_type)?;

        let profile = PlatformProfile::for_platform(platform)?;

        Ok(Self {
            version_line: params.version_line,
            platform,
            profile,
            build_type,
            root_url,
            store_path,
            download,
            install,
            backup: params.backup,
            stop_timeout,
        })
    }

    /// Whether this version line uses the unbounded 4-part numbering scheme.
    #[must_use]
    pub fn unbounded(&self) -> bool {
        self.version_line.starts_with(UNBOUNDED_LINE_PREFIX)
    }
}

/// The per-line build type defaults: trunk builds are `Release`, Linux
/// maintenance builds are `Debug`, everything else is `QA`.
fn default_build_type(version_line: &str, platform: Platform) -> &'static str {
    if version_line.starts_with(UNBOUNDED_LINE_PREFIX) {
        "Release"
    } else if matches!(platform, Platform::Linux { .. }) {
        "Debug"
    } else {
        "QA"
    }
}

fn require(field: &str, value: &str) -> Result<(), UpdateError> {
    if value.trim().is_empty() {
        return Err(UpdateError::Config {
            message: format!("{field} is missing"),
        });
    }
    Ok(())
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// The located build.
    pub build: LocatedBuild,
    /// Downloaded installer path, when download was requested.
    pub artifact: Option<PathBuf>,
    /// Backup archive path, when a backup was taken.
    pub backup: Option<PathBuf>,
    /// Whether the install command ran to completion.
    pub installed: bool,
}

/// Sequences locate → download → stop → backup → install.
///
/// Strictly linear and synchronous: each stage's output feeds the next, and
/// the first failure aborts the run with its [`UpdateError`] kind attached.
pub struct Orchestrator {
    config: RunConfig,
    client: reqwest::Client,
}

impl Orchestrator {
    /// Orchestrator for one resolved run configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// The first failing stage's [`UpdateError`]; see the module docs for
    /// which stages are entered under which flags.
    pub async fn run(&self) -> Result<RunOutcome, UpdateError> {
        let version_directory =
            urljoin([self.config.root_url.as_str(), self.config.version_line.as_str()]);

        let locator =
            BuildLocator::new(&self.client, &self.config.profile, &self.config.build_type);
        let build = locator
            .latest(&version_directory, self.config.unbounded())
            .await?
            .ok_or_else(|| UpdateError::BuildNotFound {
                version_line: self.config.version_line.clone(),
            })?;
        info!("build: {}", build.label);

        let mut outcome = RunOutcome {
            build,
            artifact: None,
            backup: None,
            installed: false,
        };
        if !self.config.download {
            return Ok(outcome);
        }

        let url = download_url(
            &version_directory,
            &outcome.build.label,
            outcome.build.revision,
            &self.config.profile,
            &self.config.build_type,
        );
        info!("url: {url}");

        let artifact = ArtifactDownloader::new(&self.client)
            .fetch(&url, &self.config.store_path)
            .await?;
        outcome.artifact = Some(artifact.clone());

        if !self.config.install {
            return Ok(outcome);
        }

        ProcessLifecycle::new(&self.config.profile)
            .with_stop_timeout(self.config.stop_timeout)
            .stop()
            .await?;

        if self.config.backup {
            info!("backup in progress...");
            let destination = artifact
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let archive =
                BackupManager::new(&self.config.profile.data_path, &destination).create_archive()?;
            outcome.backup = Some(archive);
        }

        let argv = install_command(&self.config.profile, &artifact);
        run_installer(&argv).await?;
        outcome.installed = true;

        Ok(outcome)
    }
}
