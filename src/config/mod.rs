//! Global configuration for lastbuild.
//!
//! An optional TOML file supplies defaults for values the CLI would
//! otherwise require or derive: the build server root, the artifact store
//! directory, a preferred build type, and the graceful-shutdown timeout.
//! Command-line flags always win over the file.
//!
//! # File location
//!
//! - Default: `~/.lastbuild/config.toml`
//! - Override: the `LASTBUILD_CONFIG` environment variable, or `--config`
//!
//! # Example
//!
//! ```toml
//! root_url = "http://builds.internal/builds/Nimbus/NimbusPC/DevBuilds/"
//! store_path = "~/Downloads/nimbus-builds"
//! stop_timeout_secs = 300
//! ```
//!
//! A missing file is not an error — every field has a fallback; a file that
//! exists but does not parse is, since silently ignoring it would mask typos.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::UpdateError;

/// Contents of the global config file. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Build server directory that version lines are searched under.
    pub root_url: Option<String>,
    /// Artifact store directory (tilde-expanded).
    pub store_path: Option<String>,
    /// Build type to use when none is passed on the command line.
    pub build_type: Option<String>,
    /// Upper bound, in seconds, on the graceful-shutdown wait.
    pub stop_timeout_secs: Option<u64>,
}

impl GlobalConfig {
    /// Load the config file, if one exists.
    ///
    /// `override_path` (the `--config` flag) takes precedence over the
    /// `LASTBUILD_CONFIG` environment variable, which takes precedence over
    /// the default location. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Config`] when the file exists but cannot be read or
    /// parsed, or when no home directory can be determined for the default
    /// location.
    pub async fn load(override_path: Option<&Path>) -> Result<Self, UpdateError> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os("LASTBUILD_CONFIG") {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };

        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            UpdateError::Config {
                message: format!("failed to read {}: {e}", path.display()),
            }
        })?;
        let config = toml::from_str(&content).map_err(|e| UpdateError::Config {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;

        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The default config file location, `~/.lastbuild/config.toml`.
    fn default_path() -> Result<PathBuf, UpdateError> {
        dirs::home_dir()
            .map(|home| home.join(".lastbuild").join("config.toml"))
            .ok_or_else(|| UpdateError::Config {
                message: "could not determine the home directory".to_string(),
            })
    }
}
