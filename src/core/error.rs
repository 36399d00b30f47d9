//! Error handling for lastbuild.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`UpdateError`]) so callers and tests can
//!    match on the failure kind of a run.
//! 2. **User-friendly reporting** ([`ErrorContext`]) so the CLI can print a
//!    colored message with an actionable suggestion instead of a bare chain.
//!
//! Every library module returns `Result<_, UpdateError>`. The variants map
//! one-to-one onto the failure kinds a run can end in: no verified build,
//! network failure, bad local paths, a process that refused to stop, a backup
//! that could not be created, an installer that exited non-zero, and invalid
//! or missing configuration.
//!
//! Listing-probe failures never appear here: the probe folds every transport
//! error into "candidate rejected" (see [`crate::locate::probe`]), and only a
//! fully failed discovery surfaces as [`UpdateError::BuildNotFound`].

use colored::Colorize;
use thiserror::Error;

/// Failure kinds for a lastbuild run.
///
/// A run aborts on the first error; nothing is retried automatically. The
/// variant identifies which stage failed, which is all the caller needs to
/// decide whether re-invoking the tool can help.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Discovery finished without any candidate passing the existence probe.
    #[error("no verified build found under version line '{version_line}'")]
    BuildNotFound {
        /// The version line that was searched.
        version_line: String,
    },

    /// A network operation (listing fetch or artifact download) failed.
    #[error("network operation failed: {operation}")]
    Transport {
        /// Description of the failed operation, including the URL.
        operation: String,
        /// Underlying transport error, when one exists (a non-success HTTP
        /// status has none).
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A local filesystem operation failed.
    #[error("filesystem operation failed: {operation}")]
    Filesystem {
        /// Description of the failed operation, including the path.
        operation: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The running application could not be stopped.
    #[error("process control failed: {message}")]
    Process {
        /// What went wrong while stopping the application.
        message: String,
    },

    /// The data-directory backup could not be created.
    #[error("backup failed: {message}")]
    Backup {
        /// What went wrong while archiving the data directory.
        message: String,
    },

    /// The install command failed to launch or exited non-zero.
    #[error("install failed: {message}")]
    Install {
        /// What went wrong while running the installer.
        message: String,
    },

    /// Required parameters are missing or invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Which parameter is missing or invalid.
        message: String,
    },
}

impl UpdateError {
    /// Transport failure without an underlying error (non-success status).
    pub(crate) fn transport(operation: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            source: None,
        }
    }

    /// Transport failure wrapping a [`reqwest::Error`].
    pub(crate) fn transport_from(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.into(),
            source: Some(source),
        }
    }

    /// Filesystem failure wrapping an [`std::io::Error`].
    pub(crate) fn filesystem(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Filesystem {
            operation: operation.into(),
            source,
        }
    }

    /// A suggestion for the user, keyed off the failure kind.
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::BuildNotFound { .. } => Some(
                "Check the version line spelling and whether any build under it \
                 was published for the requested platform and build type",
            ),
            Self::Transport { .. } => {
                Some("Check network connectivity and the --root build server URL")
            }
            Self::Filesystem { .. } => {
                Some("Check that the store path exists and is writable")
            }
            Self::Process { .. } => Some(
                "Close the application manually, or raise --stop-timeout if it \
                 shuts down slowly",
            ),
            Self::Backup { .. } => Some(
                "Check that the application data directory exists and that the \
                 download directory has space for the archive",
            ),
            Self::Install { .. } => {
                Some("Re-run the printed install command manually to see its output")
            }
            Self::Config { .. } => None,
        }
    }
}

/// A failed run prepared for terminal display.
///
/// Wraps the originating error together with an optional suggestion. Produced
/// by [`user_friendly_error`] at the CLI boundary; library code never
/// constructs one.
pub struct ErrorContext {
    error: anyhow::Error,
    suggestion: Option<&'static str>,
}

impl ErrorContext {
    /// Print the error (and its cause chain) to stderr, colored when the
    /// terminal supports it.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);

        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".yellow(), cause);
        }

        if let Some(suggestion) = self.suggestion {
            eprintln!();
            eprintln!("{} {}", "hint:".cyan().bold(), suggestion);
        }
    }
}

/// Convert any error into a displayable [`ErrorContext`].
///
/// When the error is (or wraps) an [`UpdateError`], a kind-specific suggestion
/// is attached; other errors are displayed as-is.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = error.downcast_ref::<UpdateError>().and_then(UpdateError::suggestion);
    ErrorContext { error, suggestion }
}
