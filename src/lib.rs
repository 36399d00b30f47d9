//! lastbuild — locate, download, and install the latest Nimbus desktop build.
//!
//! Given a version line (a release branch name such as `master` or
//! `feature-sync`), lastbuild scans the build server's directory listing for
//! the newest build that actually has a published installer for the target
//! platform, downloads it, and can upgrade a running installation in place:
//! stop the application gracefully, archive its data directory, and run the
//! platform install command.
//!
//! # Architecture Overview
//!
//! Discovery treats the directory listing as untrusted: entries are parsed
//! into ordered version keys, and a candidate only becomes the winner after
//! an existence probe confirms its platform artifact was published. The
//! upgrade side is a strictly linear pipeline — locate, download, stop,
//! backup, install — where the first failure terminates the run.
//!
//! # Core Modules
//!
//! - [`locate`] - listing parsing, version ordering, existence probing, and
//!   the latest-build decision
//! - [`download`] - artifact URL construction and streamed retrieval
//! - [`upgrade`] - process lifecycle, data backup, install execution, and the
//!   orchestrator that sequences a run
//!
//! # Supporting Modules
//!
//! - [`cli`] - clap-based command-line surface (`latest`, `fetch`)
//! - [`config`] - optional global config file (~/.lastbuild/config.toml)
//! - [`core`] - typed errors and user-facing error reporting
//! - [`platform`] - platform dispatch and the per-platform install profile
//! - [`constants`] - server defaults and product identifiers
//!
//! # Command-Line Usage
//!
//! ```bash
//! # What would an update pick right now?
//! lastbuild latest master
//!
//! # Download the newest verified master build
//! lastbuild fetch master
//!
//! # Full in-place upgrade with a data backup first
//! lastbuild fetch master --install --backup
//!
//! # Maintenance line, explicit platform and build type
//! lastbuild fetch feature-sync --platform Lin --type Debug
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod download;
pub mod locate;
pub mod platform;
pub mod upgrade;
