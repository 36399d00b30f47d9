//! Global constants used throughout the lastbuild codebase.
//!
//! Server defaults, product identifiers, and timing parameters shared by
//! multiple modules. Defining them centrally keeps the magic values
//! discoverable and gives the config layer a single set of fallbacks.

use std::time::Duration;

/// Default build-server directory that version lines are searched under.
///
/// Overridable with `--root` or the `root_url` config key.
pub const DEFAULT_ROOT_URL: &str = "http://builds.nimbus-im.dev/builds/Nimbus/NimbusPC/DevBuilds/";

/// File name used for a downloaded artifact when the URL yields none.
pub const DEFAULT_INSTALLER_NAME: &str = "DefaultNimbusSetup";

/// Product tag embedded in backup archive names (`<YYYY_MM_DD>_<tag>.zip`).
pub const PRODUCT_TAG: &str = "Nimbus";

/// Process name matched by `pgrep` on Unix-family platforms.
pub const PROCESS_NAME: &str = "Nimbus";

/// Image name matched in `tasklist` output on Windows.
pub const WINDOWS_IMAGE_NAME: &str = "Nimbus.exe";

/// Command-line verb understood by the installed application as a request
/// to shut down gracefully.
pub const SHUTDOWN_VERB: &str = "ExitNimbus";

/// Version lines starting with this prefix use the unbounded 4-part
/// numbering scheme; all other lines use the bounded revision scheme.
pub const UNBOUNDED_LINE_PREFIX: &str = "master";

/// Interval between process-table polls while waiting for the application
/// to exit.
pub const STOP_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default upper bound on the graceful-shutdown wait.
///
/// Overridable with `--stop-timeout` or the `stop_timeout_secs` config key.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(120);
