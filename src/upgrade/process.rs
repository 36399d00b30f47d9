//! Detecting and stopping the running application instance.
//!
//! An in-place upgrade must not race the application it replaces, so the
//! orchestrator asks [`ProcessLifecycle`] to bring the installed instance
//! down before anything destructive happens. Queries go through the
//! platform's process-listing tool; the stop request goes through the
//! application's own graceful-exit verb rather than a kill signal, so the
//! application gets to flush its state.
//!
//! Every query failure — tool missing, no matching rows, exec error — is
//! treated as "not running". Only the graceful-exit command itself failing,
//! or the process outliving the shutdown wait, is an error: at that point the
//! install cannot safely proceed.

use std::time::Duration;

use tokio::process::Command;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_STOP_TIMEOUT, PROCESS_NAME, SHUTDOWN_VERB, STOP_POLL_INTERVAL, WINDOWS_IMAGE_NAME,
};
use crate::core::UpdateError;
use crate::platform::PlatformProfile;

/// Process control for the installed application.
pub struct ProcessLifecycle<'a> {
    profile: &'a PlatformProfile,
    process_name: String,
    image_name: String,
    poll_interval: Duration,
    stop_timeout: Duration,
}

impl<'a> ProcessLifecycle<'a> {
    /// Lifecycle manager for the application described by `profile`.
    #[must_use]
    pub fn new(profile: &'a PlatformProfile) -> Self {
        Self {
            profile,
            process_name: PROCESS_NAME.to_string(),
            image_name: WINDOWS_IMAGE_NAME.to_string(),
            poll_interval: STOP_POLL_INTERVAL,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }

    /// Override the upper bound on the graceful-shutdown wait.
    #[must_use]
    pub const fn with_stop_timeout(mut self, stop_timeout: Duration) -> Self {
        self.stop_timeout = stop_timeout;
        self
    }

    /// Override the process/image name being matched (test seam).
    #[must_use]
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.image_name = format!("{name}.exe");
        self.process_name = name;
        self
    }

    /// Whether the application currently appears in the process table.
    pub async fn is_running(&self) -> bool {
        if self.profile.platform.is_unix_family() {
            self.query_pgrep().await
        } else {
            self.query_tasklist().await
        }
    }

    /// Stop the running instance and wait until it is gone.
    ///
    /// A missing installed binary means there is nothing to manage: success,
    /// no-op. Otherwise the application's graceful-exit verb is invoked and
    /// the process table polled until the instance disappears or the
    /// configured timeout expires.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Process`] when the graceful-exit command cannot be
    /// launched, exits non-zero, or the process outlives the timeout.
    pub async fn stop(&self) -> Result<(), UpdateError> {
        if !self.profile.installed_path.exists() {
            debug!(
                "{} does not exist, treating the application as stopped",
                self.profile.installed_path.display()
            );
            return Ok(());
        }

        if !self.is_running().await {
            debug!("{} is not running", self.process_name);
            return Ok(());
        }

        let status = Command::new(&self.profile.installed_path)
            .arg(SHUTDOWN_VERB)
            .status()
            .await
            .map_err(|e| UpdateError::Process {
                message: format!(
                    "failed to launch {} {SHUTDOWN_VERB}: {e}",
                    self.profile.installed_path.display()
                ),
            })?;

        if !status.success() {
            return Err(UpdateError::Process {
                message: format!("graceful exit command returned {status}"),
            });
        }

        info!("waiting for {} to exit", self.process_name);
        let wait = async {
            loop {
                sleep(self.poll_interval).await;
                if !self.is_running().await {
                    break;
                }
                debug!("{} still running", self.process_name);
            }
        };

        timeout(self.stop_timeout, wait)
            .await
            .map_err(|_| UpdateError::Process {
                message: format!(
                    "{} did not exit within {} seconds",
                    self.process_name,
                    self.stop_timeout.as_secs()
                ),
            })
    }

    /// Unix-family query via `pgrep`; any failure reads as not running.
    async fn query_pgrep(&self) -> bool {
        if which::which("pgrep").is_err() {
            debug!("pgrep not found, assuming {} is not running", self.process_name);
            return false;
        }

        match Command::new("pgrep").arg(&self.process_name).output().await {
            Ok(output) => output.status.success() && !output.stdout.is_empty(),
            Err(err) => {
                debug!("pgrep failed: {err}");
                false
            }
        }
    }

    /// Windows query via `tasklist`, matching the exact image name in the
    /// CSV output; any failure reads as not running.
    async fn query_tasklist(&self) -> bool {
        let filter = format!("IMAGENAME eq {}", self.image_name);
        let output = Command::new("tasklist.exe")
            .args(["/FO", "CSV", "/FI", &filter])
            .output()
            .await;

        match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                stdout
                    .lines()
                    .nth(1)
                    .is_some_and(|row| row.starts_with(&format!("\"{}\"", self.image_name)))
            }
            Err(err) => {
                debug!("tasklist failed: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use std::path::Path;

    #[tokio::test]
    async fn stop_is_a_noop_when_the_binary_is_absent() {
        let temp = tempfile::tempdir().unwrap();
        let mut profile =
            PlatformProfile::with_home(Platform::Linux { fedora: false }, temp.path());
        profile.installed_path = temp.path().join("does/not/exist/Nimbus");

        let lifecycle = ProcessLifecycle::new(&profile);
        assert!(lifecycle.stop().await.is_ok());
    }

    #[tokio::test]
    async fn unknown_process_reads_as_not_running() {
        let profile =
            PlatformProfile::with_home(Platform::Linux { fedora: false }, Path::new("/h"));
        let lifecycle = ProcessLifecycle::new(&profile)
            .with_process_name("lastbuild-no-such-process-3f1b");
        assert!(!lifecycle.is_running().await);
    }

    #[tokio::test]
    async fn stop_succeeds_when_installed_but_not_running() {
        let temp = tempfile::tempdir().unwrap();
        let binary = temp.path().join("Nimbus");
        std::fs::write(&binary, b"stub").unwrap();

        let mut profile =
            PlatformProfile::with_home(Platform::Linux { fedora: false }, temp.path());
        profile.installed_path = binary;

        let lifecycle = ProcessLifecycle::new(&profile)
            .with_process_name("lastbuild-no-such-process-9c2d");
        assert!(lifecycle.stop().await.is_ok());
    }
}
