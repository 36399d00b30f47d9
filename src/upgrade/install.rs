//! Platform-specific install invocation.
//!
//! Each platform installs its artifact differently: Linux goes through the
//! package manager under `sudo`, macOS hands the disk image to `open`, and
//! Windows runs the installer executable directly. [`install_command`] builds
//! the argv; [`run_installer`] executes it and treats anything but a zero
//! exit as fatal for the run.

use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::core::UpdateError;
use crate::platform::{Platform, PlatformProfile};

/// Build the install argv for a downloaded artifact.
#[must_use]
pub fn install_command(profile: &PlatformProfile, installer_path: &Path) -> Vec<String> {
    let installer = installer_path.display().to_string();
    match profile.platform {
        Platform::Linux { fedora: true } => {
            vec!["sudo".into(), "dnf".into(), "install".into(), installer]
        }
        Platform::Linux { fedora: false } => {
            vec!["sudo".into(), "dpkg".into(), "-i".into(), installer]
        }
        Platform::MacOs => vec!["open".into(), installer],
        Platform::Windows => vec![installer],
    }
}

/// Run an install argv to completion.
///
/// # Errors
///
/// [`UpdateError::Install`] when the command cannot be launched or exits
/// non-zero.
pub async fn run_installer(argv: &[String]) -> Result<(), UpdateError> {
    let (program, args) = argv.split_first().ok_or_else(|| UpdateError::Install {
        message: "empty install command".to_string(),
    })?;

    info!("running installer: {}", argv.join(" "));
    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|e| UpdateError::Install {
            message: format!("failed to launch {program}: {e}"),
        })?;

    if !status.success() {
        return Err(UpdateError::Install {
            message: format!("{program} exited with {status}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformProfile;

    fn profile(platform: Platform) -> PlatformProfile {
        PlatformProfile::with_home(platform, Path::new("/home/u"))
    }

    #[test]
    fn linux_installs_through_the_package_manager() {
        let deb = install_command(
            &profile(Platform::Linux { fedora: false }),
            Path::new("/tmp/nimbus_1_QA_amd64.deb"),
        );
        assert_eq!(deb[..3], ["sudo", "dpkg", "-i"]);

        let rpm = install_command(
            &profile(Platform::Linux { fedora: true }),
            Path::new("/tmp/nimbus-1-QA-x86_64.rpm"),
        );
        assert_eq!(rpm[..3], ["sudo", "dnf", "install"]);
    }

    #[test]
    fn macos_opens_the_disk_image() {
        let argv = install_command(&profile(Platform::MacOs), Path::new("/tmp/Nimbus.dmg"));
        assert_eq!(argv, ["open", "/tmp/Nimbus.dmg"]);
    }

    #[test]
    fn windows_runs_the_installer_directly() {
        let argv = install_command(&profile(Platform::Windows), Path::new("NimbusSetup.exe"));
        assert_eq!(argv, ["NimbusSetup.exe"]);
    }

    #[tokio::test]
    async fn launch_failure_is_an_install_error() {
        let argv = vec!["lastbuild-no-such-installer-7a4e".to_string()];
        let err = run_installer(&argv).await.unwrap_err();
        assert!(matches!(err, UpdateError::Install { .. }));
    }
}
