//! Platform identification and the per-platform install profile.
//!
//! The build server publishes artifacts under per-platform directories
//! (`Win`, `Mac`, `Lin`), and every local concern of an upgrade — where the
//! application binary lives, where its data directory is, what the installer
//! file is called — varies with the platform. This module centralizes that
//! dispatch in a tagged enum plus an immutable [`PlatformProfile`] lookup,
//! constructed once and passed by reference into every component.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lastbuild::platform::{Platform, PlatformProfile};
//!
//! # fn example() -> Result<(), lastbuild::core::UpdateError> {
//! let platform = Platform::detect().unwrap_or(Platform::Linux { fedora: false });
//! let profile = PlatformProfile::for_platform(platform)?;
//! println!("installer: {}", profile.installer_name);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::UpdateError;

/// A supported target platform.
///
/// The Linux variant carries the Fedora flag because the two package formats
/// differ in installer naming and install command, but share every other
/// platform property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows desktop.
    Windows,
    /// macOS desktop.
    MacOs,
    /// Linux desktop; `fedora` selects the `.rpm` packaging over `.deb`.
    Linux {
        /// Use the Fedora (`.rpm`/`dnf`) variant instead of Debian.
        fedora: bool,
    },
}

impl Platform {
    /// Detect the host platform, if it is one the build server publishes for.
    pub fn detect() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux { fedora: false }),
            _ => None,
        }
    }

    /// The path segment this platform uses on the build server.
    #[must_use]
    pub const fn remote_segment(self) -> &'static str {
        match self {
            Self::Windows => "Win",
            Self::MacOs => "Mac",
            Self::Linux { .. } => "Lin",
        }
    }

    /// Whether process queries go through the Unix process table (`pgrep`).
    #[must_use]
    pub const fn is_unix_family(self) -> bool {
        matches!(self, Self::MacOs | Self::Linux { .. })
    }

    /// Apply the Fedora packaging flag; a no-op on non-Linux platforms.
    #[must_use]
    pub const fn with_fedora(self, fedora: bool) -> Self {
        match self {
            Self::Linux { .. } => Self::Linux { fedora },
            other => other,
        }
    }

    /// Whether two platforms target the same operating system, ignoring the
    /// Linux packaging variant.
    #[must_use]
    pub fn same_os(self, other: Self) -> bool {
        self.remote_segment() == other.remote_segment()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_segment())
    }
}

impl FromStr for Platform {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win" | "windows" => Ok(Self::Windows),
            "mac" | "macos" | "darwin" => Ok(Self::MacOs),
            "lin" | "linux" => Ok(Self::Linux { fedora: false }),
            other => Err(UpdateError::Config {
                message: format!("unknown platform '{other}' (expected Win, Mac, or Lin)"),
            }),
        }
    }
}

/// Immutable per-platform install parameters.
///
/// Built once from static configuration plus the requested platform; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    /// The platform this profile describes.
    pub platform: Platform,
    /// Installer file name. On Linux this is a template with `%version%` and
    /// `%type%` placeholders; elsewhere it is the literal remote file name.
    pub installer_name: String,
    /// Absolute path of the installed application binary.
    pub installed_path: PathBuf,
    /// Absolute path of the application's local data directory.
    pub data_path: PathBuf,
}

impl PlatformProfile {
    /// Build the profile for `platform` using the current user's home
    /// directory.
    pub fn for_platform(platform: Platform) -> Result<Self, UpdateError> {
        let home = dirs::home_dir().ok_or_else(|| UpdateError::Config {
            message: "could not determine the home directory".to_string(),
        })?;
        Ok(Self::with_home(platform, &home))
    }

    /// Build the profile for `platform` rooted at an explicit home directory.
    #[must_use]
    pub fn with_home(platform: Platform, home: &Path) -> Self {
        match platform {
            Platform::Windows => Self {
                platform,
                installer_name: "NimbusSetup.exe".to_string(),
                installed_path: home.join("AppData/Local/Nimbus/Nimbus.exe"),
                data_path: home.join("AppData/Roaming/NimbusPC"),
            },
            Platform::MacOs => Self {
                platform,
                installer_name: "Nimbus.dmg".to_string(),
                installed_path: PathBuf::from("/Applications/Nimbus.app/Contents/MacOS/Nimbus"),
                data_path: home.join("Library/Application Support/NimbusPC"),
            },
            Platform::Linux { fedora } => Self {
                platform,
                installer_name: if fedora {
                    "nimbus-%version%-%type%-x86_64.rpm".to_string()
                } else {
                    "nimbus_%version%_%type%_amd64.deb".to_string()
                },
                installed_path: PathBuf::from("/opt/nimbus/Nimbus"),
                data_path: home.join(".NimbusPC"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_names_case_insensitively() {
        assert_eq!("Win".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("mac".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!(
            "LINUX".parse::<Platform>().unwrap(),
            Platform::Linux { fedora: false }
        );
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn remote_segments_match_server_layout() {
        assert_eq!(Platform::Windows.remote_segment(), "Win");
        assert_eq!(Platform::MacOs.remote_segment(), "Mac");
        assert_eq!(Platform::Linux { fedora: true }.remote_segment(), "Lin");
    }

    #[test]
    fn fedora_flag_only_affects_linux() {
        assert_eq!(
            Platform::Linux { fedora: false }.with_fedora(true),
            Platform::Linux { fedora: true }
        );
        assert_eq!(Platform::Windows.with_fedora(true), Platform::Windows);
    }

    #[test]
    fn same_os_ignores_packaging_variant() {
        assert!(
            Platform::Linux { fedora: true }.same_os(Platform::Linux { fedora: false })
        );
        assert!(!Platform::Windows.same_os(Platform::MacOs));
    }

    #[test]
    fn windows_profile_paths_are_under_home() {
        let profile = PlatformProfile::with_home(Platform::Windows, Path::new("/home/u"));
        assert_eq!(profile.installer_name, "NimbusSetup.exe");
        assert!(profile.installed_path.starts_with("/home/u"));
        assert!(profile.data_path.ends_with("NimbusPC"));
    }

    #[test]
    fn linux_profile_switches_template_on_fedora() {
        let deb = PlatformProfile::with_home(Platform::Linux { fedora: false }, Path::new("/h"));
        let rpm = PlatformProfile::with_home(Platform::Linux { fedora: true }, Path::new("/h"));
        assert!(deb.installer_name.ends_with(".deb"));
        assert!(rpm.installer_name.ends_with(".rpm"));
        assert!(deb.installer_name.contains("%version%"));
        assert!(deb.installer_name.contains("%type%"));
    }
}
