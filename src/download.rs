//! Artifact URL construction and retrieval.
//!
//! [`download_url`] derives the concrete installer URL for a located build,
//! and [`ArtifactDownloader`] streams it into the local store directory. The
//! same URL builder feeds the existence probe during discovery, so a download
//! always targets an artifact that was verified for the exact platform and
//! build type being fetched.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_INSTALLER_NAME;
use crate::core::UpdateError;
use crate::platform::{Platform, PlatformProfile};

/// Join URL segments with `/`, tolerating `./` prefixes and trailing slashes.
///
/// Each segment is trimmed of leading `.`/`/` characters and trailing `/`
/// characters; segments that trim to nothing are skipped, so the result never
/// contains an empty path component.
#[must_use]
pub fn urljoin<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(|s| s.trim_start_matches(['.', '/']).trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the artifact URL for a located build.
///
/// Linux-family platforms encode the build type in the installer file name
/// (the profile's `%version%`/`%type%` template) and use no separate
/// build-type path segment; every other platform keeps a literal installer
/// name and adds the build type as its own segment.
#[must_use]
pub fn download_url(
    version_directory: &str,
    build_label: &str,
    revision: Option<u64>,
    profile: &PlatformProfile,
    build_type: &str,
) -> String {
    match profile.platform {
        Platform::Linux { .. } => {
            let installer_version = revision.map_or_else(
                || build_label.trim_matches(['.', '/']).to_string(),
                |rev| rev.to_string(),
            );
            let installer = profile
                .installer_name
                .replace("%version%", &installer_version)
                .replace("%type%", build_type);
            urljoin([
                version_directory,
                build_label,
                profile.platform.remote_segment(),
                &installer,
            ])
        }
        _ => urljoin([
            version_directory,
            build_label,
            profile.platform.remote_segment(),
            build_type,
            &profile.installer_name,
        ]),
    }
}

/// Streams a remote installer into the local artifact store.
pub struct ArtifactDownloader<'a> {
    client: &'a reqwest::Client,
}

impl<'a> ArtifactDownloader<'a> {
    /// Download using a shared HTTP client.
    #[must_use]
    pub const fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` into `store_directory`, returning the local file path.
    ///
    /// A store directory that does not exist (or is not a directory) degrades
    /// to the current working directory with a warning instead of failing the
    /// run. The local file name is the URL's final path segment, or
    /// [`DEFAULT_INSTALLER_NAME`] when the URL ends in a slash.
    pub async fn fetch(
        &self,
        url: &str,
        store_directory: &Path,
    ) -> Result<PathBuf, UpdateError> {
        let store = if store_directory.is_dir() {
            store_directory
        } else {
            warn!(
                "{} is not a valid directory, storing in the current directory",
                store_directory.display()
            );
            Path::new(".")
        };

        let file_name = match url.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => {
                warn!("could not derive a file name from {url}, using {DEFAULT_INSTALLER_NAME}");
                DEFAULT_INSTALLER_NAME
            }
        };
        let full_path = store.join(file_name);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpdateError::transport_from(format!("download of {url}"), e))?;

        if !response.status().is_success() {
            return Err(UpdateError::transport(format!(
                "download of {url} returned {}",
                response.status()
            )));
        }

        let progress = response.content_length().map(|total| {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} {bytes_per_sec}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        });

        let mut file = File::create(&full_path).await.map_err(|e| {
            UpdateError::filesystem(format!("creating {}", full_path.display()), e)
        })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| UpdateError::transport_from(format!("download of {url}"), e))?;
            file.write_all(&chunk).await.map_err(|e| {
                UpdateError::filesystem(format!("writing {}", full_path.display()), e)
            })?;
            if let Some(bar) = &progress {
                bar.inc(chunk.len() as u64);
            }
        }

        file.flush().await.map_err(|e| {
            UpdateError::filesystem(format!("flushing {}", full_path.display()), e)
        })?;
        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        debug!("downloaded {url}");
        info!("saved: {}", full_path.display());
        Ok(full_path)
    }
}
