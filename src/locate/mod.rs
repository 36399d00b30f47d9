//! Build discovery: turning an untrusted directory listing into a verified
//! "latest build" decision.
//!
//! The build server's directory index is unordered and over-approximate — an
//! entry may exist for a build whose platform artifact was never published.
//! [`BuildLocator`] fetches the listing once, parses every entry into a
//! version key, and keeps a running best candidate that is only ever replaced
//! by an entry that is both strictly newer *and* confirmed by the
//! [`probe::ExistenceProbe`]. Coupling ordering with verification this way
//! means a nominally newer but unpublished build can never shadow the actual
//! best.
//!
//! Two selection regimes exist, chosen from the version line:
//!
//! - **Unbounded** (trunk lines, `master*`): entries are keyed by the dotted
//!   4-part scheme and probed by label.
//! - **Bounded** (maintenance lines): entries are keyed by their trailing
//!   revision and probed by revision.
//!
//! In both regimes the probe target is the full artifact URL, so a winner is
//! always verified for the exact platform and build type being fetched.

pub mod listing;
pub mod probe;
pub mod version;

use tracing::debug;

use crate::core::UpdateError;
use crate::download::download_url;
use crate::platform::PlatformProfile;
use probe::ExistenceProbe;
use version::VersionKey;

/// The winner of a discovery scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBuild {
    /// Raw listing label of the build (e.g. `1.2.3.4567/`).
    pub label: String,
    /// Trailing revision, present only for bounded-regime winners.
    pub revision: Option<u64>,
}

/// Finds the latest verified build under a version directory.
pub struct BuildLocator<'a> {
    client: &'a reqwest::Client,
    profile: &'a PlatformProfile,
    build_type: &'a str,
}

impl<'a> BuildLocator<'a> {
    /// Locator over a shared HTTP client for the given platform profile and
    /// build type.
    #[must_use]
    pub const fn new(
        client: &'a reqwest::Client,
        profile: &'a PlatformProfile,
        build_type: &'a str,
    ) -> Self {
        Self {
            client,
            profile,
            build_type,
        }
    }

    /// Scan `version_directory` and return the latest verified build, or
    /// `None` when no candidate passes the probe.
    ///
    /// `unbounded` selects the trunk regime (dotted 4-part keys) over the
    /// maintenance regime (trailing-revision keys).
    ///
    /// # Errors
    ///
    /// Only the listing fetch itself can fail, with
    /// [`UpdateError::Transport`]; probe failures are folded into candidate
    /// rejection.
    pub async fn latest(
        &self,
        version_directory: &str,
        unbounded: bool,
    ) -> Result<Option<LocatedBuild>, UpdateError> {
        let response = self
            .client
            .get(version_directory)
            .send()
            .await
            .map_err(|e| {
                UpdateError::transport_from(format!("listing fetch for {version_directory}"), e)
            })?;

        if !response.status().is_success() {
            return Err(UpdateError::transport(format!(
                "listing fetch for {version_directory} returned {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            UpdateError::transport_from(format!("listing fetch for {version_directory}"), e)
        })?;

        let winner = if unbounded {
            self.scan_unbounded(version_directory, &body).await
        } else {
            self.scan_bounded(version_directory, &body).await
        };

        debug!(
            "scan of {version_directory} finished: {:?}",
            winner.as_ref().map(|b| &b.label)
        );
        Ok(winner)
    }

    /// Trunk regime: dotted 4-part ordering, probe by label.
    async fn scan_unbounded(&self, version_directory: &str, body: &str) -> Option<LocatedBuild> {
        let probe = ExistenceProbe::new(self.client);
        let mut best: Option<LocatedBuild> = None;
        let mut best_key = VersionKey::SENTINEL;

        for href in listing::hrefs(body) {
            let key = VersionKey::parse_dotted(href);
            if key <= best_key {
                continue;
            }
            let url =
                download_url(version_directory, href, None, self.profile, self.build_type);
            if probe.exists(&url).await {
                best_key = key;
                best = Some(LocatedBuild {
                    label: href.to_string(),
                    revision: None,
                });
            }
        }
        best
    }

    /// Maintenance regime: trailing-revision ordering, probe by revision.
    async fn scan_bounded(&self, version_directory: &str, body: &str) -> Option<LocatedBuild> {
        let probe = ExistenceProbe::new(self.client);
        let mut best: Option<LocatedBuild> = None;
        let mut best_revision = 0u64;

        for href in listing::hrefs(body) {
            let Some(revision) = version::parse_revision(href) else {
                continue;
            };
            if revision == 0 || revision <= best_revision {
                continue;
            }
            let url = download_url(
                version_directory,
                href,
                Some(revision),
                self.profile,
                self.build_type,
            );
            if probe.exists(&url).await {
                best_revision = revision;
                best = Some(LocatedBuild {
                    label: href.to_string(),
                    revision: Some(revision),
                });
            }
        }
        best
    }
}
