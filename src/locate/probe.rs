//! Existence probing for candidate build artifacts.
//!
//! A listing entry only proves a directory was created, not that the
//! platform-specific installer inside it was actually published. Before a
//! candidate may become the discovery winner, the exact artifact URL is
//! probed; a nominally newer but unpublished build must not shadow the best
//! verified one.

use reqwest::StatusCode;
use tracing::debug;

/// Network existence check against a concrete artifact URL.
pub struct ExistenceProbe<'a> {
    client: &'a reqwest::Client,
}

impl<'a> ExistenceProbe<'a> {
    /// Probe using a shared HTTP client.
    #[must_use]
    pub const fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// Whether `url` answers with HTTP 200.
    ///
    /// Every transport error, timeout, and non-200 status is folded into
    /// `false`; a probe can reject a candidate but never abort discovery.
    pub async fn exists(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                let ok = response.status() == StatusCode::OK;
                debug!("probe {url}: {}", response.status());
                ok
            }
            Err(err) => {
                debug!("probe {url}: {err}");
                false
            }
        }
    }
}
