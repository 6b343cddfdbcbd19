//! Probes a running Mattermost installation for its version.

use std::time::Duration;

use thiserror::Error;

use crate::config::{DEFAULT_TIMEOUT, USER_AGENT};
use crate::version::{self, Version, VersionError};

/// Response header carrying the composite version identifier.
const VERSION_HEADER: &str = "X-Version-Id";

/// Failures while probing one instance. These are reported per URL and never
/// abort the evaluation of other URLs.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error(transparent)]
    Version(#[from] VersionError),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Network(err)
        }
    }
}

/// One Mattermost installation to check.
///
/// Except for a naive format check of the version header, this makes no
/// attempt to verify that an actual Mattermost installation answers at the
/// given URL.
pub struct Instance {
    url: String,
    client: reqwest::Client,
    // Probes are short-lived; the version is fetched once and kept.
    cached: Option<Version>,
}

impl Instance {
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("failed to create HTTP client"),
            cached: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connects to the instance and decodes the version header. The result
    /// is memoized; later calls return it without another request.
    pub async fn fetch_version(&mut self) -> Result<Version, ProbeError> {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }

        let header = self.version_header().await?;
        let running = version::extract_from_header(&header)?;
        self.cached = Some(running.clone());
        Ok(running)
    }

    async fn version_header(&self) -> Result<String, ProbeError> {
        let response = self.client.get(&self.url).send().await?;
        // An absent or unreadable header decodes like an empty one.
        Ok(response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string())
    }
}
