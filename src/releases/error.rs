use thiserror::Error;

/// Transport failures while retrieving the release archive. These are the
/// only hard failures of an archive fetch; per-entry extraction problems are
/// skipped during parsing instead.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("request to release archive timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("fetching release archive failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("release archive returned status {0}")]
    Status(reqwest::StatusCode),
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts get their own kind so callers can tell them apart from
        // connection problems.
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Network(err)
        }
    }
}
