use thiserror::Error;

/// Everything that can go wrong while extracting a version from a header
/// value or a blob of text.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("no version given")]
    NoVersionGiven,

    #[error("unexpected X-Version-Id, cannot parse {0:?}")]
    UnexpectedFormat(String),

    #[error("parsing {value:?} failed: {source}")]
    InvalidFormat {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("no version found")]
    NoVersionFound,
}
