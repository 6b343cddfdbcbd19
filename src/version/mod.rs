//! Version model for Mattermost installations, built on the `semver` crate.
//!
//! A [`Version`] is always tagged with an [`Edition`], because Team and
//! Enterprise releases have independent lineages. Ordering two versions of
//! different editions is meaningless, so `partial_cmp` refuses to do it
//! rather than silently falling back to number comparison.

pub mod error;
mod header;
mod scan;

pub use error::VersionError;
pub use header::extract_from_header;
pub use scan::extract_from_text;

use std::cmp::Ordering;
use std::fmt;

/// Rendered wherever a version could not be determined.
pub const UNKNOWN: &str = "<unknown>";

/// Release track of a Mattermost installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Team,
    Enterprise,
}

impl Edition {
    pub fn label(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed Mattermost version. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Version {
    semver: semver::Version,
    edition: Edition,
}

impl Version {
    /// Parses a semantic version string and tags it with an edition.
    pub fn parse(text: &str, edition: Edition) -> Result<Self, VersionError> {
        let semver = semver::Version::parse(text).map_err(|source| VersionError::InvalidFormat {
            value: text.to_string(),
            source,
        })?;
        Ok(Self { semver, edition })
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn semver(&self) -> &semver::Version {
        &self.semver
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}-{}", self.semver, self.edition.label())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    /// Semver precedence within one edition; `None` across editions.
    /// Build metadata does not participate in ordering.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.edition == other.edition).then(|| self.semver.cmp_precedence(&other.semver))
    }
}
