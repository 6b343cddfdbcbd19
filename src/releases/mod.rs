//! Information about the Mattermost version archive: which Team and
//! Enterprise releases exist, and whether a given running version has an
//! update available.
//!
//! One fetch produces one immutable [`Archive`] snapshot; nothing here is
//! updated incrementally.

pub mod error;
mod fetch;

pub use error::ArchiveError;
pub use fetch::ArchiveFetcher;

use crate::version::{Edition, Version};

/// One entry of the version archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    /// URL to the release notes, absolute.
    pub changelog: Option<String>,
    /// Download URL for the Linux 64bit tarball, absolute.
    pub download: Option<String>,
    /// SHA-256 checksum of the tarball, `sha256:`-prefixed.
    pub checksum: Option<String>,
}

/// All releases known for both editions, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    team: Vec<Release>,
    enterprise: Vec<Release>,
}

impl Archive {
    /// Builds a snapshot from per-edition release lists. Duplicate versions
    /// within one edition are dropped, keeping the first occurrence.
    pub fn new(team: Vec<Release>, enterprise: Vec<Release>) -> Self {
        Self {
            team: dedup_by_version(team),
            enterprise: dedup_by_version(enterprise),
        }
    }

    pub fn releases(&self, edition: Edition) -> &[Release] {
        match edition {
            Edition::Team => &self.team,
            Edition::Enterprise => &self.enterprise,
        }
    }

    /// The newest release known for an edition, or `None` if the archive
    /// holds no parseable entry for it.
    pub fn latest(&self, edition: Edition) -> Option<&Release> {
        // Strict `>` keeps the earliest entry on version ties; the document
        // is roughly chronological, so that is the canonical one.
        let mut latest: Option<&Release> = None;
        for release in self.releases(edition) {
            match latest {
                Some(current) if release.version <= current.version => {}
                _ => latest = Some(release),
            }
        }
        latest
    }

    /// Returns the newest release for `running`'s edition iff it is strictly
    /// newer than `running`. Never compares across editions.
    pub fn update_candidate(&self, running: &Version) -> Option<&Release> {
        let latest = self.latest(running.edition())?;
        (latest.version > *running).then_some(latest)
    }
}

fn dedup_by_version(releases: Vec<Release>) -> Vec<Release> {
    let mut unique: Vec<Release> = Vec::with_capacity(releases.len());
    for release in releases {
        if unique.iter().any(|r| r.version == release.version) {
            continue;
        }
        unique.push(release);
    }
    unique
}
