//! Evaluates a set of instance URLs against one archive snapshot.
//!
//! The archive is fetched exactly once by the caller; probes then run
//! concurrently. The snapshot is read-only, so no synchronization is needed.

use std::time::Duration;

use futures::future::join_all;

use crate::instance::{Instance, ProbeError};
use crate::releases::{Archive, Release};
use crate::version::{self, Version};

/// Outcome of probing one URL.
#[derive(Debug)]
pub struct InstanceReport {
    pub url: String,
    pub outcome: Result<Checked, ProbeError>,
}

/// A successfully probed instance: what runs there, and the update for it,
/// if the archive knows a newer release of the same edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub running: Version,
    pub update: Option<Release>,
}

impl InstanceReport {
    /// Version label for reporting; the unknown sentinel when the probe failed.
    pub fn version_label(&self) -> String {
        match &self.outcome {
            Ok(checked) => checked.running.to_string(),
            Err(_) => version::UNKNOWN.to_string(),
        }
    }
}

/// Aggregate classification of one run, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStatus {
    /// All probed instances are current.
    UpToDate,
    /// At least one instance has an update available.
    UpdatesAvailable,
    /// At least one instance could not be probed, or the archive fetch failed.
    ProbeFailed,
}

impl RunStatus {
    /// Process exit code for this status. Fatal takes precedence over warn.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UpToDate => 0,
            Self::UpdatesAvailable => 1,
            Self::ProbeFailed => 2,
        }
    }
}

/// Probes every URL concurrently against one read-only archive snapshot.
///
/// A failed probe is reported for its URL and does not block the others.
/// Reports come back in input order.
pub async fn check_instances(
    archive: &Archive,
    urls: &[String],
    timeout: Duration,
) -> Vec<InstanceReport> {
    let probes = urls.iter().map(|url| async move {
        let mut instance = Instance::with_timeout(url, timeout);
        let outcome = match instance.fetch_version().await {
            Ok(running) => {
                let update = archive.update_candidate(&running).cloned();
                Ok(Checked { running, update })
            }
            Err(err) => Err(err),
        };
        InstanceReport {
            url: instance.url().to_string(),
            outcome,
        }
    });

    join_all(probes).await
}

/// Folds per-URL outcomes into the run's exit classification.
pub fn classify(reports: &[InstanceReport]) -> RunStatus {
    reports
        .iter()
        .map(|report| match &report.outcome {
            Err(_) => RunStatus::ProbeFailed,
            Ok(checked) if checked.update.is_some() => RunStatus::UpdatesAvailable,
            Ok(_) => RunStatus::UpToDate,
        })
        .max()
        .unwrap_or(RunStatus::UpToDate)
}
