//! Shared configuration constants.

use std::time::Duration;

/// Canonical location of the Mattermost version archive.
pub const ARCHIVE_URL: &str = "https://docs.mattermost.com/upgrade/version-archive.html";

/// Timeout applied to every HTTP request (archive fetch and instance probe)
/// unless overridden on the command line.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("mattercheck/", env!("CARGO_PKG_VERSION"));
