//! Pattern scan for version strings in unstructured text.

use std::sync::LazyLock;

use regex::Regex;

use super::{Edition, Version, VersionError};

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bv\d+\.\d+\.\d+\b").expect("version pattern"));

/// Finds the first `v<major>.<minor>.<patch>` substring in `text` and parses
/// it as a semantic version.
///
/// The text itself does not encode the edition; the caller knows which
/// archive section it scanned and supplies it.
pub fn extract_from_text(text: &str, edition: Edition) -> Result<Version, VersionError> {
    let found = VERSION_PATTERN
        .find(text)
        .ok_or(VersionError::NoVersionFound)?;
    Version::parse(&found.as_str()[1..], edition)
}
