//! Decoder for the `X-Version-Id` response header.
//!
//! The header value is a dot-delimited composite whose shape has drifted
//! repeatedly over the years. Decoding is an ordered sequence of
//! normalization passes over the split segments, one per observed anomaly.
//! New quirks get a new pass; older formats must keep decoding, so the
//! fixture table in the tests below is the contract.

use super::{Edition, Version, VersionError};

/// Parses an `X-Version-Id` header value into a [`Version`].
///
/// Observed layouts:
/// - `4.0.0.4.0.10.commit-ish.false` — database-schema version duplicated
///   before the application version (8 segments, segment 0 == segment 3)
/// - `5.30.0.5.30.6{PATCH}.<hash>.false` — a `{PATCH}` placeholder leaked
///   into the patch segment on release day
/// - `9.3.0.<build>.<hash>.false` — no duplicated prefix, 6 segments
///
/// The last segment is always a literal `"true"`/`"false"` Enterprise flag.
pub fn extract_from_header(value: &str) -> Result<Version, VersionError> {
    if value.is_empty() {
        return Err(VersionError::NoVersionGiven);
    }

    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() < 4 {
        // Cannot even recover a three-part version plus the edition flag.
        return Err(VersionError::UnexpectedFormat(value.to_string()));
    }

    let mut candidate = segments[..3].join(".");

    // Older servers prefixed the database-schema version, duplicating the
    // major segment at position 3. The application version then sits at 3..6.
    if segments.len() == 8 && segments[0] == segments[3] {
        candidate = segments[3..6].join(".");
    }

    // Bad release day: a templating placeholder once leaked into the field.
    let candidate = candidate.strip_suffix("{PATCH}").unwrap_or(&candidate);

    let enterprise = segments[segments.len() - 1] == "true";
    let edition = if enterprise {
        Edition::Enterprise
    } else {
        Edition::Team
    };
    Version::parse(candidate, edition)
}
