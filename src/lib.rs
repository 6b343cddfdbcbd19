//! Core library behind the `mattercheck` command: probe running Mattermost
//! installations for their version and compare them against the latest
//! supported releases from the version archive.

pub mod check;
pub mod config;
pub mod instance;
pub mod releases;
pub mod version;
