//! Retrieval and HTML extraction for the version archive page.
//!
//! This is the most fragile part of mattercheck: it leans entirely on the
//! structure of an external, unversioned HTML document. The selector strings
//! below are configuration, not logic — when the upstream page restructures,
//! they are what needs updating, nothing else.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::{Archive, ArchiveError, Release};
use crate::config::USER_AGENT;
use crate::version::{self, Edition};

// TODO: switch to the JSON feed if upstream ever ships one
// (https://github.com/mattermost/docs/issues/1190#issuecomment-302162095).
const TEAM_HEADINGS: &str = "div#mattermost-team-edition > dl > dt";
const ENTERPRISE_HEADINGS: &str = "div#mattermost-enterprise-edition > dl > dt";

// Link extraction is positional: the first anchor in a heading is the
// changelog, the second the download.
const HEADING_LINKS: &str = "a[href]";

// The checksum hides a few levels below the heading's following <dd>.
const CHECKSUM: &str = "ul > li:nth-child(2) p code span.pre";

/// Fetches the version archive page and extracts [`Release`] entries from it.
pub struct ArchiveFetcher {
    client: reqwest::Client,
    url: Url,
    selectors: ArchiveSelectors,
}

struct ArchiveSelectors {
    team: Selector,
    enterprise: Selector,
    links: Selector,
    checksum: Selector,
}

impl ArchiveSelectors {
    fn new() -> Self {
        Self {
            team: Selector::parse(TEAM_HEADINGS).expect("team heading selector"),
            enterprise: Selector::parse(ENTERPRISE_HEADINGS).expect("enterprise heading selector"),
            links: Selector::parse(HEADING_LINKS).expect("heading link selector"),
            checksum: Selector::parse(CHECKSUM).expect("checksum selector"),
        }
    }
}

impl ArchiveFetcher {
    /// Prepares a fetcher for the archive at `url`. Relative links found on
    /// the page are resolved against this URL.
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("failed to create HTTP client"),
            url,
            selectors: ArchiveSelectors::new(),
        }
    }

    /// Retrieves the archive page and extracts one [`Archive`] snapshot.
    ///
    /// Transport problems are the only hard failure; entries that cannot be
    /// extracted are skipped.
    pub async fn fetch(&self) -> Result<Archive, ArchiveError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status(status));
        }

        let body = response.text().await?;
        Ok(self.extract_releases(&Html::parse_document(&body)))
    }

    /// The narrow seam between page structure and comparison logic: all
    /// selector-dependent extraction happens here.
    pub fn extract_releases(&self, document: &Html) -> Archive {
        Archive::new(
            self.edition_releases(document, Edition::Team),
            self.edition_releases(document, Edition::Enterprise),
        )
    }

    fn edition_releases(&self, document: &Html, edition: Edition) -> Vec<Release> {
        let headings = match edition {
            Edition::Team => &self.selectors.team,
            Edition::Enterprise => &self.selectors.enterprise,
        };

        let mut releases = Vec::new();
        for heading in document.select(headings) {
            let text: String = heading.text().collect();
            let version = match version::extract_from_text(&text, edition) {
                Ok(version) => version,
                Err(err) => {
                    debug!(heading = text.trim(), %err, "skipping archive entry");
                    continue;
                }
            };

            let mut links = heading
                .select(&self.selectors.links)
                .filter_map(|anchor| anchor.value().attr("href"));
            let changelog = links.next().and_then(|href| self.absolute_url(href));
            let download = links.next().and_then(|href| self.absolute_url(href));

            releases.push(Release {
                version,
                changelog,
                download,
                checksum: self.checksum_for(heading),
            });
        }
        releases
    }

    fn checksum_for(&self, heading: ElementRef<'_>) -> Option<String> {
        let details = heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "dd")?;
        let span = details.select(&self.selectors.checksum).next()?;

        let digest: String = span.text().collect();
        let digest = digest.trim();
        (!digest.is_empty()).then(|| format!("sha256:{digest}"))
    }

    fn absolute_url(&self, href: &str) -> Option<String> {
        self.url.join(href).map(Into::into).ok()
    }
}
