//! Archive fetching against a captured version-archive page.

use std::time::Duration;

use mockito::{Server, ServerGuard};
use url::Url;

use mattercheck::releases::{ArchiveError, ArchiveFetcher};
use mattercheck::version::{Edition, Version};

const FIXTURE: &str = include_str!("fixtures/version-archive.html");
const ARCHIVE_PATH: &str = "/upgrade/version-archive.html";

async fn serve_fixture() -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", ARCHIVE_PATH)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(FIXTURE)
        .create_async()
        .await;
    server
}

fn fetcher_for(server: &ServerGuard) -> ArchiveFetcher {
    let url = Url::parse(&format!("{}{ARCHIVE_PATH}", server.url())).unwrap();
    ArchiveFetcher::new(url, Duration::from_secs(5))
}

#[tokio::test]
async fn fetch_finds_the_latest_release_per_edition() {
    let server = serve_fixture().await;
    let archive = fetcher_for(&server).fetch().await.unwrap();

    let team = archive.latest(Edition::Team).unwrap();
    assert_eq!(team.version, Version::parse("5.35.1", Edition::Team).unwrap());
    assert_eq!(
        team.checksum.as_deref(),
        Some("sha256:45a0b34e7f32948da6f2a1e1e3862b967f728bb962d9bc74b07b5868d6882ccf")
    );

    let ent = archive.latest(Edition::Enterprise).unwrap();
    assert_eq!(
        ent.version,
        Version::parse("5.35.1", Edition::Enterprise).unwrap()
    );
    assert_eq!(
        ent.checksum.as_deref(),
        Some("sha256:dbadcafba3f9b6c5af030b6701d8edbb048df39bc94567fbf900865eed6d53b7")
    );
}

#[tokio::test]
async fn fetch_collects_the_full_release_list() {
    let server = serve_fixture().await;
    let archive = fetcher_for(&server).fetch().await.unwrap();

    assert_eq!(archive.releases(Edition::Enterprise).len(), 3);
    // The announcement heading without a version number is skipped.
    assert_eq!(archive.releases(Edition::Team).len(), 2);
}

#[tokio::test]
async fn relative_changelog_links_resolve_against_the_archive_url() {
    let server = serve_fixture().await;
    let archive = fetcher_for(&server).fetch().await.unwrap();

    let team = archive.latest(Edition::Team).unwrap();
    assert_eq!(
        team.changelog.as_deref(),
        Some(
            format!(
                "{}/administration/changelog.html#release-v5-35-1",
                server.url()
            )
            .as_str()
        )
    );
    assert_eq!(
        team.download.as_deref(),
        Some("https://releases.mattermost.com/5.35.1/mattermost-team-5.35.1-linux-amd64.tar.gz")
    );
}

#[tokio::test]
async fn fetching_the_same_document_twice_yields_equal_archives() {
    let server = serve_fixture().await;
    let fetcher = fetcher_for(&server);

    let first = fetcher.fetch().await.unwrap();
    let second = fetcher.fetch().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn error_status_fails_the_whole_fetch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", ARCHIVE_PATH)
        .with_status(404)
        .create_async()
        .await;

    let err = fetcher_for(&server).fetch().await.unwrap_err();
    assert!(matches!(err, ArchiveError::Status(status) if status.as_u16() == 404));
}

#[tokio::test]
async fn unreachable_archive_is_a_network_error() {
    let url = Url::parse("http://127.0.0.1:1/upgrade/version-archive.html").unwrap();
    let fetcher = ArchiveFetcher::new(url, Duration::from_secs(5));

    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, ArchiveError::Network(_)));
}

#[tokio::test]
async fn stalled_archive_server_is_a_timeout_error() {
    // Accepts the connection but never answers, so the fetch hits its own
    // deadline instead of a connection failure.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let _conn = listener.accept();
        std::thread::sleep(Duration::from_secs(2));
    });

    let url = Url::parse(&format!("http://{addr}{ARCHIVE_PATH}")).unwrap();
    let fetcher = ArchiveFetcher::new(url, Duration::from_millis(200));

    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, ArchiveError::Timeout(_)));
}
