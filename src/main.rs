use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use url::Url;

use mattercheck::check::{self, RunStatus};
use mattercheck::config::ARCHIVE_URL;
use mattercheck::releases::ArchiveFetcher;

#[derive(Parser)]
#[command(name = "mattercheck")]
#[command(version, about = "Checks Mattermost installations for available updates")]
struct Cli {
    /// One or more URLs to probe
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Suppress everything but errors
    #[arg(short, long)]
    quiet: bool,

    /// HTTP timeout per request, in seconds
    #[arg(long, default_value_t = 5, value_name = "SECS")]
    timeout: u64,

    /// Alternative location of the version archive
    #[arg(long, value_name = "URL", default_value = ARCHIVE_URL)]
    archive_url: Url,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet { Level::ERROR } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "could not start runtime");
            return ExitCode::from(RunStatus::ProbeFailed.exit_code());
        }
    };

    ExitCode::from(runtime.block_on(run(cli)).exit_code())
}

async fn run(cli: Cli) -> RunStatus {
    let timeout = Duration::from_secs(cli.timeout);

    let archive = match ArchiveFetcher::new(cli.archive_url, timeout).fetch().await {
        Ok(archive) => archive,
        Err(err) => {
            // No archive, no comparison baseline; nothing else can proceed.
            error!(%err, "could not fetch release archive");
            return RunStatus::ProbeFailed;
        }
    };

    let reports = check::check_instances(&archive, &cli.urls, timeout).await;

    let mut outdated_editions = Vec::new();
    for report in &reports {
        match &report.outcome {
            Err(err) => {
                error!(
                    url = %report.url,
                    version = %report.version_label(),
                    %err,
                    "could not check instance"
                );
            }
            Ok(checked) if checked.update.is_some() => {
                warn!(url = %report.url, version = %checked.running, "found update");
                let edition = checked.running.edition();
                if !outdated_editions.contains(&edition) {
                    outdated_editions.push(edition);
                }
            }
            Ok(checked) => {
                info!(url = %report.url, version = %checked.running, "instance is up-to-date");
            }
        }
    }

    // One summary line per edition that had outdated instances.
    for edition in outdated_editions {
        if let Some(latest) = archive.latest(edition) {
            info!(
                version = %latest.version,
                download = latest.download.as_deref().unwrap_or("-"),
                checksum = latest.checksum.as_deref().unwrap_or("-"),
                changelog = latest.changelog.as_deref().unwrap_or("-"),
                "latest {edition} release"
            );
        }
    }

    check::classify(&reports)
}
