//! vk2disk-rs — copies a bounded set of photos from a VK photo album to
//! Yandex.Disk.
//!
//! Photos are renamed by like count (disambiguated by publication date),
//! copied server-side via the disk's remote-upload API with a per-photo
//! retry ceiling, and recorded in a JSON manifest at the end of the run.

#![warn(clippy::all)]

mod cli;
mod config;
mod disk;
mod manifest;
mod naming;
mod prompt;
mod types;
mod upload;
mod vk;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;
use disk::DiskClient;
use prompt::RunRequest;
use upload::state::{PollConfig, TokioSleeper};
use upload::UploadConfig;
use vk::VkClient;

/// Transport-level cap so a hung API call cannot stall the run forever.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures from one orchestration pass, kept typed so the top-level loop
/// can decide between re-prompting and giving up.
#[derive(thiserror::Error, Debug)]
enum RunError {
    #[error(transparent)]
    Source(#[from] vk::VkError),

    #[error(transparent)]
    Storage(#[from] disk::DiskError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One full pass: fetch metadata, resolve names, copy everything, write the
/// manifest, print the summary.
async fn run_once(
    vk_client: &VkClient,
    disk_client: &DiskClient,
    config: &Config,
    request: &RunRequest,
) -> Result<(), RunError> {
    let items = vk_client
        .fetch_photos(request.owner_id, &request.album, request.count)
        .await?;
    let photos = naming::resolve_names(&items)?;
    tracing::info!(photos = photos.len(), "metadata resolved, starting upload");

    let upload_config = UploadConfig {
        folder: config.folder.clone(),
        poll: PollConfig {
            interval: config.poll_interval,
            timeout: config.poll_timeout,
            max_attempts: config.max_attempts,
        },
        no_progress_bar: config.no_progress_bar,
    };
    let report = upload::upload_photos(disk_client, &TokioSleeper, &upload_config, photos).await?;

    manifest::write_manifest(&config.manifest_path, &report.uploaded)?;

    if report.abandoned.is_empty() {
        println!("Uploaded {} photos successfully.", report.uploaded.len());
    } else {
        println!(
            "Uploaded {} of {} photos.",
            report.uploaded.len(),
            report.total()
        );
        println!("Gave up on the following photos after repeated copy failures:");
        for photo in &report.abandoned {
            println!("  {} ({})", photo.name, photo.url);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = match cli.log_level {
        types::LogLevel::Debug => "debug",
        types::LogLevel::Info => "info",
        types::LogLevel::Warn => "warn",
        types::LogLevel::Error => "error",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    // Credential problems are fatal before any network call.
    let config = Config::from_cli(&cli)?;
    tracing::debug!(?config, "starting vk2disk-rs");

    let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let vk_client = VkClient::new(http.clone(), config.token_vk.clone());
    let disk_client = DiskClient::new(http, config.token_disk.clone());

    // With --user-id the run is flag-driven; re-prompting would only replay
    // the same parameters, so any setup failure is fatal instead.
    let interactive = cli.user_id.is_none();

    loop {
        let request = match prompt::resolve_request(&cli) {
            Ok(request) => request,
            Err(e) if e.is_user_input() => {
                println!("{e} Try again.");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match run_once(&vk_client, &disk_client, &config, &request).await {
            Ok(()) => break,
            Err(RunError::Source(e)) if e.is_user_input() => {
                println!("No such user or album.");
                if !interactive {
                    return Err(e.into());
                }
                println!("Try again.");
            }
            Err(RunError::Storage(e)) if e.is_auth() => {
                println!("The Yandex.Disk token was rejected.");
                if !interactive {
                    return Err(e.into());
                }
                println!("Check it and try again.");
            }
            Err(e) => {
                println!("An unexpected error occurred.");
                return Err(e.into());
            }
        }
    }

    Ok(())
}
