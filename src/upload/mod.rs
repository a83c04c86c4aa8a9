//! Upload orchestrator — drives every photo through its submit/poll/retry
//! cycle strictly one at a time, accumulating successes and abandoned photos
//! into the run report.

pub mod state;

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::disk::{DiskError, Storage};
use crate::manifest::UploadOutcome;
use crate::naming::PhotoRecord;
use state::{PhotoTerminal, PollConfig, Sleeper};

/// Subset of application config consumed by the orchestrator. Decoupled from
/// CLI parsing so the loop can be tested with scripted storage.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub folder: String,
    pub poll: PollConfig,
    pub no_progress_bar: bool,
}

/// Everything one run produced, threaded through the sequential loop instead
/// of living in shared mutable lists.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<UploadOutcome>,
    pub abandoned: Vec<PhotoRecord>,
}

impl UploadReport {
    pub fn total(&self) -> usize {
        self.uploaded.len() + self.abandoned.len()
    }
}

/// Create a progress bar for the per-photo loop.
///
/// Hidden when the user passed `--no-progress-bar` or stdout is not a TTY,
/// so piped output stays clean.
fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.green}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    pb
}

/// Copy every photo to the destination folder, one at a time.
///
/// Folder creation failures other than a bad credential are logged and
/// ignored: an already-existing folder is the common case and the copy
/// submissions will surface anything genuinely wrong. Only a credential
/// failure aborts the batch; an abandoned photo does not.
pub async fn upload_photos<S>(
    storage: &S,
    sleeper: &dyn Sleeper,
    config: &UploadConfig,
    photos: Vec<PhotoRecord>,
) -> Result<UploadReport, DiskError>
where
    S: Storage + ?Sized,
{
    match storage.create_folder(&config.folder).await {
        Ok(()) => {}
        Err(e) if e.is_auth() => return Err(e),
        Err(e) => tracing::warn!("folder creation response ignored: {e}"),
    }

    let pb = create_progress_bar(config.no_progress_bar, photos.len() as u64);
    let mut report = UploadReport::default();

    for photo in photos {
        pb.set_message(photo.name.clone());
        let destination = format!("{}/{}", config.folder, photo.name);
        match state::run_to_terminal(storage, sleeper, &config.poll, &photo, &destination).await? {
            PhotoTerminal::Succeeded => {
                tracing::info!(name = %photo.name, "photo stored");
                report.uploaded.push(UploadOutcome {
                    file_name: format!("{}.jpg", photo.name),
                    size: photo.size_type.clone(),
                });
            }
            PhotoTerminal::Abandoned => {
                pb.suspend(|| {
                    tracing::error!(
                        name = %photo.name,
                        attempts = config.poll.max_attempts,
                        "photo abandoned after exhausting retries"
                    );
                });
                report.abandoned.push(photo);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(report)
}
