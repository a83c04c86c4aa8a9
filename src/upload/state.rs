//! Per-photo upload state machine.
//!
//! Each photo runs `Submitted -> Polling -> {Succeeded, Failed}` with
//! `Failed` looping back to `Submitted` until the attempt ceiling, after
//! which it lands in terminal `Abandoned`. Transitions are explicit so tests
//! can assert on them rather than only on the final outcome, and the sleep
//! between polls goes through an injectable [`Sleeper`] so tests run without
//! wall-clock delay.

use std::time::Duration;

use crate::disk::{CopyStatus, DiskError, PendingCopy, Storage};
use crate::naming::PhotoRecord;

/// Suspension seam for the fixed-interval poll wait.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Poll/retry timing for one photo's copy cycle.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status polls.
    pub interval: Duration,
    /// Per-attempt polling budget; expiry counts as a failed attempt.
    pub timeout: Duration,
    /// Submission ceiling per photo.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            timeout: Duration::from_secs(60),
            max_attempts: 10,
        }
    }
}

impl PollConfig {
    /// How many polls fit into one attempt's budget.
    fn polls_per_attempt(&self) -> u64 {
        let interval_ms = self.interval.as_millis().max(1);
        ((self.timeout.as_millis() / interval_ms) as u64).max(1)
    }
}

/// States of one photo's copy cycle. `attempt` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Submitted { attempt: u32 },
    Polling { attempt: u32, pending: PendingCopy },
    Failed { attempt: u32 },
    Succeeded,
    Abandoned,
}

/// Terminal result of one photo's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoTerminal {
    Succeeded,
    Abandoned,
}

/// Advance the state machine by one transition.
///
/// Only a credential failure escapes as an error; every other disk failure is
/// folded into `Failed` and costs the photo one attempt.
pub async fn step<S>(
    storage: &S,
    sleeper: &dyn Sleeper,
    config: &PollConfig,
    photo: &PhotoRecord,
    destination: &str,
    state: UploadState,
) -> Result<UploadState, DiskError>
where
    S: Storage + ?Sized,
{
    let next = match state {
        UploadState::Submitted { attempt } => {
            match storage.submit_copy(&photo.url, destination).await {
                Ok(pending) => UploadState::Polling { attempt, pending },
                Err(e) if e.is_auth() => return Err(e),
                Err(e) => {
                    tracing::warn!(name = %photo.name, attempt, "copy submission failed: {e}");
                    UploadState::Failed { attempt }
                }
            }
        }
        UploadState::Polling { attempt, pending } => {
            match poll_until_settled(storage, sleeper, config, &pending).await {
                Ok(CopyStatus::Succeeded) => UploadState::Succeeded,
                Ok(CopyStatus::Failed) => UploadState::Failed { attempt },
                Ok(CopyStatus::InProgress) => {
                    tracing::warn!(name = %photo.name, attempt, "copy still pending after poll budget");
                    UploadState::Failed { attempt }
                }
                Err(e) if e.is_auth() => return Err(e),
                Err(e) => {
                    tracing::warn!(name = %photo.name, attempt, "status poll failed: {e}");
                    UploadState::Failed { attempt }
                }
            }
        }
        UploadState::Failed { attempt } => {
            if attempt >= config.max_attempts {
                UploadState::Abandoned
            } else {
                UploadState::Submitted {
                    attempt: attempt + 1,
                }
            }
        }
        terminal @ (UploadState::Succeeded | UploadState::Abandoned) => terminal,
    };
    Ok(next)
}

/// Run one photo's submit/poll/retry cycle to a terminal state.
pub async fn run_to_terminal<S>(
    storage: &S,
    sleeper: &dyn Sleeper,
    config: &PollConfig,
    photo: &PhotoRecord,
    destination: &str,
) -> Result<PhotoTerminal, DiskError>
where
    S: Storage + ?Sized,
{
    let mut state = UploadState::Submitted { attempt: 1 };
    loop {
        state = step(storage, sleeper, config, photo, destination, state).await?;
        match state {
            UploadState::Succeeded => return Ok(PhotoTerminal::Succeeded),
            UploadState::Abandoned => return Ok(PhotoTerminal::Abandoned),
            _ => {}
        }
    }
}

/// Poll on the fixed interval until the copy settles or the attempt's budget
/// is exhausted. Sleeps before the first poll, matching the service's
/// guidance to give the operation a moment before querying it.
async fn poll_until_settled<S>(
    storage: &S,
    sleeper: &dyn Sleeper,
    config: &PollConfig,
    pending: &PendingCopy,
) -> Result<CopyStatus, DiskError>
where
    S: Storage + ?Sized,
{
    for _ in 0..config.polls_per_attempt() {
        sleeper.sleep(config.interval).await;
        match storage.poll_status(pending).await? {
            CopyStatus::InProgress => continue,
            settled => return Ok(settled),
        }
    }
    Ok(CopyStatus::InProgress)
}
