//! Interactive prompt flow for the run parameters. Skipped entirely when
//! `--user-id` is passed on the command line.

use std::io::Write;

use thiserror::Error;

use crate::cli::Cli;
use crate::types::Album;

/// Parameters for one orchestration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub owner_id: i64,
    pub count: u32,
    pub album: Album,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("the id is a numeric VK identifier, not a nickname")]
    InvalidNumber,

    #[error("{0}")]
    InvalidAlbum(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Bad input gets reported and re-prompted; I/O failures do not.
    pub fn is_user_input(&self) -> bool {
        matches!(self, PromptError::InvalidNumber | PromptError::InvalidAlbum(_))
    }
}

/// Build the run request from CLI flags, or interactively when no user id
/// was given. CLI values for count and album serve as the prompt defaults.
pub fn resolve_request(cli: &Cli) -> Result<RunRequest, PromptError> {
    if let Some(owner_id) = cli.user_id {
        return Ok(RunRequest {
            owner_id,
            count: cli.count,
            album: cli.album,
        });
    }

    let owner_id = parse_owner_id(&ask("Enter a VK user id: ")?)?;

    let mut count = cli.count;
    let answer = ask(&format!(
        "By default {count} photos are saved. Save a different number? (Y - yes, Enter - no): "
    ))?;
    if answer == "Y" {
        count = parse_count(&ask("Enter the number of photos to save: ")?)?;
    }

    let mut album = cli.album;
    let answer = ask(&format!(
        "Photos are taken from the {album} album. Choose another? (Y - yes, Enter - no): "
    ))?;
    if answer == "Y" {
        album = parse_album(&ask(
            "Enter an album id (reserved: wall - wall photos, saved - saved photos): ",
        )?)?;
    }

    Ok(RunRequest {
        owner_id,
        count,
        album,
    })
}

fn ask(prompt: &str) -> std::io::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn parse_owner_id(input: &str) -> Result<i64, PromptError> {
    input.parse().map_err(|_| PromptError::InvalidNumber)
}

fn parse_count(input: &str) -> Result<u32, PromptError> {
    match input.parse() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PromptError::InvalidNumber),
    }
}

fn parse_album(input: &str) -> Result<Album, PromptError> {
    input.parse().map_err(PromptError::InvalidAlbum)
}
