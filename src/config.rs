use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::cli::Cli;

/// Section of the credentials file holding the two API tokens.
const CREDENTIALS_SECTION: &str = "vk_ydisk";

/// Application configuration: tokens plus everything that does not come from
/// the interactive prompt flow.
pub struct Config {
    pub token_vk: String,
    pub token_disk: String,
    pub folder: String,
    pub manifest_path: PathBuf,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub max_attempts: u32,
    pub no_progress_bar: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_vk", &"<redacted>")
            .field("token_disk", &"<redacted>")
            .field("folder", &self.folder)
            .field("manifest_path", &self.manifest_path)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let (token_vk, token_disk) = match (&cli.token_vk, &cli.token_disk) {
            (Some(vk), Some(disk)) => (vk.clone(), disk.clone()),
            _ => {
                let path = expand_tilde(&cli.credentials);
                let text = std::fs::read_to_string(&path).with_context(|| {
                    format!("cannot read credentials file {}", path.display())
                })?;
                let creds = parse_credentials(&text).with_context(|| {
                    format!("malformed credentials file {}", path.display())
                })?;
                (
                    cli.token_vk.clone().unwrap_or(creds.token_vk),
                    cli.token_disk.clone().unwrap_or(creds.token_yandex_disk),
                )
            }
        };

        Ok(Self {
            token_vk,
            token_disk,
            folder: cli.folder.clone(),
            manifest_path: PathBuf::from(&cli.manifest_path),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            poll_timeout: Duration::from_secs(cli.poll_timeout_secs),
            max_attempts: cli.max_attempts,
            no_progress_bar: cli.no_progress_bar,
        })
    }
}

#[derive(Debug)]
struct Credentials {
    token_vk: String,
    token_yandex_disk: String,
}

/// Parse the `[vk_ydisk]` section of an INI-style credentials file.
///
/// Recognizes `key = value` lines; `;` and `#` lines are comments. Keys
/// outside the expected section are ignored.
fn parse_credentials(text: &str) -> anyhow::Result<Credentials> {
    let mut in_section = false;
    let mut token_vk = None;
    let mut token_yandex_disk = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = section.trim() == CREDENTIALS_SECTION;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "token_vk" => token_vk = Some(value.trim().to_string()),
                "token_yandex_disk" => token_yandex_disk = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    Ok(Credentials {
        token_vk: token_vk
            .with_context(|| format!("missing token_vk in [{CREDENTIALS_SECTION}]"))?,
        token_yandex_disk: token_yandex_disk
            .with_context(|| format!("missing token_yandex_disk in [{CREDENTIALS_SECTION}]"))?,
    })
}
