use clap::Parser;

use crate::types::{Album, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "vk2disk-rs", about = "Copy VK album photos to Yandex.Disk")]
pub struct Cli {
    /// VK numeric user id (if not provided, will prompt)
    #[arg(short = 'u', long)]
    pub user_id: Option<i64>,

    /// Number of photos to copy
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: u32,

    /// Source album: profile, wall, saved, or a numeric album id
    #[arg(short = 'a', long, default_value = "profile")]
    pub album: Album,

    /// Path to the credentials file
    #[arg(long, default_value = "~/.vk2disk/settings.ini")]
    pub credentials: String,

    /// VK access token (overrides the credentials file).
    /// WARNING: passing via --token-vk is visible in process listings.
    /// Prefer the VK_TOKEN environment variable instead.
    #[arg(long, env = "VK_TOKEN")]
    pub token_vk: Option<String>,

    /// Yandex.Disk OAuth token (overrides the credentials file)
    #[arg(long, env = "YDISK_TOKEN")]
    pub token_disk: Option<String>,

    /// Destination folder on Yandex.Disk
    #[arg(long, default_value = "Фото из ВК")]
    pub folder: String,

    /// Path for the output manifest
    #[arg(long, default_value = "uploaded_photos_info.json")]
    pub manifest_path: String,

    /// Interval between copy-status polls, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub poll_interval_ms: u64,

    /// Give up polling a single copy attempt after this many seconds
    #[arg(long, default_value_t = 60)]
    pub poll_timeout_secs: u64,

    /// Maximum copy attempts per photo before it is abandoned
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}
