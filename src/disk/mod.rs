//! Yandex.Disk storage client — folder creation and server-side
//! remote-to-remote copy. The disk fetches each source URL itself; this
//! client only submits the copy and polls the operation it gets back.

pub mod error;

pub use error::DiskError;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

const DISK_API_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Opaque handle for an in-flight copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCopy {
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// Seam between the orchestrator and the disk API, so the upload state
/// machine can run against a scripted double in tests.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Create the destination folder. Must tolerate the folder already
    /// existing; the response code is not the caller's concern.
    async fn create_folder(&self, path: &str) -> Result<(), DiskError>;

    /// Ask the disk to fetch `source_url` and store it at `destination_path`.
    async fn submit_copy(
        &self,
        source_url: &str,
        destination_path: &str,
    ) -> Result<PendingCopy, DiskError>;

    /// Query the state of an in-flight copy.
    async fn poll_status(&self, pending: &PendingCopy) -> Result<CopyStatus, DiskError>;
}

#[derive(Debug, Deserialize)]
struct UploadLink {
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationStatus {
    status: Option<String>,
}

pub struct DiskClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for DiskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl DiskClient {
    pub fn new(http: reqwest::Client, token: String) -> Self {
        Self {
            http,
            token,
            base_url: DISK_API_BASE_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Storage for DiskClient {
    async fn create_folder(&self, path: &str) -> Result<(), DiskError> {
        let response = self
            .http
            .put(format!("{}/resources", self.base_url))
            .query(&[("path", path)])
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;
        // 201 on creation, 409 when the folder already exists. Either way
        // the folder is there afterwards, so the code is only logged.
        tracing::debug!(status = response.status().as_u16(), path, "create_folder");
        Ok(())
    }

    async fn submit_copy(
        &self,
        source_url: &str,
        destination_path: &str,
    ) -> Result<PendingCopy, DiskError> {
        let response = self
            .http
            .post(format!("{}/resources/upload", self.base_url))
            .query(&[("url", source_url), ("path", destination_path)])
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiskError::Status {
                status: response.status().as_u16(),
                operation: "submit_copy",
            });
        }

        let link: UploadLink = response.json().await?;
        let href = link.href.ok_or(DiskError::MissingHref)?;
        Ok(PendingCopy { href })
    }

    async fn poll_status(&self, pending: &PendingCopy) -> Result<CopyStatus, DiskError> {
        let response = self
            .http
            .get(&pending.href)
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiskError::Status {
                status: response.status().as_u16(),
                operation: "poll_status",
            });
        }

        let body: OperationStatus = response.json().await?;
        parse_copy_status(body.status.as_deref())
    }
}

fn parse_copy_status(status: Option<&str>) -> Result<CopyStatus, DiskError> {
    match status {
        Some("in-progress") => Ok(CopyStatus::InProgress),
        Some("success") => Ok(CopyStatus::Succeeded),
        Some("failed") => Ok(CopyStatus::Failed),
        Some(other) => Err(DiskError::UnknownStatus(other.to_string())),
        None => Err(DiskError::UnknownStatus("<missing>".to_string())),
    }
}
