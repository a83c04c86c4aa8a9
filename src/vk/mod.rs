//! VK photo source client — fetches one page of photo metadata via
//! `photos.get`. The request parameters mirror what the web client sends:
//! `rev=1` (newest first) and `extended=1` (include like counts).

pub mod error;
pub mod types;

pub use error::VkError;

use types::{PhotoItem, PhotosEnvelope};

use crate::types::Album;

const VK_API_BASE_URL: &str = "https://api.vk.com/method";
const VK_API_VERSION: &str = "5.199";

pub struct VkClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for VkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VkClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl VkClient {
    pub fn new(http: reqwest::Client, token: String) -> Self {
        Self {
            http,
            token,
            base_url: VK_API_BASE_URL.to_string(),
        }
    }

    /// Fetch up to `count` photo items from the owner's album.
    ///
    /// An unknown owner or album comes back as a VK error envelope (or a body
    /// without `response`), surfaced as `VkError::Api` / `VkError::Shape`.
    pub async fn fetch_photos(
        &self,
        owner_id: i64,
        album: &Album,
        count: u32,
    ) -> Result<Vec<PhotoItem>, VkError> {
        let url = format!("{}/photos.get", self.base_url);
        tracing::debug!(owner_id, album = %album, count, "fetching photo metadata");

        let query = [
            ("access_token", self.token.clone()),
            ("v", VK_API_VERSION.to_string()),
            ("owner_id", owner_id.to_string()),
            ("album_id", album.as_api_value()),
            ("rev", "1".to_string()),
            ("extended", "1".to_string()),
            ("count", count.to_string()),
        ];
        let response = self.http.get(&url).query(&query).send().await?;

        let envelope: PhotosEnvelope = response.json().await?;
        parse_photos_envelope(envelope)
    }
}

/// Unwrap the `photos.get` envelope into the raw item list.
fn parse_photos_envelope(envelope: PhotosEnvelope) -> Result<Vec<PhotoItem>, VkError> {
    if let Some(error) = envelope.error {
        return Err(VkError::Api {
            code: error.error_code,
            message: error.error_msg,
        });
    }
    let page = envelope.response.ok_or(VkError::Shape("response"))?;
    tracing::debug!(items = page.items.len(), total = page.count, "metadata page received");
    Ok(page.items)
}
